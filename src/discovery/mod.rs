//! URL discovery: sitemap parsing, link crawling, and the composite
//! strategy that combines them.

pub mod composite;
pub mod crawler;
pub mod filters;
pub mod sitemap;

pub use composite::CompositeDiscoverer;
pub use crawler::LinkCrawler;
pub use filters::{CompositeFilter, DomainFilter, PatternFilter, SeenUrlTracker};
pub use sitemap::SitemapDiscoverer;
