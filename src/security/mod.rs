//! SSRF-resistant URL validation and robots.txt compliance.

pub mod robots;
pub mod url_validator;

pub use robots::RobotsChecker;
pub use url_validator::{Rejection, UrlValidator};
