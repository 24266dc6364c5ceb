//! Configuration record and validating builder for the fetch engine.
//!
//! `FetchConfig` is the language-neutral "Config record" described by the
//! system's external interfaces: constructed once via [`FetchConfigBuilder`],
//! validated at `build()`, and then immutable for the run.

pub mod auth;
pub mod builder;
pub mod byte_size;
pub mod profiles;
pub mod types;

pub use auth::Auth;
pub use builder::FetchConfigBuilder;
pub use byte_size::ByteSize;
pub use profiles::Profile;
pub use types::{FetchConfig, NamingStrategy, OutputFormat};
