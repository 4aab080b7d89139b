//! Desired state: the links file
//!
//! - `loader`: YAML stream parsing and schema validation
//! - `flatten`: flat per-link view used by the diff engine
//! - `models`: validated data structures
//! - `error`: typed validation errors

pub mod error;
pub mod flatten;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use flatten::{distinct_domains, domains, flatten_links};
pub use loader::{load_links, parse_links};
pub use models::{link_key, FlatLink, LinkConfig, LinkDocument, LinkEntry, LinkSpec};
