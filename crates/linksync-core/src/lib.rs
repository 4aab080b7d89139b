//! linksync Core Library
//!
//! This crate provides the core functionality for linksync, which keeps the
//! short links of a link-shortening service in line with a YAML file.
//!
//! # Architecture
//!
//! - **Desired state**: a multi-document YAML links file, validated up front
//! - **Actual state**: fetched through the [`LinkService`] trait
//! - **Reconciliation**: a pure diff plus an executor that isolates failures
//!
//! # Quick Start
//!
//! ```text
//! let config = load_links("links.yaml")?;
//! let client = ShortIoClient::from_config(&Config::load()?)?;
//!
//! let diff = compute_diff(&config, &client).await?;
//! let result = apply_diff(&diff, &client, ApplyOptions::default()).await;
//! println!("{}", render_summary(&result, false));
//! ```
//!
//! # Modules
//!
//! - `links`: links file loading, validation, and flattening
//! - `reconcile`: diff computation and application
//! - `remote`: remote service trait and Short.io client
//! - `config`: application configuration

pub mod config;
pub mod links;
pub mod reconcile;
pub mod remote;

pub use config::Config;
pub use links::{load_links, parse_links, ConfigError, FlatLink, LinkConfig, LinkSpec};
pub use reconcile::{
    apply_diff, compute_diff, diff_links, render_summary, ApplyOptions, LinkDiff, LinkUpdate,
    SyncResult,
};
pub use remote::{LinkService, RemoteError, RemoteLink, ShortIoClient};
