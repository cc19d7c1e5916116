//! # ddns-sync
//!
//! Provider update protocol layer for Dynamic DNS clients.
//!
//! The crate validates vendor credential shapes, builds each vendor's
//! update request for a caller-supplied target IP, and normalizes the
//! vendor's response into one shared error taxonomy. Scheduling,
//! public-IP detection and retry policy belong to the caller.
//!
//! ## Usage
//!
//! ```no_run
//! use ddns_sync::{create_provider, Config, CredentialMatcher};
//!
//! # async fn run() -> ddns_sync::Result<()> {
//! let matcher = CredentialMatcher::new()?;
//! let config = Config::load()?;
//! let client = reqwest::Client::new();
//!
//! for entry in &config.providers {
//!     let provider = create_provider(entry, &matcher)?;
//!     let new_ip = provider.update(&client, "203.0.113.5".parse().unwrap()).await?;
//!     println!("{} now points at {}", provider.domain(), new_ip);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod ip_search;
pub mod matcher;
pub mod providers;
pub mod response;

pub use config::{Config, IpVersion, ProviderConfig};
pub use error::{DdnsError, Result, UpdateError, ValidationError};
pub use matcher::CredentialMatcher;
pub use providers::{create_provider, DdnsProvider};
