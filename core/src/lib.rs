//! Typed blocking client for the Turso platform API.
//!
//! # Overview
//! Covers API tokens, databases, locations, organizations and members. Every
//! method maps onto one HTTP endpoint: it builds a `RequestSpec`, the client
//! turns that into an `HttpRequest` with the bearer key attached, a
//! `Transport` executes it, and the JSON answer is decoded into a typed
//! result.
//!
//! ```no_run
//! use turso_api::{ClientConfig, TursoClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TursoClient::new(ClientConfig::from_env()?);
//! for org in client.organizations().list()? {
//!     let dbs = client.databases().list(&org.slug, None, None)?;
//!     println!("{}: {} databases", org.slug, dbs.databases.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - The client is immutable; there is no retry, cache or pagination.
//! - Two fixed hosts: the API host for everything, the region host only for
//!   `locations().closest()`.
//! - Non-2xx answers become `ApiError::Status`; transport failures become
//!   `ApiError::Transport`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod resources;
pub mod types;

pub use client::TursoClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestSpec, Transport, UreqTransport};
pub use query::{build_query, QueryMap};
pub use types::*;
