//! CloudStack API plumbing
//!
//! This module provides the pieces every command goes through: parameter
//! encoding, request execution, tolerant response decoding and the lookup
//! helpers built on top of listing commands.
//!
//! # Module Structure
//!
//! - [`auth`] - API key pair and request signing
//! - [`client`] - Main client, the `Transport` seam and the `Command` trait
//! - [`decode`] - Tolerant decoding of type-inconsistent response fields
//! - [`http`] - reqwest-backed transport
//! - [`lookup`] - Resolve a name or id to exactly one entity
//! - [`options`] - Request options for scoping listing requests
//! - [`query`] - Query parameter encoding
//!
//! # Example
//!
//! ```ignore
//! use cloudstack::{CloudStackClient, Config};
//!
//! async fn example() -> cloudstack::Result<()> {
//!     let client = CloudStackClient::from_config(&Config::load())?;
//!     let store = client.image_store().get_image_store_by_name("nfs-1", &[]).await?;
//!     println!("{} -> {}", store.name, store.url);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod decode;
pub mod http;
pub mod lookup;
pub mod options;
pub mod query;
