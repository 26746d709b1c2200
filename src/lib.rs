//! Strongly-typed async client for the Apache CloudStack management API.
//!
//! Each API command has a parameter struct (constructed with the command's
//! required parameters, then filled in with typed setters) and an executor
//! on the matching service that returns a typed response record.
//!
//! ```ignore
//! use cloudstack::{CloudStackClient, Config};
//! use cloudstack::services::ListEventsParams;
//!
//! # async fn run() -> cloudstack::Result<()> {
//! let client = CloudStackClient::from_config(&Config::load())?;
//!
//! let mut params = ListEventsParams::new();
//! params.set_level("ERROR");
//! params.set_page_size(50);
//!
//! let events = client.event().list_events(&params).await?;
//! for event in &events.events {
//!     println!("{} {} {}", event.created, event.event_type, event.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cloudstack;
pub mod config;
pub mod error;
pub mod services;

pub use cloudstack::auth::Credentials;
pub use cloudstack::client::{CloudStackClient, Command, ListRequest, RequestOption, Transport};
pub use cloudstack::http::HttpTransport;
pub use cloudstack::lookup::{Listing, Named, Resource};
pub use cloudstack::options::{with_domain, with_list_all, with_project, with_zone};
pub use cloudstack::query::QueryParams;
pub use config::Config;
pub use error::{ApiError, CloudStackError, Result};
