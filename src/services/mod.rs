//! Command families
//!
//! One module per API area. Each command has a parameter struct that
//! implements [`Command`](crate::Command), a response record, and an
//! executor method on the area's service (reached through the client, e.g.
//! `client.image_store()`).
//!
//! - [`event`] - archive, delete and list events
//! - [`image_store`] - image stores and secondary staging stores
//! - [`infrastructure_usage`] - management servers and database metrics

use crate::cloudstack::decode::{bool_or_string, string_or_number};
use serde::{Deserialize, Serialize};

/// Result of commands that only report success
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SuccessResponse {
    #[serde(rename = "displaytext")]
    pub display_text: String,
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    #[serde(deserialize_with = "bool_or_string")]
    pub success: bool,
}

/// Implement [`Listing`](crate::Listing) for a count + items envelope
macro_rules! impl_listing {
    ($envelope:ty, $item:ty, $field:ident) => {
        impl $crate::cloudstack::lookup::Listing for $envelope {
            type Item = $item;

            fn count(&self) -> usize {
                self.count
            }

            fn items(&self) -> &[$item] {
                &self.$field
            }

            fn into_items(self) -> Vec<$item> {
                self.$field
            }
        }
    };
}

pub(crate) use impl_listing;

pub mod event;
pub mod image_store;
pub mod infrastructure_usage;

pub use event::*;
pub use image_store::*;
pub use infrastructure_usage::*;
