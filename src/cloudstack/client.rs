//! CloudStack Client
//!
//! Main client for issuing CloudStack commands. It owns the transport and
//! the client-wide request options, and is cheap to clone and share across
//! tasks.

use super::decode::decode;
use super::http::HttpTransport;
use super::query::QueryParams;
use crate::config::Config;
use crate::error::Result;
use crate::services::{EventService, ImageStoreService, InfrastructureUsageService};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Executes a single command against the management server
///
/// Implementations own authentication, signing, retries and HTTP details.
/// The returned bytes are the JSON body inside the command's response
/// envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, command: &str, query: &QueryParams) -> anyhow::Result<Vec<u8>>;
}

/// A typed command: its wire name, parameters and response record
pub trait Command {
    /// Command name as the API knows it (e.g. `listEvents`)
    const NAME: &'static str;

    type Response: DeserializeOwned;

    fn to_query(&self) -> QueryParams;
}

/// Mutable view of a listing request handed to request options
///
/// Scoping setters return `false` when the command has no such parameter.
pub trait ListRequest: Send {
    fn command(&self) -> &'static str;

    fn scope_project(&mut self, _project_id: &str) -> bool {
        false
    }

    fn scope_domain(&mut self, _domain_id: &str) -> bool {
        false
    }

    fn scope_zone(&mut self, _zone_id: &str) -> bool {
        false
    }

    fn scope_list_all(&mut self, _list_all: bool) -> bool {
        false
    }
}

/// Function applied to a listing request before it is executed
pub type RequestOption =
    Arc<dyn Fn(&CloudStackClient, &mut dyn ListRequest) -> Result<()> + Send + Sync>;

/// Main CloudStack client
#[derive(Clone)]
pub struct CloudStackClient {
    transport: Arc<dyn Transport>,
    options: Vec<RequestOption>,
}

impl CloudStackClient {
    /// Create a client over any transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            options: Vec::new(),
        }
    }

    /// Create a client talking HTTP to the configured management server
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpTransport::from_config(config)?))
    }

    /// Register an option applied to every lookup, before per-call options
    pub fn with_option(mut self, option: RequestOption) -> Self {
        self.options.push(option);
        self
    }

    /// Execute a command and decode its response record
    pub async fn execute<C>(&self, params: &C) -> Result<C::Response>
    where
        C: Command + ?Sized,
    {
        let query = params.to_query();
        tracing::debug!("execute: command={}, params={}", C::NAME, query.len());

        let body = self.transport.execute(C::NAME, &query).await?;
        decode(&body)
    }

    /// Apply client-wide options, then `opts`, stopping at the first failure
    pub(crate) fn apply_options(
        &self,
        request: &mut dyn ListRequest,
        opts: &[RequestOption],
    ) -> Result<()> {
        for option in self.options.iter().chain(opts) {
            option(self, request)?;
        }
        Ok(())
    }

    // =========================================================================
    // Services
    // =========================================================================

    pub fn event(&self) -> EventService<'_> {
        EventService::new(self)
    }

    pub fn image_store(&self) -> ImageStoreService<'_> {
        ImageStoreService::new(self)
    }

    pub fn infrastructure_usage(&self) -> InfrastructureUsageService<'_> {
        InfrastructureUsageService::new(self)
    }
}

impl fmt::Debug for CloudStackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudStackClient")
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}
