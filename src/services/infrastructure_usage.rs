//! Infrastructure Usage
//!
//! Read-only commands describing the management servers and the database
//! behind a CloudStack installation.

use crate::cloudstack::client::{CloudStackClient, Command, ListRequest, RequestOption};
use crate::cloudstack::decode::{bool_or_string, string_or_number};
use crate::cloudstack::lookup::{self, Named, Resource};
use crate::cloudstack::query::QueryParams;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filters shared by both management server listings
#[derive(Debug, Clone, Default)]
struct ServerFilter {
    id: Option<String>,
    keyword: Option<String>,
    name: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

impl ServerFilter {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(v) = &self.id {
            query.set("id", v.as_str());
        }
        if let Some(v) = &self.keyword {
            query.set("keyword", v.as_str());
        }
        if let Some(v) = &self.name {
            query.set("name", v.as_str());
        }
        if let Some(v) = self.page {
            query.set_int("page", v);
        }
        if let Some(v) = self.page_size {
            query.set_int("pagesize", v);
        }
        query
    }
}

// =============================================================================
// listManagementServers
// =============================================================================

/// Parameters for `listManagementServers`
#[derive(Debug, Clone, Default)]
pub struct ListManagementServersParams {
    filter: ServerFilter,
}

impl ListManagementServersParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id(&mut self, v: impl Into<String>) {
        self.filter.id = Some(v.into());
    }

    pub fn set_keyword(&mut self, v: impl Into<String>) {
        self.filter.keyword = Some(v.into());
    }

    pub fn set_name(&mut self, v: impl Into<String>) {
        self.filter.name = Some(v.into());
    }

    pub fn set_page(&mut self, v: i64) {
        self.filter.page = Some(v);
    }

    pub fn set_page_size(&mut self, v: i64) {
        self.filter.page_size = Some(v);
    }

    pub fn id(&self) -> Option<&str> {
        self.filter.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.filter.name.as_deref()
    }
}

impl Command for ListManagementServersParams {
    const NAME: &'static str = "listManagementServers";
    type Response = ListManagementServersResponse;

    fn to_query(&self) -> QueryParams {
        self.filter.to_query()
    }
}

impl ListRequest for ListManagementServersParams {
    fn command(&self) -> &'static str {
        Self::NAME
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListManagementServersResponse {
    pub count: usize,
    #[serde(rename = "managementserver")]
    pub management_servers: Vec<ManagementServer>,
}

super::impl_listing!(ListManagementServersResponse, ManagementServer, management_servers);

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagementServer {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "javadistribution")]
    pub java_distribution: String,
    #[serde(rename = "javaversion")]
    pub java_version: String,
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    #[serde(rename = "kernelversion")]
    pub kernel_version: String,
    #[serde(rename = "lastboottime")]
    pub last_boot_time: String,
    #[serde(rename = "lastserverstart")]
    pub last_server_start: String,
    #[serde(rename = "lastserverstop")]
    pub last_server_stop: String,
    pub name: String,
    #[serde(rename = "osdistribution")]
    pub os_distribution: String,
    #[serde(rename = "serviceip")]
    pub service_ip: String,
    pub state: String,
    pub version: String,
}

impl Resource for ManagementServer {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for ManagementServer {
    fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// listManagementServersMetrics
// =============================================================================

/// Parameters for `listManagementServersMetrics`
#[derive(Debug, Clone, Default)]
pub struct ListManagementServersMetricsParams {
    filter: ServerFilter,
    system: Option<bool>,
}

impl ListManagementServersMetricsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id(&mut self, v: impl Into<String>) {
        self.filter.id = Some(v.into());
    }

    pub fn set_keyword(&mut self, v: impl Into<String>) {
        self.filter.keyword = Some(v.into());
    }

    pub fn set_name(&mut self, v: impl Into<String>) {
        self.filter.name = Some(v.into());
    }

    pub fn set_page(&mut self, v: i64) {
        self.filter.page = Some(v);
    }

    pub fn set_page_size(&mut self, v: i64) {
        self.filter.page_size = Some(v);
    }

    /// Include host system metrics alongside the JVM ones
    pub fn set_system(&mut self, v: bool) {
        self.system = Some(v);
    }

    pub fn id(&self) -> Option<&str> {
        self.filter.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.filter.name.as_deref()
    }

    pub fn system(&self) -> Option<bool> {
        self.system
    }
}

impl Command for ListManagementServersMetricsParams {
    const NAME: &'static str = "listManagementServersMetrics";
    type Response = ListManagementServersMetricsResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = self.filter.to_query();
        if let Some(v) = self.system {
            query.set_bool("system", v);
        }
        query
    }
}

impl ListRequest for ListManagementServersMetricsParams {
    fn command(&self) -> &'static str {
        Self::NAME
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListManagementServersMetricsResponse {
    pub count: usize,
    #[serde(rename = "managementserversmetric")]
    pub management_servers_metrics: Vec<ManagementServersMetric>,
}

super::impl_listing!(
    ListManagementServersMetricsResponse,
    ManagementServersMetric,
    management_servers_metrics
);

/// Runtime metrics of one management server
///
/// Load averages are kept as raw JSON: servers send them either as a
/// preformatted string or as an array of numbers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagementServersMetric {
    #[serde(rename = "agentcount")]
    pub agent_count: i32,
    #[serde(rename = "availableprocessors")]
    pub available_processors: i32,
    #[serde(rename = "collectiontime")]
    pub collection_time: String,
    #[serde(rename = "cpuload")]
    pub cpu_load: String,
    #[serde(rename = "dbislocal", deserialize_with = "bool_or_string")]
    pub db_is_local: bool,
    #[serde(rename = "heapmemorytotal")]
    pub heap_memory_total: i64,
    #[serde(rename = "heapmemoryused")]
    pub heap_memory_used: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "javadistribution")]
    pub java_distribution: String,
    #[serde(rename = "javaversion")]
    pub java_version: String,
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    #[serde(rename = "kernelversion")]
    pub kernel_version: String,
    #[serde(rename = "lastboottime")]
    pub last_boot_time: String,
    #[serde(rename = "lastserverstart")]
    pub last_server_start: String,
    #[serde(rename = "lastserverstop")]
    pub last_server_stop: String,
    #[serde(rename = "loginfo")]
    pub log_info: String,
    pub name: String,
    #[serde(rename = "osdistribution")]
    pub os_distribution: String,
    #[serde(rename = "serviceip")]
    pub service_ip: String,
    pub sessions: i64,
    pub state: String,
    #[serde(rename = "systemcycleusage")]
    pub system_cycle_usage: Value,
    #[serde(rename = "systemloadaverages")]
    pub system_load_averages: Value,
    #[serde(rename = "systemmemoryfree")]
    pub system_memory_free: String,
    #[serde(rename = "systemmemorytotal")]
    pub system_memory_total: String,
    #[serde(rename = "systemmemoryused")]
    pub system_memory_used: String,
    #[serde(rename = "systemmemoryvirtualsize")]
    pub system_memory_virtual_size: String,
    #[serde(rename = "systemtotalcpucycles")]
    pub system_total_cpu_cycles: f64,
    #[serde(rename = "threadsblockedcount")]
    pub threads_blocked_count: i32,
    #[serde(rename = "threadsdaemoncount")]
    pub threads_daemon_count: i32,
    #[serde(rename = "threadsrunnablecount")]
    pub threads_runnable_count: i32,
    #[serde(rename = "threadsteminatedcount")]
    pub threads_terminated_count: i32,
    #[serde(rename = "threadstotalcount")]
    pub threads_total_count: i32,
    #[serde(rename = "threadswaitingcount")]
    pub threads_waiting_count: i32,
    #[serde(rename = "usageislocal", deserialize_with = "bool_or_string")]
    pub usage_is_local: bool,
    pub version: String,
}

impl Resource for ManagementServersMetric {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for ManagementServersMetric {
    fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// listDbMetrics
// =============================================================================

/// Parameters for `listDbMetrics`
#[derive(Debug, Clone, Copy, Default)]
pub struct ListDbMetricsParams;

impl ListDbMetricsParams {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ListDbMetricsParams {
    const NAME: &'static str = "listDbMetrics";
    type Response = ListDbMetricsResponse;

    fn to_query(&self) -> QueryParams {
        QueryParams::new()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListDbMetricsResponse {
    pub count: usize,
    #[serde(rename = "dbmetric")]
    pub db_metrics: Vec<DbMetric>,
}

super::impl_listing!(ListDbMetricsResponse, DbMetric, db_metrics);

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DbMetric {
    #[serde(rename = "collectiontime")]
    pub collection_time: String,
    pub connections: i32,
    #[serde(rename = "dbloadaverages")]
    pub db_load_averages: Value,
    #[serde(rename = "hostname")]
    pub host_name: String,
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    pub queries: i64,
    pub replicas: Value,
    #[serde(rename = "tlsversions")]
    pub tls_versions: String,
    pub uptime: i64,
    pub version: String,
    #[serde(rename = "versioncomment")]
    pub version_comment: String,
}

// =============================================================================
// Service
// =============================================================================

/// Infrastructure usage commands
pub struct InfrastructureUsageService<'a> {
    client: &'a CloudStackClient,
}

impl<'a> InfrastructureUsageService<'a> {
    pub(crate) fn new(client: &'a CloudStackClient) -> Self {
        Self { client }
    }

    /// List management servers
    pub async fn list_management_servers(
        &self,
        params: &ListManagementServersParams,
    ) -> Result<ListManagementServersResponse> {
        self.client.execute(params).await
    }

    /// List management servers with their runtime metrics
    pub async fn list_management_servers_metrics(
        &self,
        params: &ListManagementServersMetricsParams,
    ) -> Result<ListManagementServersMetricsResponse> {
        self.client.execute(params).await
    }

    /// List database metrics
    pub async fn list_db_metrics(&self) -> Result<ListDbMetricsResponse> {
        self.client.execute(&ListDbMetricsParams).await
    }

    // =========================================================================
    // Lookup helpers
    // =========================================================================

    pub async fn get_management_server_id(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<String> {
        let mut params = ListManagementServersParams::new();
        params.set_name(name);
        lookup::resolve_id_by_name(self.client, params, name, opts).await
    }

    pub async fn get_management_server_by_name(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<ManagementServer> {
        let mut params = ListManagementServersParams::new();
        params.set_name(name);
        lookup::resolve_by_name(
            self.client,
            params,
            |id| {
                let mut by_id = ListManagementServersParams::new();
                by_id.set_id(id);
                by_id
            },
            name,
            opts,
        )
        .await
    }

    pub async fn get_management_server_by_id(
        &self,
        id: &str,
        opts: &[RequestOption],
    ) -> Result<ManagementServer> {
        let mut params = ListManagementServersParams::new();
        params.set_id(id);
        lookup::resolve_by_id(self.client, params, id, opts).await
    }

    pub async fn get_management_servers_metric_id(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<String> {
        let mut params = ListManagementServersMetricsParams::new();
        params.set_name(name);
        lookup::resolve_id_by_name(self.client, params, name, opts).await
    }

    pub async fn get_management_servers_metric_by_name(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<ManagementServersMetric> {
        let mut params = ListManagementServersMetricsParams::new();
        params.set_name(name);
        lookup::resolve_by_name(
            self.client,
            params,
            |id| {
                let mut by_id = ListManagementServersMetricsParams::new();
                by_id.set_id(id);
                by_id
            },
            name,
            opts,
        )
        .await
    }

    pub async fn get_management_servers_metric_by_id(
        &self,
        id: &str,
        opts: &[RequestOption],
    ) -> Result<ManagementServersMetric> {
        let mut params = ListManagementServersMetricsParams::new();
        params.set_id(id);
        lookup::resolve_by_id(self.client, params, id, opts).await
    }
}
