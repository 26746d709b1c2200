//! Image Stores
//!
//! Commands for secondary storage: image stores (NFS, S3, Swift, ...) and
//! secondary staging stores.

use super::SuccessResponse;
use crate::cloudstack::client::{CloudStackClient, Command, ListRequest, RequestOption};
use crate::cloudstack::decode::string_or_number;
use crate::cloudstack::lookup::{self, Named, Resource};
use crate::cloudstack::query::QueryParams;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Image store as returned by every image store command
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageStore {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    pub name: String,
    pub protocol: String,
    #[serde(rename = "providername")]
    pub provider_name: String,
    pub scope: String,
    pub url: String,
    #[serde(rename = "zoneid", deserialize_with = "string_or_number")]
    pub zone_id: String,
    #[serde(rename = "zonename")]
    pub zone_name: String,
}

impl Resource for ImageStore {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for ImageStore {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Secondary staging stores share the image store shape
pub type SecondaryStagingStore = ImageStore;

pub type AddImageStoreResponse = ImageStore;
pub type AddImageStoreS3Response = ImageStore;
pub type CreateSecondaryStagingStoreResponse = ImageStore;
pub type UpdateCloudToUseObjectStoreResponse = ImageStore;
pub type DeleteImageStoreResponse = SuccessResponse;
pub type DeleteSecondaryStagingStoreResponse = SuccessResponse;

// =============================================================================
// addImageStore
// =============================================================================

/// Parameters for `addImageStore`
#[derive(Debug, Clone)]
pub struct AddImageStoreParams {
    details: Option<HashMap<String, String>>,
    name: Option<String>,
    provider: String,
    url: Option<String>,
    zone_id: Option<String>,
}

impl AddImageStoreParams {
    /// `provider` is the storage provider name, e.g. `NFS` or `Swift`
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            details: None,
            name: None,
            provider: provider.into(),
            url: None,
            zone_id: None,
        }
    }

    /// Provider-specific details, sent as `details[i].key/value`
    pub fn set_details(&mut self, v: HashMap<String, String>) {
        self.details = Some(v);
    }

    pub fn set_name(&mut self, v: impl Into<String>) {
        self.name = Some(v.into());
    }

    pub fn set_provider(&mut self, v: impl Into<String>) {
        self.provider = v.into();
    }

    pub fn set_url(&mut self, v: impl Into<String>) {
        self.url = Some(v.into());
    }

    pub fn set_zone_id(&mut self, v: impl Into<String>) {
        self.zone_id = Some(v.into());
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

impl Command for AddImageStoreParams {
    const NAME: &'static str = "addImageStore";
    type Response = AddImageStoreResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(v) = &self.details {
            query.set_map("details", v);
        }
        if let Some(v) = &self.name {
            query.set("name", v.as_str());
        }
        query.set("provider", self.provider.as_str());
        if let Some(v) = &self.url {
            query.set("url", v.as_str());
        }
        if let Some(v) = &self.zone_id {
            query.set("zoneid", v.as_str());
        }
        query
    }
}

// =============================================================================
// addImageStoreS3
// =============================================================================

/// Parameters for `addImageStoreS3`
#[derive(Clone)]
pub struct AddImageStoreS3Params {
    access_key: String,
    bucket: String,
    connection_timeout: Option<i64>,
    connection_ttl: Option<i64>,
    endpoint: String,
    max_error_retry: Option<i64>,
    s3_signer: Option<String>,
    secret_key: String,
    socket_timeout: Option<i64>,
    use_https: Option<bool>,
    use_tcp_keepalive: Option<bool>,
}

impl AddImageStoreS3Params {
    pub fn new(
        access_key: impl Into<String>,
        bucket: impl Into<String>,
        endpoint: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            bucket: bucket.into(),
            connection_timeout: None,
            connection_ttl: None,
            endpoint: endpoint.into(),
            max_error_retry: None,
            s3_signer: None,
            secret_key: secret_key.into(),
            socket_timeout: None,
            use_https: None,
            use_tcp_keepalive: None,
        }
    }

    pub fn set_access_key(&mut self, v: impl Into<String>) {
        self.access_key = v.into();
    }

    pub fn set_bucket(&mut self, v: impl Into<String>) {
        self.bucket = v.into();
    }

    /// Connection timeout in milliseconds
    pub fn set_connection_timeout(&mut self, v: i64) {
        self.connection_timeout = Some(v);
    }

    /// Connection TTL in milliseconds
    pub fn set_connection_ttl(&mut self, v: i64) {
        self.connection_ttl = Some(v);
    }

    pub fn set_endpoint(&mut self, v: impl Into<String>) {
        self.endpoint = v.into();
    }

    pub fn set_max_error_retry(&mut self, v: i64) {
        self.max_error_retry = Some(v);
    }

    /// Signature algorithm, `S3SignerType` or `AWSS3V4SignerType`
    pub fn set_s3_signer(&mut self, v: impl Into<String>) {
        self.s3_signer = Some(v.into());
    }

    pub fn set_secret_key(&mut self, v: impl Into<String>) {
        self.secret_key = v.into();
    }

    pub fn set_socket_timeout(&mut self, v: i64) {
        self.socket_timeout = Some(v);
    }

    pub fn set_use_https(&mut self, v: bool) {
        self.use_https = Some(v);
    }

    pub fn set_use_tcp_keepalive(&mut self, v: bool) {
        self.use_tcp_keepalive = Some(v);
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Command for AddImageStoreS3Params {
    const NAME: &'static str = "addImageStoreS3";
    type Response = AddImageStoreS3Response;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set("accesskey", self.access_key.as_str());
        query.set("bucket", self.bucket.as_str());
        if let Some(v) = self.connection_timeout {
            query.set_int("connectiontimeout", v);
        }
        if let Some(v) = self.connection_ttl {
            query.set_int("connectionttl", v);
        }
        query.set("endpoint", self.endpoint.as_str());
        if let Some(v) = self.max_error_retry {
            query.set_int("maxerrorretry", v);
        }
        if let Some(v) = &self.s3_signer {
            query.set("s3signer", v.as_str());
        }
        query.set("secretkey", self.secret_key.as_str());
        if let Some(v) = self.socket_timeout {
            query.set_int("sockettimeout", v);
        }
        if let Some(v) = self.use_https {
            query.set_bool("usehttps", v);
        }
        if let Some(v) = self.use_tcp_keepalive {
            query.set_bool("usetcpkeepalive", v);
        }
        query
    }
}

// Security: keep the S3 secret out of debug output
impl fmt::Debug for AddImageStoreS3Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddImageStoreS3Params")
            .field("access_key", &self.access_key)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("secret_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// createSecondaryStagingStore
// =============================================================================

/// Parameters for `createSecondaryStagingStore`
#[derive(Debug, Clone)]
pub struct CreateSecondaryStagingStoreParams {
    details: Option<HashMap<String, String>>,
    provider: Option<String>,
    scope: Option<String>,
    url: String,
    zone_id: Option<String>,
}

impl CreateSecondaryStagingStoreParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            details: None,
            provider: None,
            scope: None,
            url: url.into(),
            zone_id: None,
        }
    }

    pub fn set_details(&mut self, v: HashMap<String, String>) {
        self.details = Some(v);
    }

    pub fn set_provider(&mut self, v: impl Into<String>) {
        self.provider = Some(v.into());
    }

    /// Scope of the store, e.g. `ZONE`
    pub fn set_scope(&mut self, v: impl Into<String>) {
        self.scope = Some(v.into());
    }

    pub fn set_url(&mut self, v: impl Into<String>) {
        self.url = v.into();
    }

    pub fn set_zone_id(&mut self, v: impl Into<String>) {
        self.zone_id = Some(v.into());
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Command for CreateSecondaryStagingStoreParams {
    const NAME: &'static str = "createSecondaryStagingStore";
    type Response = CreateSecondaryStagingStoreResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(v) = &self.details {
            query.set_map("details", v);
        }
        if let Some(v) = &self.provider {
            query.set("provider", v.as_str());
        }
        if let Some(v) = &self.scope {
            query.set("scope", v.as_str());
        }
        query.set("url", self.url.as_str());
        if let Some(v) = &self.zone_id {
            query.set("zoneid", v.as_str());
        }
        query
    }
}

// =============================================================================
// deleteImageStore / deleteSecondaryStagingStore
// =============================================================================

/// Parameters for `deleteImageStore`
#[derive(Debug, Clone)]
pub struct DeleteImageStoreParams {
    id: String,
}

impl DeleteImageStoreParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn set_id(&mut self, v: impl Into<String>) {
        self.id = v.into();
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Command for DeleteImageStoreParams {
    const NAME: &'static str = "deleteImageStore";
    type Response = DeleteImageStoreResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set("id", self.id.as_str());
        query
    }
}

/// Parameters for `deleteSecondaryStagingStore`
#[derive(Debug, Clone)]
pub struct DeleteSecondaryStagingStoreParams {
    id: String,
}

impl DeleteSecondaryStagingStoreParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn set_id(&mut self, v: impl Into<String>) {
        self.id = v.into();
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Command for DeleteSecondaryStagingStoreParams {
    const NAME: &'static str = "deleteSecondaryStagingStore";
    type Response = DeleteSecondaryStagingStoreResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set("id", self.id.as_str());
        query
    }
}

// =============================================================================
// listImageStores / listSecondaryStagingStores
// =============================================================================

/// Filters shared by both store listings
#[derive(Debug, Clone, Default)]
struct StoreFilter {
    id: Option<String>,
    keyword: Option<String>,
    name: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
    protocol: Option<String>,
    provider: Option<String>,
    zone_id: Option<String>,
}

impl StoreFilter {
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
        if let Some(v) = &self.protocol {
            query.set("protocol", v.as_str());
        }
        if let Some(v) = &self.provider {
            query.set("provider", v.as_str());
        }
        if let Some(v) = &self.zone_id {
            query.set("zoneid", v.as_str());
        }
        query
    }
}

/// Parameters for `listImageStores`
#[derive(Debug, Clone, Default)]
pub struct ListImageStoresParams {
    filter: StoreFilter,
}

impl ListImageStoresParams {
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

    /// Storage protocol, e.g. `nfs`
    pub fn set_protocol(&mut self, v: impl Into<String>) {
        self.filter.protocol = Some(v.into());
    }

    pub fn set_provider(&mut self, v: impl Into<String>) {
        self.filter.provider = Some(v.into());
    }

    pub fn set_zone_id(&mut self, v: impl Into<String>) {
        self.filter.zone_id = Some(v.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.filter.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.filter.name.as_deref()
    }

    pub fn zone_id(&self) -> Option<&str> {
        self.filter.zone_id.as_deref()
    }
}

impl Command for ListImageStoresParams {
    const NAME: &'static str = "listImageStores";
    type Response = ListImageStoresResponse;

    fn to_query(&self) -> QueryParams {
        self.filter.to_query()
    }
}

impl ListRequest for ListImageStoresParams {
    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn scope_zone(&mut self, zone_id: &str) -> bool {
        self.set_zone_id(zone_id);
        true
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListImageStoresResponse {
    pub count: usize,
    #[serde(rename = "imagestore")]
    pub image_stores: Vec<ImageStore>,
}

super::impl_listing!(ListImageStoresResponse, ImageStore, image_stores);

/// Parameters for `listSecondaryStagingStores`
#[derive(Debug, Clone, Default)]
pub struct ListSecondaryStagingStoresParams {
    filter: StoreFilter,
}

impl ListSecondaryStagingStoresParams {
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

    pub fn set_protocol(&mut self, v: impl Into<String>) {
        self.filter.protocol = Some(v.into());
    }

    pub fn set_provider(&mut self, v: impl Into<String>) {
        self.filter.provider = Some(v.into());
    }

    pub fn set_zone_id(&mut self, v: impl Into<String>) {
        self.filter.zone_id = Some(v.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.filter.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.filter.name.as_deref()
    }

    pub fn zone_id(&self) -> Option<&str> {
        self.filter.zone_id.as_deref()
    }
}

impl Command for ListSecondaryStagingStoresParams {
    const NAME: &'static str = "listSecondaryStagingStores";
    type Response = ListSecondaryStagingStoresResponse;

    fn to_query(&self) -> QueryParams {
        self.filter.to_query()
    }
}

impl ListRequest for ListSecondaryStagingStoresParams {
    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn scope_zone(&mut self, zone_id: &str) -> bool {
        self.set_zone_id(zone_id);
        true
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListSecondaryStagingStoresResponse {
    pub count: usize,
    #[serde(rename = "secondarystagingstore")]
    pub secondary_staging_stores: Vec<SecondaryStagingStore>,
}

super::impl_listing!(
    ListSecondaryStagingStoresResponse,
    SecondaryStagingStore,
    secondary_staging_stores
);

// =============================================================================
// updateCloudToUseObjectStore
// =============================================================================

/// Parameters for `updateCloudToUseObjectStore`
#[derive(Debug, Clone)]
pub struct UpdateCloudToUseObjectStoreParams {
    details: Option<HashMap<String, String>>,
    name: Option<String>,
    provider: String,
    url: Option<String>,
}

impl UpdateCloudToUseObjectStoreParams {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            details: None,
            name: None,
            provider: provider.into(),
            url: None,
        }
    }

    pub fn set_details(&mut self, v: HashMap<String, String>) {
        self.details = Some(v);
    }

    pub fn set_name(&mut self, v: impl Into<String>) {
        self.name = Some(v.into());
    }

    pub fn set_provider(&mut self, v: impl Into<String>) {
        self.provider = v.into();
    }

    pub fn set_url(&mut self, v: impl Into<String>) {
        self.url = Some(v.into());
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

impl Command for UpdateCloudToUseObjectStoreParams {
    const NAME: &'static str = "updateCloudToUseObjectStore";
    type Response = UpdateCloudToUseObjectStoreResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(v) = &self.details {
            query.set_map("details", v);
        }
        if let Some(v) = &self.name {
            query.set("name", v.as_str());
        }
        query.set("provider", self.provider.as_str());
        if let Some(v) = &self.url {
            query.set("url", v.as_str());
        }
        query
    }
}

// =============================================================================
// Service
// =============================================================================

/// Image store commands
pub struct ImageStoreService<'a> {
    client: &'a CloudStackClient,
}

impl<'a> ImageStoreService<'a> {
    pub(crate) fn new(client: &'a CloudStackClient) -> Self {
        Self { client }
    }

    /// Add a backup image store
    pub async fn add_image_store(&self, params: &AddImageStoreParams) -> Result<ImageStore> {
        self.client.execute(params).await
    }

    /// Add an S3 image store
    pub async fn add_image_store_s3(&self, params: &AddImageStoreS3Params) -> Result<ImageStore> {
        self.client.execute(params).await
    }

    /// Create a secondary staging store
    pub async fn create_secondary_staging_store(
        &self,
        params: &CreateSecondaryStagingStoreParams,
    ) -> Result<SecondaryStagingStore> {
        self.client.execute(params).await
    }

    /// Delete an image store or secondary storage
    pub async fn delete_image_store(
        &self,
        params: &DeleteImageStoreParams,
    ) -> Result<DeleteImageStoreResponse> {
        self.client.execute(params).await
    }

    /// Delete a secondary staging store
    pub async fn delete_secondary_staging_store(
        &self,
        params: &DeleteSecondaryStagingStoreParams,
    ) -> Result<DeleteSecondaryStagingStoreResponse> {
        self.client.execute(params).await
    }

    /// List image stores
    pub async fn list_image_stores(
        &self,
        params: &ListImageStoresParams,
    ) -> Result<ListImageStoresResponse> {
        self.client.execute(params).await
    }

    /// List secondary staging stores
    pub async fn list_secondary_staging_stores(
        &self,
        params: &ListSecondaryStagingStoresParams,
    ) -> Result<ListSecondaryStagingStoresResponse> {
        self.client.execute(params).await
    }

    /// Migrate the current NFS secondary storage to an object store
    pub async fn update_cloud_to_use_object_store(
        &self,
        params: &UpdateCloudToUseObjectStoreParams,
    ) -> Result<ImageStore> {
        self.client.execute(params).await
    }

    // =========================================================================
    // Lookup helpers
    // =========================================================================

    pub async fn get_image_store_id(&self, name: &str, opts: &[RequestOption]) -> Result<String> {
        let mut params = ListImageStoresParams::new();
        params.set_name(name);
        lookup::resolve_id_by_name(self.client, params, name, opts).await
    }

    pub async fn get_image_store_by_name(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<ImageStore> {
        let mut params = ListImageStoresParams::new();
        params.set_name(name);
        lookup::resolve_by_name(
            self.client,
            params,
            |id| {
                let mut by_id = ListImageStoresParams::new();
                by_id.set_id(id);
                by_id
            },
            name,
            opts,
        )
        .await
    }

    pub async fn get_image_store_by_id(
        &self,
        id: &str,
        opts: &[RequestOption],
    ) -> Result<ImageStore> {
        let mut params = ListImageStoresParams::new();
        params.set_id(id);
        lookup::resolve_by_id(self.client, params, id, opts).await
    }

    pub async fn get_secondary_staging_store_id(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<String> {
        let mut params = ListSecondaryStagingStoresParams::new();
        params.set_name(name);
        lookup::resolve_id_by_name(self.client, params, name, opts).await
    }

    pub async fn get_secondary_staging_store_by_name(
        &self,
        name: &str,
        opts: &[RequestOption],
    ) -> Result<SecondaryStagingStore> {
        let mut params = ListSecondaryStagingStoresParams::new();
        params.set_name(name);
        lookup::resolve_by_name(
            self.client,
            params,
            |id| {
                let mut by_id = ListSecondaryStagingStoresParams::new();
                by_id.set_id(id);
                by_id
            },
            name,
            opts,
        )
        .await
    }

    pub async fn get_secondary_staging_store_by_id(
        &self,
        id: &str,
        opts: &[RequestOption],
    ) -> Result<SecondaryStagingStore> {
        let mut params = ListSecondaryStagingStoresParams::new();
        params.set_id(id);
        lookup::resolve_by_id(self.client, params, id, opts).await
    }
}
