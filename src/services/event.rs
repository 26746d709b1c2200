//! Events
//!
//! Commands for listing, archiving and deleting events.

use super::SuccessResponse;
use crate::cloudstack::client::{CloudStackClient, Command, ListRequest, RequestOption};
use crate::cloudstack::decode::string_or_number;
use crate::cloudstack::lookup::{self, Resource};
use crate::cloudstack::query::QueryParams;
use crate::error::Result;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the API, e.g. `2024-03-01T10:15:00+0000`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

// =============================================================================
// archiveEvents / deleteEvents
// =============================================================================

/// Selection of events by id list, type or date range
#[derive(Debug, Clone, Default)]
struct EventSelection {
    end_date: Option<String>,
    ids: Option<Vec<String>>,
    start_date: Option<String>,
    event_type: Option<String>,
}

impl EventSelection {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(v) = &self.end_date {
            query.set("enddate", v.as_str());
        }
        if let Some(v) = &self.ids {
            query.set_list("ids", v);
        }
        if let Some(v) = &self.start_date {
            query.set("startdate", v.as_str());
        }
        if let Some(v) = &self.event_type {
            query.set("type", v.as_str());
        }
        query
    }
}

/// Parameters for `archiveEvents`
#[derive(Debug, Clone, Default)]
pub struct ArchiveEventsParams {
    selection: EventSelection,
}

impl ArchiveEventsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive events older than this date (`yyyy-MM-dd`)
    pub fn set_end_date(&mut self, v: impl Into<String>) {
        self.selection.end_date = Some(v.into());
    }

    pub fn set_ids(&mut self, v: Vec<String>) {
        self.selection.ids = Some(v);
    }

    /// Archive events newer than this date (`yyyy-MM-dd`)
    pub fn set_start_date(&mut self, v: impl Into<String>) {
        self.selection.start_date = Some(v.into());
    }

    pub fn set_event_type(&mut self, v: impl Into<String>) {
        self.selection.event_type = Some(v.into());
    }

    pub fn ids(&self) -> Option<&[String]> {
        self.selection.ids.as_deref()
    }
}

impl Command for ArchiveEventsParams {
    const NAME: &'static str = "archiveEvents";
    type Response = ArchiveEventsResponse;

    fn to_query(&self) -> QueryParams {
        self.selection.to_query()
    }
}

pub type ArchiveEventsResponse = SuccessResponse;

/// Parameters for `deleteEvents`
#[derive(Debug, Clone, Default)]
pub struct DeleteEventsParams {
    selection: EventSelection,
}

impl DeleteEventsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete events older than this date (`yyyy-MM-dd`)
    pub fn set_end_date(&mut self, v: impl Into<String>) {
        self.selection.end_date = Some(v.into());
    }

    pub fn set_ids(&mut self, v: Vec<String>) {
        self.selection.ids = Some(v);
    }

    /// Delete events newer than this date (`yyyy-MM-dd`)
    pub fn set_start_date(&mut self, v: impl Into<String>) {
        self.selection.start_date = Some(v.into());
    }

    pub fn set_event_type(&mut self, v: impl Into<String>) {
        self.selection.event_type = Some(v.into());
    }

    pub fn ids(&self) -> Option<&[String]> {
        self.selection.ids.as_deref()
    }
}

impl Command for DeleteEventsParams {
    const NAME: &'static str = "deleteEvents";
    type Response = DeleteEventsResponse;

    fn to_query(&self) -> QueryParams {
        self.selection.to_query()
    }
}

pub type DeleteEventsResponse = SuccessResponse;

// =============================================================================
// listEventTypes
// =============================================================================

/// Parameters for `listEventTypes` (the command takes none)
#[derive(Debug, Clone, Default)]
pub struct ListEventTypesParams;

impl ListEventTypesParams {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ListEventTypesParams {
    const NAME: &'static str = "listEventTypes";
    type Response = ListEventTypesResponse;

    fn to_query(&self) -> QueryParams {
        QueryParams::new()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListEventTypesResponse {
    pub count: usize,
    #[serde(rename = "eventtype")]
    pub event_types: Vec<EventType>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EventType {
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    pub name: String,
}

// =============================================================================
// listEvents
// =============================================================================

/// Parameters for `listEvents`
#[derive(Debug, Clone, Default)]
pub struct ListEventsParams {
    account: Option<String>,
    domain_id: Option<String>,
    duration: Option<i64>,
    end_date: Option<String>,
    entry_time: Option<i64>,
    id: Option<String>,
    is_recursive: Option<bool>,
    keyword: Option<String>,
    level: Option<String>,
    list_all: Option<bool>,
    page: Option<i64>,
    page_size: Option<i64>,
    project_id: Option<String>,
    start_date: Option<String>,
    start_id: Option<String>,
    event_type: Option<String>,
}

impl ListEventsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// List events for the account. Must be used with `set_domain_id`.
    pub fn set_account(&mut self, v: impl Into<String>) {
        self.account = Some(v.into());
    }

    pub fn set_domain_id(&mut self, v: impl Into<String>) {
        self.domain_id = Some(v.into());
    }

    /// Duration of the event in seconds
    pub fn set_duration(&mut self, v: i64) {
        self.duration = Some(v);
    }

    pub fn set_end_date(&mut self, v: impl Into<String>) {
        self.end_date = Some(v.into());
    }

    /// Time in seconds the event has been pending
    pub fn set_entry_time(&mut self, v: i64) {
        self.entry_time = Some(v);
    }

    pub fn set_id(&mut self, v: impl Into<String>) {
        self.id = Some(v.into());
    }

    pub fn set_is_recursive(&mut self, v: bool) {
        self.is_recursive = Some(v);
    }

    pub fn set_keyword(&mut self, v: impl Into<String>) {
        self.keyword = Some(v.into());
    }

    /// Event level: INFO, WARN or ERROR
    pub fn set_level(&mut self, v: impl Into<String>) {
        self.level = Some(v.into());
    }

    pub fn set_list_all(&mut self, v: bool) {
        self.list_all = Some(v);
    }

    pub fn set_page(&mut self, v: i64) {
        self.page = Some(v);
    }

    pub fn set_page_size(&mut self, v: i64) {
        self.page_size = Some(v);
    }

    pub fn set_project_id(&mut self, v: impl Into<String>) {
        self.project_id = Some(v.into());
    }

    pub fn set_start_date(&mut self, v: impl Into<String>) {
        self.start_date = Some(v.into());
    }

    /// Parent event id; lists the events of a started job
    pub fn set_start_id(&mut self, v: impl Into<String>) {
        self.start_id = Some(v.into());
    }

    pub fn set_event_type(&mut self, v: impl Into<String>) {
        self.event_type = Some(v.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }

    pub fn list_all(&self) -> Option<bool> {
        self.list_all
    }
}

impl Command for ListEventsParams {
    const NAME: &'static str = "listEvents";
    type Response = ListEventsResponse;

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(v) = &self.account {
            query.set("account", v.as_str());
        }
        if let Some(v) = &self.domain_id {
            query.set("domainid", v.as_str());
        }
        if let Some(v) = self.duration {
            query.set_int("duration", v);
        }
        if let Some(v) = &self.end_date {
            query.set("enddate", v.as_str());
        }
        if let Some(v) = self.entry_time {
            query.set_int("entrytime", v);
        }
        if let Some(v) = &self.id {
            query.set("id", v.as_str());
        }
        if let Some(v) = self.is_recursive {
            query.set_bool("isrecursive", v);
        }
        if let Some(v) = &self.keyword {
            query.set("keyword", v.as_str());
        }
        if let Some(v) = &self.level {
            query.set("level", v.as_str());
        }
        if let Some(v) = self.list_all {
            query.set_bool("listall", v);
        }
        if let Some(v) = self.page {
            query.set_int("page", v);
        }
        if let Some(v) = self.page_size {
            query.set_int("pagesize", v);
        }
        if let Some(v) = &self.project_id {
            query.set("projectid", v.as_str());
        }
        if let Some(v) = &self.start_date {
            query.set("startdate", v.as_str());
        }
        if let Some(v) = &self.start_id {
            query.set("startid", v.as_str());
        }
        if let Some(v) = &self.event_type {
            query.set("type", v.as_str());
        }
        query
    }
}

impl ListRequest for ListEventsParams {
    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn scope_project(&mut self, project_id: &str) -> bool {
        self.set_project_id(project_id);
        true
    }

    fn scope_domain(&mut self, domain_id: &str) -> bool {
        self.set_domain_id(domain_id);
        true
    }

    fn scope_list_all(&mut self, list_all: bool) -> bool {
        self.set_list_all(list_all);
        true
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListEventsResponse {
    pub count: usize,
    #[serde(rename = "event")]
    pub events: Vec<Event>,
}

super::impl_listing!(ListEventsResponse, Event, events);

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Event {
    pub account: String,
    pub created: String,
    pub description: String,
    pub domain: String,
    #[serde(rename = "domainid", deserialize_with = "string_or_number")]
    pub domain_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "jobid", deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    pub level: String,
    #[serde(rename = "parentid", deserialize_with = "string_or_number")]
    pub parent_id: String,
    pub project: String,
    #[serde(rename = "projectid", deserialize_with = "string_or_number")]
    pub project_id: String,
    pub state: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub username: String,
}

impl Event {
    /// Parse `created`, if it is set and well formed
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.created, TIMESTAMP_FORMAT).ok()
    }
}

impl Resource for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Service
// =============================================================================

/// Event commands
pub struct EventService<'a> {
    client: &'a CloudStackClient,
}

impl<'a> EventService<'a> {
    pub(crate) fn new(client: &'a CloudStackClient) -> Self {
        Self { client }
    }

    /// Archive one or more events
    pub async fn archive_events(
        &self,
        params: &ArchiveEventsParams,
    ) -> Result<ArchiveEventsResponse> {
        self.client.execute(params).await
    }

    /// Delete one or more events
    pub async fn delete_events(
        &self,
        params: &DeleteEventsParams,
    ) -> Result<DeleteEventsResponse> {
        self.client.execute(params).await
    }

    /// List event types
    pub async fn list_event_types(
        &self,
        params: &ListEventTypesParams,
    ) -> Result<ListEventTypesResponse> {
        self.client.execute(params).await
    }

    /// List events
    pub async fn list_events(&self, params: &ListEventsParams) -> Result<ListEventsResponse> {
        self.client.execute(params).await
    }

    /// Fetch the single event with this id
    pub async fn get_event_by_id(&self, id: &str, opts: &[RequestOption]) -> Result<Event> {
        let mut params = ListEventsParams::new();
        params.set_id(id);
        lookup::resolve_by_id(self.client, params, id, opts).await
    }
}
