//! Request options
//!
//! Options scope listing requests before they run, e.g. to a project or
//! zone. They are applied in order and the first failure aborts the call.

use super::auth::is_id;
use super::client::{CloudStackClient, ListRequest, RequestOption};
use crate::error::CloudStackError;
use std::sync::Arc;

fn require_id(kind: &str, value: &str) -> Result<(), CloudStackError> {
    if is_id(value) {
        Ok(())
    } else {
        Err(CloudStackError::InvalidArgument(format!(
            "{} must be a UUID or numeric id, got {:?}",
            kind, value
        )))
    }
}

/// Scope the request to a project, when the command supports it
pub fn with_project(project_id: impl Into<String>) -> RequestOption {
    let project_id = project_id.into();
    Arc::new(move |_: &CloudStackClient, request: &mut dyn ListRequest| {
        if project_id.is_empty() {
            return Ok(());
        }
        require_id("project id", &project_id)?;
        if !request.scope_project(&project_id) {
            tracing::trace!("{} has no projectid parameter", request.command());
        }
        Ok(())
    })
}

/// Scope the request to a domain, when the command supports it
pub fn with_domain(domain_id: impl Into<String>) -> RequestOption {
    let domain_id = domain_id.into();
    Arc::new(move |_: &CloudStackClient, request: &mut dyn ListRequest| {
        if domain_id.is_empty() {
            return Ok(());
        }
        require_id("domain id", &domain_id)?;
        if !request.scope_domain(&domain_id) {
            tracing::trace!("{} has no domainid parameter", request.command());
        }
        Ok(())
    })
}

/// Scope the request to a zone, when the command supports it
pub fn with_zone(zone_id: impl Into<String>) -> RequestOption {
    let zone_id = zone_id.into();
    Arc::new(move |_: &CloudStackClient, request: &mut dyn ListRequest| {
        if zone_id.is_empty() {
            return Ok(());
        }
        require_id("zone id", &zone_id)?;
        if !request.scope_zone(&zone_id) {
            tracing::trace!("{} has no zoneid parameter", request.command());
        }
        Ok(())
    })
}

/// Ask for resources of all accounts the caller can see
pub fn with_list_all(list_all: bool) -> RequestOption {
    Arc::new(move |_: &CloudStackClient, request: &mut dyn ListRequest| {
        if !request.scope_list_all(list_all) {
            tracing::trace!("{} has no listall parameter", request.command());
        }
        Ok(())
    })
}
