//! Lookup helpers
//!
//! Resolve a name or id to exactly one entity by running the matching
//! listing command once. Zero results is `NotFound`, several results is
//! `Ambiguous` unless a name matches exactly.

use super::client::{CloudStackClient, Command, ListRequest, RequestOption};
use crate::error::{CloudStackError, Result};
use std::fmt::Debug;

/// A listing envelope: a count plus the returned entities
pub trait Listing: Debug {
    type Item;

    fn count(&self) -> usize;

    fn items(&self) -> &[Self::Item];

    fn into_items(self) -> Vec<Self::Item>;
}

/// An entity addressable by id
pub trait Resource {
    fn id(&self) -> &str;
}

/// An entity that also carries a name
pub trait Named: Resource {
    fn name(&self) -> &str;
}

/// Message the server returns when an id is malformed or unknown
fn invalid_id_message(id: &str) -> String {
    format!(
        "Invalid parameter id value={} due to incorrect long value format, or entity does not exist",
        id
    )
}

async fn list<P>(
    client: &CloudStackClient,
    params: &mut P,
    opts: &[RequestOption],
) -> Result<P::Response>
where
    P: Command + ListRequest,
{
    client.apply_options(params, opts)?;
    client.execute(&*params).await
}

/// Resolve a name to the id of the unique matching entity
pub async fn resolve_id_by_name<P>(
    client: &CloudStackClient,
    mut params: P,
    name: &str,
    opts: &[RequestOption],
) -> Result<String>
where
    P: Command + ListRequest,
    P::Response: Listing,
    <P::Response as Listing>::Item: Named,
{
    let listing = list(client, &mut params, opts).await?;

    match listing.count() {
        0 => Err(not_found(name, &listing)),
        1 => match listing.items().first() {
            Some(item) => Ok(item.id().to_string()),
            None => Err(not_found(name, &listing)),
        },
        count => {
            // The server may match names loosely; keep only an exact hit
            tracing::debug!(
                "{}: {} results for {:?}, scanning for exact name",
                P::NAME,
                count,
                name
            );
            listing
                .items()
                .iter()
                .find(|item| item.name() == name)
                .map(|item| item.id().to_string())
                .ok_or_else(|| CloudStackError::Ambiguous {
                    query: name.to_string(),
                    count,
                })
        },
    }
}

/// Resolve an id to the unique matching entity
pub async fn resolve_by_id<P>(
    client: &CloudStackClient,
    mut params: P,
    id: &str,
    opts: &[RequestOption],
) -> Result<<P::Response as Listing>::Item>
where
    P: Command + ListRequest,
    P::Response: Listing,
{
    let listing = match list(client, &mut params, opts).await {
        Ok(listing) => listing,
        Err(CloudStackError::Transport(err))
            if format!("{:#}", err).contains(&invalid_id_message(id)) =>
        {
            tracing::debug!(
                "{}: server rejected id {:?}, treating as not found",
                P::NAME,
                id
            );
            return Err(CloudStackError::NotFound {
                query: id.to_string(),
                response: format!("{:#}", err),
            });
        },
        Err(err) => return Err(err),
    };

    match listing.count() {
        0 => Err(not_found(id, &listing)),
        1 => {
            let rendered = format!("{:?}", listing);
            listing
                .into_items()
                .into_iter()
                .next()
                .ok_or(CloudStackError::NotFound {
                    query: id.to_string(),
                    response: rendered,
                })
        },
        count => Err(CloudStackError::Ambiguous {
            query: id.to_string(),
            count,
        }),
    }
}

/// Resolve a name to the full record: name to id, then id to record
pub async fn resolve_by_name<P, F>(
    client: &CloudStackClient,
    by_name: P,
    by_id: F,
    name: &str,
    opts: &[RequestOption],
) -> Result<<P::Response as Listing>::Item>
where
    P: Command + ListRequest,
    P::Response: Listing,
    <P::Response as Listing>::Item: Named,
    F: FnOnce(&str) -> P,
{
    let id = resolve_id_by_name(client, by_name, name, opts).await?;
    resolve_by_id(client, by_id(&id), &id, opts).await
}

fn not_found(query: &str, listing: &impl Debug) -> CloudStackError {
    CloudStackError::NotFound {
        query: query.to_string(),
        response: format!("{:?}", listing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_message_text() {
        assert_eq!(
            invalid_id_message("abc"),
            "Invalid parameter id value=abc due to incorrect long value format, or entity does not exist"
        );
    }
}
