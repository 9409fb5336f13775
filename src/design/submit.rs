//! Submitting CI mutations.
//!
//! [`mutate_ci`] is the one read-merge-submit cycle behind every create and
//! update: read a base snapshot (the CI itself, or a template for new CIs),
//! merge the caller's overrides into it, encode the record and send it.

use crate::error::{DesignError, Result};
use crate::models::{Attributes, CiRecord, CiSnapshot, Properties};
use crate::transport::{HttpRequest, Method, Transport};
use crate::wire;

use super::merge::{merge, OWNER_UNSET};
use super::reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    Create,
    Update,
    Delete,
}

impl SubmitMethod {
    pub fn http_method(&self) -> Method {
        match self {
            Self::Create => Method::Post,
            Self::Update => Method::Put,
            Self::Delete => Method::Delete,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Send a record (or nothing, for deletes) and decode the response.
pub(crate) async fn submit(
    transport: &dyn Transport,
    path: String,
    record: Option<&CiRecord>,
    method: SubmitMethod,
    context: &str,
) -> Result<CiSnapshot> {
    let mut request = HttpRequest::new(method.http_method(), path);
    if let Some(record) = record {
        let body = wire::encode_ci(record);
        tracing::debug!("Json in {}: {}", context, body);
        request = request.json(body);
    }
    let response = reader::send(transport, request, context).await?;
    Ok(CiSnapshot::from_value(response.json()))
}

/// Where the merge starts from.
pub(crate) enum Base {
    /// Read the base snapshot from the service.
    Fetch(HttpRequest),
    /// Start from a locally built snapshot.
    Seed(CiSnapshot),
}

/// Where the merged record is sent.
pub(crate) enum Target {
    Path(String),
    /// `{collection}/{ciId}`, with the id taken from the base snapshot.
    Member(String),
}

pub(crate) struct Mutation<'a> {
    pub kind: &'static str,
    pub name: &'a str,
    pub base: Base,
    pub target: Target,
    pub method: SubmitMethod,
    pub overrides: &'a Attributes,
    /// `None` submits no owner properties; neither do empty overrides.
    pub owner_tag: Option<&'a str>,
    pub properties: Properties,
    pub template_name: Option<&'a str>,
    /// Attribute keys dropped from the merged result.
    pub exclude: &'a [&'a str],
}

pub(crate) async fn mutate_ci(transport: &dyn Transport, m: Mutation<'_>) -> Result<CiSnapshot> {
    let context = format!("{} {} {}", m.method.verb(), m.kind, m.name);

    let base = match m.base {
        Base::Fetch(request) => {
            reader::fetch(transport, request, &format!("get {} {}", m.kind, m.name)).await?
        }
        Base::Seed(snapshot) => snapshot,
    };

    let path = match m.target {
        Target::Path(path) => path,
        Target::Member(collection) => {
            let ci_id = base.ci_id.as_deref().ok_or_else(|| DesignError::NotFound {
                kind: m.kind,
                name: m.name.to_string(),
            })?;
            format!("{}/{}", collection, ci_id)
        }
    };

    let merged = merge(
        &base.attributes,
        &base.owner_props,
        m.overrides,
        m.owner_tag.unwrap_or(OWNER_UNSET),
    );
    let mut attributes = merged.attributes;
    for key in m.exclude {
        attributes.remove(*key);
    }

    let record = CiRecord {
        attributes,
        owner_props: m
            .owner_tag
            .filter(|_| !m.overrides.is_empty())
            .map(|_| merged.owner_props),
        properties: m.properties,
        template_name: m.template_name.map(str::to_string),
    };
    let snapshot = submit(transport, path, Some(&record), m.method, &context).await?;
    tracing::info!("Completed {}", context);
    Ok(snapshot)
}

/// Resolve a CI's id through `lookup`, then delete `{collection}/{ciId}`.
pub(crate) async fn remove_ci(
    transport: &dyn Transport,
    lookup: HttpRequest,
    collection: String,
    kind: &'static str,
    name: &str,
) -> Result<CiSnapshot> {
    let existing = reader::fetch_existing(transport, lookup, kind, name).await?;
    let ci_id = existing.ci_id.unwrap_or_default();
    let context = format!("delete {} {}", kind, name);
    let snapshot = submit(
        transport,
        format!("{}/{}", collection, ci_id),
        None,
        SubmitMethod::Delete,
        &context,
    )
    .await?;
    tracing::info!("Completed {}", context);
    Ok(snapshot)
}
