//! Reading current CI state and classifying responses.
//!
//! Every call made by the design client goes through [`send`], which maps a
//! transport outcome to success (200 or 302), `RemoteRejected` (any other
//! status) or `RemoteUnreachable` (no response).

use crate::error::{DesignError, Result, TransportError};
use crate::models::CiSnapshot;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub(crate) fn classify(
    outcome: std::result::Result<HttpResponse, TransportError>,
    context: &str,
) -> Result<HttpResponse> {
    match outcome {
        Ok(response) if response.is_success() => Ok(response),
        Ok(response) => {
            tracing::warn!("Failed to {}: {}", context, response.status_line);
            Err(DesignError::RemoteRejected {
                context: context.to_string(),
                status_line: response.status_line,
                body: Some(response.body).filter(|b| !b.is_empty()),
            })
        }
        Err(source) => {
            tracing::warn!("Failed to {}: no response ({})", context, source);
            Err(DesignError::RemoteUnreachable {
                context: context.to_string(),
                source,
            })
        }
    }
}

pub(crate) async fn send(
    transport: &dyn Transport,
    request: HttpRequest,
    context: &str,
) -> Result<HttpResponse> {
    classify(transport.execute(request).await, context)
}

/// Fetch one CI snapshot.
pub(crate) async fn fetch(
    transport: &dyn Transport,
    request: HttpRequest,
    context: &str,
) -> Result<CiSnapshot> {
    let response = send(transport, request, context).await?;
    Ok(CiSnapshot::from_value(response.json()))
}

/// Fetch a collection of CI snapshots.
pub(crate) async fn fetch_list(
    transport: &dyn Transport,
    request: HttpRequest,
    context: &str,
) -> Result<Vec<CiSnapshot>> {
    let response = send(transport, request, context).await?;
    Ok(CiSnapshot::list_from_value(response.json()))
}

/// Fetch a CI that must already exist, i.e. whose snapshot carries a `ciId`.
pub(crate) async fn fetch_existing(
    transport: &dyn Transport,
    request: HttpRequest,
    kind: &'static str,
    name: &str,
) -> Result<CiSnapshot> {
    let snapshot = fetch(transport, request, &format!("get {} {}", kind, name)).await?;
    if snapshot.exists() {
        Ok(snapshot)
    } else {
        Err(DesignError::NotFound {
            kind,
            name: name.to_string(),
        })
    }
}

/// Existence probe. A rejected lookup or a snapshot without `ciId` both mean
/// "does not exist"; only a missing response is an error.
pub(crate) async fn probe(
    transport: &dyn Transport,
    request: HttpRequest,
    context: &str,
) -> Result<Option<CiSnapshot>> {
    match transport.execute(request).await {
        Ok(response) if response.is_success() => {
            let snapshot = CiSnapshot::from_value(response.json());
            Ok(snapshot.exists().then_some(snapshot))
        }
        Ok(_) => Ok(None),
        Err(source) => Err(DesignError::RemoteUnreachable {
            context: context.to_string(),
            source,
        }),
    }
}
