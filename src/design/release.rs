//! Committing the open design release.
//!
//! One query, then at most one commit. Nothing here waits for the commit to
//! finish on the server side.

use crate::error::{DesignError, Result};
use crate::models::{CommitOutcome, Release, ReleaseState};
use crate::transport::{HttpRequest, Transport};

use super::paths::DesignContext;
use super::reader;

pub(crate) async fn commit_open_release(
    transport: &dyn Transport,
    ctx: &DesignContext,
) -> Result<CommitOutcome> {
    let response = reader::send(
        transport,
        HttpRequest::get(ctx.latest_release()),
        "get latest release details",
    )
    .await?;
    let latest = Release::from_value(response.json());

    if latest.release_state != ReleaseState::Open {
        tracing::info!(
            "No open release for {} (state {:?}), nothing to commit",
            ctx.assembly(),
            latest.release_state.as_str()
        );
        return Ok(CommitOutcome::NothingToCommit(latest));
    }

    let release_id = latest
        .release_id
        .ok_or_else(|| DesignError::RemoteRejected {
            context: "commit design".to_string(),
            status_line: "open release has no releaseId".to_string(),
            body: Some(latest.raw.to_string()),
        })?;

    let response = reader::send(
        transport,
        HttpRequest::post(ctx.release_commit(release_id)),
        "commit design",
    )
    .await?;
    tracing::info!("Committed release {} of {}", release_id, ctx.assembly());
    Ok(CommitOutcome::Committed(Release::from_value(response.json())))
}
