//! Design client: platforms, components, attachments, variables and releases
//! of one assembly.
//!
//! Every mutation re-reads the current server state, merges the caller's
//! changes into it and submits the result. Nothing is cached between calls.

mod components;
mod merge;
mod paths;
mod reader;
mod release;
mod submit;
mod variables;

pub use merge::{merge, Merged, OWNER_DESIGN, OWNER_UNSET};
pub use paths::DesignContext;
pub use submit::SubmitMethod;

use std::sync::Arc;

use serde_json::Value;

use crate::error::{require, Result};
use crate::models::*;
use crate::transport::{HttpRequest, Transport};

use submit::{mutate_ci, submit, Base, Mutation, Target};

/// Client for one assembly's design.
#[derive(Clone)]
pub struct Design {
    ctx: DesignContext,
    transport: Arc<dyn Transport>,
}

impl Design {
    pub fn new(assembly: impl Into<String>, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            ctx: DesignContext::new(assembly)?,
            transport,
        })
    }

    pub fn context(&self) -> &DesignContext {
        &self.ctx
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    // ============================================================
    // Platforms
    // ============================================================

    pub async fn get_platform(&self, platform: &str) -> Result<CiSnapshot> {
        let path = self.ctx.platform(platform)?;
        reader::fetch(
            self.transport(),
            HttpRequest::get(path),
            &format!("get platform {}", platform),
        )
        .await
    }

    pub async fn list_platforms(&self) -> Result<Vec<CiSnapshot>> {
        reader::fetch_list(
            self.transport(),
            HttpRequest::get(self.ctx.platform_list()),
            "get list of platforms",
        )
        .await
    }

    /// Create a platform from a pack.
    ///
    /// Pack name, version and source are mandatory. Only `description` is
    /// recorded as owned by the client.
    pub async fn create_platform(
        &self,
        platform: &str,
        pack: &PlatformPack,
        comments: Option<&str>,
        description: Option<&str>,
    ) -> Result<CiSnapshot> {
        require(platform, "platform name to create platform")?;
        require(&pack.name, "pack name to create platform")?;
        require(&pack.version, "pack version to create platform")?;
        require(&pack.source, "pack source to create platform")?;

        let seed = CiSnapshot {
            attributes: Attributes::from([
                ("pack".to_string(), pack.name.clone()),
                ("version".to_string(), pack.version.clone()),
                ("source".to_string(), pack.source.clone()),
                ("major_version".to_string(), "1".to_string()),
            ]),
            ..CiSnapshot::default()
        };
        let overrides = Attributes::from([(
            "description".to_string(),
            description.unwrap_or_default().to_string(),
        )]);
        let mut properties = Properties::from([("ciName".to_string(), platform.to_string())]);
        if let Some(comments) = comments {
            properties.insert("comments".to_string(), comments.to_string());
        }

        mutate_ci(
            self.transport(),
            Mutation {
                kind: "platform",
                name: platform,
                base: Base::Seed(seed),
                target: Target::Path(self.ctx.platform_collection()),
                method: SubmitMethod::Create,
                overrides: &overrides,
                owner_tag: Some(OWNER_UNSET),
                properties,
                template_name: None,
                exclude: &[],
            },
        )
        .await
    }

    pub async fn delete_platform(&self, platform: &str) -> Result<CiSnapshot> {
        let path = self.ctx.platform(platform)?;
        let context = format!("delete platform {}", platform);
        let snapshot = submit(self.transport(), path, None, SubmitMethod::Delete, &context).await?;
        tracing::info!("Completed {}", context);
        Ok(snapshot)
    }

    // ============================================================
    // Releases
    // ============================================================

    /// Commit the latest release if it is open; otherwise report it unchanged.
    pub async fn commit_design(&self) -> Result<CommitOutcome> {
        release::commit_open_release(self.transport(), &self.ctx).await
    }

    // ============================================================
    // Bulk design
    // ============================================================

    /// The whole design as YAML text.
    pub async fn extract_yaml(&self) -> Result<String> {
        let response = reader::send(
            self.transport(),
            HttpRequest::get(self.ctx.extract_yaml()),
            "extract yaml content",
        )
        .await?;
        Ok(response.body)
    }

    /// Load platforms from YAML or JSON content.
    pub async fn load_design(&self, content: &str) -> Result<Value> {
        require(content, "input file content")?;
        let request = HttpRequest::put(self.ctx.load())
            .form(vec![("data".to_string(), content.to_string())]);
        let response = reader::send(self.transport(), request, "load yaml content").await?;
        tracing::info!("Loaded design content into {}", self.ctx.assembly());
        Ok(response.json())
    }
}
