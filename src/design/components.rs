use crate::error::{require, DesignError, Result};
use crate::models::*;
use crate::transport::HttpRequest;

use super::merge::{OWNER_DESIGN, OWNER_UNSET};
use super::reader;
use super::submit::{mutate_ci, remove_ci, Base, Mutation, SubmitMethod, Target};
use super::Design;

/// Properties sent when instantiating a component or attachment.
fn new_ci_properties(unique_name: &str) -> Properties {
    Properties::from([
        ("ciName".to_string(), unique_name.to_string()),
        ("rfcAction".to_string(), "add".to_string()),
    ])
}

impl Design {
    // ============================================================
    // Components
    // ============================================================

    pub async fn list_platform_components(&self, platform: &str) -> Result<Vec<CiSnapshot>> {
        let path = self.ctx.component_list(platform)?;
        reader::fetch_list(
            self.transport(),
            HttpRequest::get(path),
            &format!("get list of platform {} components", platform),
        )
        .await
    }

    pub async fn get_platform_component(
        &self,
        platform: &str,
        component: &str,
    ) -> Result<CiSnapshot> {
        let path = self.ctx.component(platform, component)?;
        reader::fetch(
            self.transport(),
            HttpRequest::get(path),
            &format!("get platform component {}", component),
        )
        .await
    }

    /// Instantiate `template` as a new component named `unique_name`.
    pub async fn add_platform_component(
        &self,
        platform: &str,
        template: &str,
        unique_name: &str,
        attributes: &Attributes,
    ) -> Result<CiSnapshot> {
        let template_path = self.ctx.component_template(platform)?;
        require(template, "component template name")?;
        require(unique_name, "component unique name")?;

        mutate_ci(
            self.transport(),
            Mutation {
                kind: "component",
                name: unique_name,
                base: Base::Fetch(HttpRequest::get(template_path).query("template_name", template)),
                target: Target::Path(self.ctx.component_collection(platform)?),
                method: SubmitMethod::Create,
                overrides: attributes,
                owner_tag: Some(OWNER_DESIGN),
                properties: new_ci_properties(unique_name),
                template_name: Some(template),
                exclude: &[],
            },
        )
        .await
    }

    /// Update attributes of an existing component. `attributes` must not be empty.
    pub async fn update_platform_component(
        &self,
        platform: &str,
        component: &str,
        attributes: &Attributes,
    ) -> Result<CiSnapshot> {
        let lookup = self.ctx.component(platform, component)?;
        if attributes.is_empty() {
            return Err(DesignError::missing("attributes list to be updated"));
        }

        mutate_ci(
            self.transport(),
            Mutation {
                kind: "component",
                name: component,
                base: Base::Fetch(HttpRequest::get(lookup)),
                target: Target::Member(self.ctx.component_list(platform)?),
                method: SubmitMethod::Update,
                overrides: attributes,
                owner_tag: Some(OWNER_DESIGN),
                properties: Properties::new(),
                template_name: None,
                exclude: &[],
            },
        )
        .await
    }

    pub async fn delete_platform_component(
        &self,
        platform: &str,
        component: &str,
    ) -> Result<CiSnapshot> {
        let lookup = self.ctx.component(platform, component)?;
        remove_ci(
            self.transport(),
            HttpRequest::get(lookup),
            self.ctx.component_list(platform)?,
            "component",
            component,
        )
        .await
    }

    /// Resolve a component's `ciId`.
    async fn component_id(&self, platform: &str, component: &str) -> Result<String> {
        let path = self.ctx.component(platform, component)?;
        let snapshot =
            reader::fetch_existing(self.transport(), HttpRequest::get(path), "component", component)
                .await?;
        Ok(snapshot.ci_id.unwrap_or_default())
    }

    // ============================================================
    // Attachments
    // ============================================================

    pub async fn list_platform_component_attachments(
        &self,
        platform: &str,
        component: &str,
    ) -> Result<Vec<CiSnapshot>> {
        self.ctx.component(platform, component)?;
        let component_id = self.component_id(platform, component).await?;
        reader::fetch_list(
            self.transport(),
            HttpRequest::get(self.ctx.attachment_list(platform, &component_id)?),
            &format!("get attachments of component {}", component),
        )
        .await
    }

    pub async fn get_platform_component_attachment(
        &self,
        platform: &str,
        component: &str,
        attachment: &str,
    ) -> Result<CiSnapshot> {
        self.ctx.component(platform, component)?;
        require(attachment, "attachment name")?;
        let component_id = self.component_id(platform, component).await?;
        reader::fetch(
            self.transport(),
            HttpRequest::get(self.ctx.attachment_named(platform, &component_id, attachment)?),
            &format!("get attachment {}", attachment),
        )
        .await
    }

    /// Add an attachment named `unique_name` to a component.
    pub async fn add_platform_component_attachment(
        &self,
        platform: &str,
        component: &str,
        unique_name: &str,
        attributes: &Attributes,
    ) -> Result<CiSnapshot> {
        self.ctx.component(platform, component)?;
        require(unique_name, "attachment name")?;
        let component_id = self.component_id(platform, component).await?;
        let template_path = self.ctx.attachment_template(platform, &component_id)?;

        mutate_ci(
            self.transport(),
            Mutation {
                kind: "attachment",
                name: unique_name,
                base: Base::Fetch(
                    HttpRequest::get(template_path).query("template_name", component),
                ),
                target: Target::Path(self.ctx.attachment_collection(platform, &component_id)?),
                method: SubmitMethod::Create,
                overrides: attributes,
                owner_tag: Some(OWNER_UNSET),
                properties: new_ci_properties(unique_name),
                template_name: Some(component),
                exclude: &[],
            },
        )
        .await
    }

    pub async fn update_platform_component_attachment(
        &self,
        platform: &str,
        component: &str,
        unique_name: &str,
        attributes: &Attributes,
    ) -> Result<CiSnapshot> {
        self.ctx.component(platform, component)?;
        require(unique_name, "attachment name")?;
        let component_id = self.component_id(platform, component).await?;
        let lookup = self.ctx.attachment_named(platform, &component_id, unique_name)?;

        mutate_ci(
            self.transport(),
            Mutation {
                kind: "attachment",
                name: unique_name,
                base: Base::Fetch(HttpRequest::get(lookup).query("template_name", component)),
                target: Target::Member(self.ctx.attachment_collection(platform, &component_id)?),
                method: SubmitMethod::Update,
                overrides: attributes,
                owner_tag: Some(OWNER_UNSET),
                // The service expects the same properties as for creation.
                properties: new_ci_properties(unique_name),
                template_name: Some(component),
                exclude: &[],
            },
        )
        .await
    }
}
