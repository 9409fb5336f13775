//! Resource paths for one assembly's design.
//!
//! Every function validates its names before building anything, so a bad
//! name never reaches the network.

use crate::error::{require, DesignError, Result};
use crate::models::VariableScope;

const ASSEMBLY_URI: &str = "assemblies/";

/// The assembly a client session edits. Built once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignContext {
    assembly: String,
    design_uri: String,
    release_uri: String,
}

impl DesignContext {
    pub fn new(assembly: impl Into<String>) -> Result<Self> {
        let assembly = assembly.into();
        if assembly.is_empty() {
            return Err(DesignError::missing("assembly name"));
        }
        Ok(Self {
            design_uri: format!("{}{}/design/", ASSEMBLY_URI, assembly),
            release_uri: format!("{}{}/design/releases/", ASSEMBLY_URI, assembly),
            assembly,
        })
    }

    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    /// `.../design/`
    pub fn design_uri(&self) -> &str {
        &self.design_uri
    }

    /// `.../design/releases/`
    pub fn release_uri(&self) -> &str {
        &self.release_uri
    }

    // ============================================================
    // Platforms
    // ============================================================

    pub fn platform_list(&self) -> String {
        format!("{}platforms", self.design_uri)
    }

    pub fn platform_collection(&self) -> String {
        format!("{}platforms/", self.design_uri)
    }

    pub fn platform(&self, platform: &str) -> Result<String> {
        let platform = require(platform, "platform name")?;
        Ok(format!("{}platforms/{}", self.design_uri, platform))
    }

    // ============================================================
    // Components
    // ============================================================

    pub fn component_list(&self, platform: &str) -> Result<String> {
        Ok(format!("{}/components", self.platform(platform)?))
    }

    pub fn component_collection(&self, platform: &str) -> Result<String> {
        Ok(format!("{}/components/", self.platform(platform)?))
    }

    pub fn component_template(&self, platform: &str) -> Result<String> {
        Ok(format!("{}/components/new.json", self.platform(platform)?))
    }

    /// Accepts either the component name or its `ciId`.
    pub fn component(&self, platform: &str, component: &str) -> Result<String> {
        let component = require(component, "component name")?;
        Ok(format!("{}/components/{}", self.platform(platform)?, component))
    }

    // ============================================================
    // Attachments
    // ============================================================

    pub fn attachment_list(&self, platform: &str, component_id: &str) -> Result<String> {
        Ok(format!(
            "{}/attachments.json",
            self.component(platform, component_id)?
        ))
    }

    pub fn attachment_collection(&self, platform: &str, component_id: &str) -> Result<String> {
        Ok(format!("{}/attachments", self.component(platform, component_id)?))
    }

    pub fn attachment_template(&self, platform: &str, component_id: &str) -> Result<String> {
        self.attachment_named(platform, component_id, "new")
    }

    pub fn attachment_named(
        &self,
        platform: &str,
        component_id: &str,
        attachment: &str,
    ) -> Result<String> {
        let attachment = require(attachment, "attachment name")?;
        Ok(format!(
            "{}/attachments/{}.json",
            self.component(platform, component_id)?,
            attachment
        ))
    }

    pub fn attachment(
        &self,
        platform: &str,
        component_id: &str,
        attachment_id: &str,
    ) -> Result<String> {
        let attachment_id = require(attachment_id, "attachment id")?;
        Ok(format!(
            "{}/attachments/{}",
            self.component(platform, component_id)?,
            attachment_id
        ))
    }

    // ============================================================
    // Variables
    // ============================================================

    /// `platforms/{name}/variables` or `variables`.
    pub fn variable_list(&self, scope: &VariableScope) -> Result<String> {
        match scope {
            VariableScope::Platform(platform) => {
                Ok(format!("{}/variables", self.platform(platform)?))
            }
            VariableScope::Global => Ok(format!("{}variables", self.design_uri)),
        }
    }

    /// Accepts either the variable name or its `ciId`.
    pub fn variable(&self, scope: &VariableScope, variable: &str) -> Result<String> {
        let variable = require(variable, "variable name")?;
        Ok(format!("{}/{}", self.variable_list(scope)?, variable))
    }

    pub fn variable_template(&self, scope: &VariableScope) -> Result<String> {
        Ok(format!("{}/new.json", self.variable_list(scope)?))
    }

    // ============================================================
    // Design-wide
    // ============================================================

    pub fn extract_yaml(&self) -> String {
        format!("{}extract.yaml", self.design_uri)
    }

    pub fn load(&self) -> String {
        format!("{}load", self.design_uri)
    }

    pub fn latest_release(&self) -> String {
        format!("{}latest", self.release_uri)
    }

    pub fn release_commit(&self, release_id: i64) -> String {
        format!("{}{}/commit", self.release_uri, release_id)
    }
}
