//! Platform and global variables.
//!
//! Batch operations run one full read-merge-submit cycle per entry, in key
//! order, and stop at the first failure. Entries already applied stay applied.

use crate::error::{require, DesignError, Result};
use crate::models::*;
use crate::transport::HttpRequest;

use super::reader;
use super::submit::{mutate_ci, remove_ci, Base, Mutation, SubmitMethod, Target};
use super::Design;

impl Design {
    // ============================================================
    // Platform variables
    // ============================================================

    pub async fn list_platform_variables(&self, platform: &str) -> Result<Vec<CiSnapshot>> {
        self.list_variables(&VariableScope::platform(platform)).await
    }

    /// Create each variable on the platform. Fails on the first one that
    /// already exists.
    pub async fn add_platform_variables(
        &self,
        platform: &str,
        variables: &Attributes,
        secure: bool,
    ) -> Result<Vec<CiSnapshot>> {
        self.add_variables(&VariableScope::platform(platform), variables, secure)
            .await
    }

    /// Update each existing platform variable. Never creates missing ones.
    pub async fn update_platform_variables(
        &self,
        platform: &str,
        variables: &Attributes,
        secure: bool,
    ) -> Result<Vec<CiSnapshot>> {
        self.update_variables(&VariableScope::platform(platform), variables, secure)
            .await
    }

    pub async fn delete_platform_variable(
        &self,
        platform: &str,
        variable: &str,
    ) -> Result<CiSnapshot> {
        self.delete_variable(&VariableScope::platform(platform), variable)
            .await
    }

    // ============================================================
    // Global variables
    // ============================================================

    pub async fn list_global_variables(&self) -> Result<Vec<CiSnapshot>> {
        self.list_variables(&VariableScope::Global).await
    }

    pub async fn add_global_variables(
        &self,
        variables: &Attributes,
        secure: bool,
    ) -> Result<Vec<CiSnapshot>> {
        self.add_variables(&VariableScope::Global, variables, secure)
            .await
    }

    pub async fn update_global_variables(
        &self,
        variables: &Attributes,
        secure: bool,
    ) -> Result<Vec<CiSnapshot>> {
        self.update_variables(&VariableScope::Global, variables, secure)
            .await
    }

    pub async fn delete_global_variable(&self, variable: &str) -> Result<CiSnapshot> {
        self.delete_variable(&VariableScope::Global, variable).await
    }

    // ============================================================
    // Scope-generic
    // ============================================================

    pub async fn list_variables(&self, scope: &VariableScope) -> Result<Vec<CiSnapshot>> {
        let path = self.ctx.variable_list(scope)?;
        reader::fetch_list(
            self.transport(),
            HttpRequest::get(path),
            &format!("get list of {} variables", scope),
        )
        .await
    }

    pub async fn add_variables(
        &self,
        scope: &VariableScope,
        variables: &Attributes,
        secure: bool,
    ) -> Result<Vec<CiSnapshot>> {
        let collection = self.check_batch(scope, variables, "added")?;
        let template = self.ctx.variable_template(scope)?;

        let mut created = Vec::with_capacity(variables.len());
        for (name, value) in variables {
            let lookup = self.ctx.variable(scope, name)?;
            let probe_context = format!("get {} {}", scope.kind(), name);
            if reader::probe(self.transport(), HttpRequest::get(lookup), &probe_context)
                .await?
                .is_some()
            {
                return Err(DesignError::AlreadyExists {
                    kind: scope.kind(),
                    name: name.clone(),
                });
            }

            let content = VariableContent::new(value, secure);
            let overrides = content.overrides();
            let exclude = [content.excluded_key()];
            let snapshot = mutate_ci(
                self.transport(),
                Mutation {
                    kind: scope.kind(),
                    name,
                    base: Base::Fetch(HttpRequest::get(template.clone())),
                    target: Target::Path(collection.clone()),
                    method: SubmitMethod::Create,
                    overrides: &overrides,
                    owner_tag: None,
                    properties: Properties::from([("ciName".to_string(), name.clone())]),
                    template_name: None,
                    exclude: &exclude,
                },
            )
            .await?;
            created.push(snapshot);
        }
        Ok(created)
    }

    pub async fn update_variables(
        &self,
        scope: &VariableScope,
        variables: &Attributes,
        secure: bool,
    ) -> Result<Vec<CiSnapshot>> {
        let collection = self.check_batch(scope, variables, "updated")?;

        let mut updated = Vec::with_capacity(variables.len());
        for (name, value) in variables {
            let lookup = self.ctx.variable(scope, name)?;
            let content = VariableContent::new(value, secure);
            let overrides = content.overrides();
            let exclude = [content.excluded_key()];
            let snapshot = mutate_ci(
                self.transport(),
                Mutation {
                    kind: scope.kind(),
                    name,
                    base: Base::Fetch(HttpRequest::get(lookup)),
                    target: Target::Member(collection.clone()),
                    method: SubmitMethod::Update,
                    overrides: &overrides,
                    owner_tag: None,
                    properties: Properties::new(),
                    template_name: None,
                    exclude: &exclude,
                },
            )
            .await?;
            updated.push(snapshot);
        }
        Ok(updated)
    }

    pub async fn delete_variable(
        &self,
        scope: &VariableScope,
        variable: &str,
    ) -> Result<CiSnapshot> {
        let lookup = self.ctx.variable(scope, variable)?;
        remove_ci(
            self.transport(),
            HttpRequest::get(lookup),
            self.ctx.variable_list(scope)?,
            scope.kind(),
            variable,
        )
        .await
    }

    /// Validate a whole batch before the first call goes out. Returns the
    /// scope's variable collection path.
    fn check_batch(
        &self,
        scope: &VariableScope,
        variables: &Attributes,
        action: &str,
    ) -> Result<String> {
        let collection = self.ctx.variable_list(scope)?;
        if variables.is_empty() {
            return Err(DesignError::missing(&format!(
                "variables list to be {}",
                action
            )));
        }
        for name in variables.keys() {
            require(name, "variable name")?;
        }
        Ok(collection)
    }
}
