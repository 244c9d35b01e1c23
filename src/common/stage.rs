//! Stage registration shared by the HTTP and WebSocket layers.
//!
//! A stage is a named deployment slot of an api; names are unique within
//! one api and the `$default` sentinel serves the api at its root path.

use tracing::debug;

use crate::cfn::apigatewayv2::CfnStage;
use crate::cfn::CfnResource;
use crate::common::{Api, DomainName};
use crate::construct::Stack;
use crate::errors::{Error, Result};

/// Binding of a stage to a custom domain.
#[derive(Debug, Clone)]
pub struct DomainMappingOptions {
    pub domain_name: DomainName,
    /// Path prefix under the domain; omit for the root mapping
    pub mapping_key: Option<String>,
}

/// Author-facing stage options, shared by both api kinds.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    /// Defaults to `$default`
    pub stage_name: Option<String>,
    pub auto_deploy: Option<bool>,
    pub domain_mapping: Option<DomainMappingOptions>,
}

/// Validate the name, claim it on the api, and emit the Cfn Stage record.
/// Returns the stage's scoped path.
pub(crate) fn register_stage(
    stack: &mut Stack,
    api: &dyn Api,
    id: &str,
    stage_name: &str,
    auto_deploy: Option<bool>,
) -> Result<String> {
    let path = format!("{}/{}", api.construct_path(), id);
    if stage_name.is_empty() {
        return Err(Error::invalid_input_at(path, "stage name must not be empty"));
    }
    if stage_name != "$default" && !stage_name.chars().all(|c| c.is_ascii_alphanumeric() || "-_".contains(c)) {
        return Err(Error::invalid_input_at(
            path,
            format!("stage name '{}' must be alphanumeric, '-' or '_', or the literal '$default'", stage_name),
        ));
    }

    let state = &mut stack.apis[api.state_index()];
    if !state.stage_names.insert(stage_name.to_string()) {
        return Err(Error::invariant_at(
            api.construct_path(),
            format!("a stage named '{}' already exists on this api", stage_name),
        ));
    }

    let resource = CfnResource::Stage(CfnStage {
        api_id: api.api_id().into(),
        stage_name: stage_name.into(),
        auto_deploy,
        description: None,
    });
    stack.add_resource(&path, resource)?;
    debug!(construct_path = %path, stage_name, "created stage");
    Ok(path)
}
