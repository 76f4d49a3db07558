//! Frame.io asset models

use serde::Deserialize;

/// One remote entity in the Frame.io asset tree.
///
/// Fetched on demand during traversal, never mutated, never cached
/// across requests. `kind` stays a raw string so an unrecognized type
/// can be reported verbatim in the traversal error.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub filesize: Option<u64>,
    /// Download locator for `file` assets; absent on folders and stacks.
    pub original: Option<String>,
    /// Present on assets that carry their enclosing project record.
    pub project: Option<ProjectRef>,
}

/// The enclosing project record on an asset node.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub root_asset_id: String,
    pub name: String,
}

/// The inbound custom-action callback body.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    pub data: Option<super::FormState>,
    pub resource: ResourceRef,
    pub filesize: Option<u64>,
}

/// The asset (or project context) the action was triggered on.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}
