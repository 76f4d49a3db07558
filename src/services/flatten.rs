//! Asset tree flattening.
//!
//! Expands a hierarchical folder/version-stack structure into the flat,
//! ordered list of transferable files the orchestrator consumes. The
//! traversal is pre-order depth-first over an explicit worklist rather
//! than call-stack recursion, so arbitrarily deep trees cannot overflow
//! the stack. Sibling order is whatever the source API returns; that
//! order is the positional contract the orchestrator relies on.

use crate::models::{AssetNode, ExportEntry};
use crate::services::FrameIoClient;
use crate::{Error, Result};

/// Depth mode that restarts the flatten at the enclosing project root.
pub const DEPTH_PROJECT: &str = "project";

/// One step of pending traversal work.
enum Work {
    /// Fetch the listing at `path` and visit each node under `prefix`.
    Fetch { path: String, prefix: String },
    /// Visit a single already-fetched node.
    Visit { node: AssetNode, prefix: String },
}

/// Flatten the asset tree at `path` into transfer-ready entries.
///
/// `depth` is interpreted only here, on the top-level call: `"project"`
/// resolves the enclosing project of the first asset at `path` and
/// restarts the flatten at the project root, with the project name as
/// the path prefix. Child traversal never sees the depth mode.
pub async fn flatten(
    client: &FrameIoClient,
    path: &str,
    prefix: &str,
    depth: &str,
) -> Result<Vec<ExportEntry>> {
    if depth == DEPTH_PROJECT {
        let nodes = client.get_assets(path).await?;
        let Some(first) = nodes.into_iter().next() else {
            return Ok(Vec::new());
        };
        let project = first
            .project
            .ok_or_else(|| Error::traversal(path, "asset carries no project record"))?;

        tracing::debug!(
            project = %project.name,
            root = %project.root_asset_id,
            "Restarting flatten at project root"
        );
        return flatten_tree(
            client,
            &format!("{}/children", project.root_asset_id),
            &format!("{}/", project.name),
        )
        .await;
    }

    flatten_tree(client, path, prefix).await
}

async fn flatten_tree(
    client: &FrameIoClient,
    root_path: &str,
    root_prefix: &str,
) -> Result<Vec<ExportEntry>> {
    let mut entries = Vec::new();
    let mut work = vec![Work::Fetch {
        path: root_path.to_string(),
        prefix: root_prefix.to_string(),
    }];

    while let Some(item) = work.pop() {
        match item {
            Work::Fetch { path, prefix } => {
                let nodes = client.get_assets(&path).await?;
                // Push in reverse so pop order preserves sibling order.
                for node in nodes.into_iter().rev() {
                    work.push(Work::Visit {
                        node,
                        prefix: prefix.clone(),
                    });
                }
            }
            Work::Visit { node, prefix } => match node.kind.as_str() {
                "folder" | "version_stack" => {
                    work.push(Work::Fetch {
                        path: format!("{}/children", node.id),
                        prefix: format!("{}{}/", prefix, node.name),
                    });
                }
                "file" => {
                    let name = format!("{}{}", prefix, node.name);
                    let url = node.original.ok_or_else(|| {
                        Error::traversal(name.clone(), "file asset has no download URL")
                    })?;
                    entries.push(ExportEntry {
                        url,
                        name,
                        filesize: node.filesize.unwrap_or(0),
                    });
                }
                other => {
                    return Err(Error::traversal(
                        format!("{}{}", prefix, node.name),
                        format!("unknown asset type '{}'", other),
                    ));
                }
            },
        }
    }

    tracing::debug!(files = entries.len(), path = %root_path, "Flattened asset tree");
    Ok(entries)
}
