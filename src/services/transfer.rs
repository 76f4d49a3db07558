//! Transfer orchestration.
//!
//! Export: flatten the asset tree, start one upload task per entry (no
//! concurrency cap), settle them all, and report per-entry outcomes in
//! the entries' original order. A failed upload is recorded in its
//! slot, never retried, and never aborts its siblings.
//!
//! Import: a single logical unit of work. The signed-URL issuance and
//! the destination-folder resolution run concurrently; either failure
//! aborts the whole import before any asset is created.

use std::sync::Arc;

use futures::future::join_all;

use crate::config::ActionsConfig;
use crate::models::{AssetNode, ImportReport, TransferOutcome, TransferReport};
use crate::services::{flatten, B2Client, FrameIoClient};
use crate::{Error, Result};

#[derive(Clone)]
pub struct TransferService {
    frameio: Arc<FrameIoClient>,
    b2: Arc<B2Client>,
    actions: ActionsConfig,
}

impl TransferService {
    pub fn new(frameio: Arc<FrameIoClient>, b2: Arc<B2Client>, actions: ActionsConfig) -> Self {
        Self {
            frameio,
            b2,
            actions,
        }
    }

    /// Export every file under `resource_id` to storage.
    ///
    /// The report list has exactly one element per flattened entry, at
    /// the entry's index, whether the transfer succeeded or not.
    pub async fn export_files(&self, resource_id: &str, depth: &str) -> Result<Vec<TransferReport>> {
        let entries = flatten::flatten(&self.frameio, resource_id, "", depth).await?;
        tracing::info!(
            resource = %resource_id,
            files = entries.len(),
            "Starting export fan-out"
        );

        let conn = self.b2.connect().await?;

        let uploads = entries.iter().map(|entry| {
            let conn = &conn;
            async move {
                match self
                    .b2
                    .stream_upload(conn, &entry.url, &entry.name, entry.filesize)
                    .await
                {
                    Ok(value) => TransferOutcome::Fulfilled { value },
                    Err(err) => {
                        tracing::warn!(name = %entry.name, error = %err, "Transfer failed");
                        TransferOutcome::Rejected {
                            reason: err.to_string(),
                        }
                    }
                }
            }
        });

        // join_all preserves input order, which carries the positional
        // entry/outcome correspondence through the barrier.
        let outcomes = join_all(uploads).await;

        let failed = outcomes.iter().filter(|o| !o.is_fulfilled()).count();
        if failed > 0 {
            tracing::warn!(failed, total = outcomes.len(), "Export finished with failures");
        } else {
            tracing::info!(total = outcomes.len(), "Export finished");
        }

        Ok(entries
            .into_iter()
            .zip(outcomes)
            .map(|(entry, outcome)| TransferReport {
                url: entry.url,
                name: entry.name,
                filesize: entry.filesize,
                outcome,
            })
            .collect())
    }

    /// Import one storage object into the remote system.
    pub async fn import_file(
        &self,
        resource_id: &str,
        b2path: &str,
        filesize: u64,
    ) -> Result<ImportReport> {
        tracing::info!(resource = %resource_id, b2path = %b2path, "Starting import");

        let conn = self.b2.connect().await?;

        // Both branches run to completion; failures are observed after
        // the join and abort the import before any asset is created.
        let (url_result, folder_result) = tokio::join!(
            self.b2.signed_download_url(&conn, b2path),
            self.resolve_destination_folder(resource_id)
        );
        let signed_url = url_result?;
        let folder = folder_result?;

        let name = derive_destination_name(b2path, &self.actions.upload_path);
        let asset = self
            .frameio
            .create_asset(&folder.id, name, &signed_url, filesize)
            .await?;

        tracing::info!(b2path = %b2path, name = %name, "Import finished");

        Ok(ImportReport {
            b2path: b2path.to_string(),
            filesize,
            asset,
        })
    }

    /// Resolve the project root of `resource_id` and create the import
    /// destination folder under it.
    async fn resolve_destination_folder(&self, resource_id: &str) -> Result<AssetNode> {
        let nodes = self.frameio.get_assets(resource_id).await?;
        let first = nodes
            .into_iter()
            .next()
            .ok_or_else(|| Error::Import(format!("no asset found for resource {}", resource_id)))?;
        let project = first.project.ok_or_else(|| {
            Error::Import(format!("resource {} carries no project record", resource_id))
        })?;

        self.frameio
            .create_folder(&project.root_asset_id, &self.actions.download_path)
            .await
    }
}

/// Derive the destination file name from a storage path by stripping
/// the configured upload-path prefix and any leading separator.
fn derive_destination_name<'a>(b2path: &'a str, upload_path: &str) -> &'a str {
    b2path
        .strip_prefix(upload_path)
        .unwrap_or(b2path)
        .trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_name_strips_upload_prefix() {
        assert_eq!(
            derive_destination_name("exports/foo/bar.mov", "exports/"),
            "foo/bar.mov"
        );
    }

    #[test]
    fn destination_name_strips_leading_separator() {
        assert_eq!(
            derive_destination_name("exports/foo.mov", "exports"),
            "foo.mov"
        );
    }

    #[test]
    fn destination_name_without_prefix_is_unchanged() {
        assert_eq!(
            derive_destination_name("other/foo.mov", "exports/"),
            "other/foo.mov"
        );
    }
}
