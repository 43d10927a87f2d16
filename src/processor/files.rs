//! Workflow file discovery and I/O

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::processor::error::{ProcessError, io_err};

/// Collect `.yml`/`.yaml` files under `dir`, recursively, sorted by path
pub async fn collect_workflow_files(dir: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    let metadata = tokio::fs::metadata(dir)
        .await
        .map_err(|e| io_err(dir, e))?;
    if !metadata.is_dir() {
        return Err(ProcessError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    debug!("Collecting YAML files from {}", dir.display());

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&current)
            .await
            .map_err(|e| io_err(&current, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_err(&current, e))?
        {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|e| io_err(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if is_yaml(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    debug!("Found {} YAML files", files.len());

    Ok(files)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

pub async fn read_document(path: &Path) -> Result<String, ProcessError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_err(path, e))
}

pub async fn write_document(path: &Path, content: &str) -> Result<(), ProcessError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| io_err(path, e))
}
