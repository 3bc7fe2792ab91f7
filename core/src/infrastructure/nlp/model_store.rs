use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::common::entities::app_errors::CoreError;

/// Model names are file stems inside the model directory.
fn validate_model_name(name: &str) -> Result<(), CoreError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(CoreError::ModelLoad(format!("invalid model name {:?}", name)))
    }
}

pub fn model_path(model_dir: &Path, name: &str) -> Result<PathBuf, CoreError> {
    validate_model_name(name)?;
    Ok(model_dir.join(format!("{}.json", name)))
}

/// Reads and parses `{model_dir}/{name}.json`.
pub async fn load_model<T: DeserializeOwned>(model_dir: &Path, name: &str) -> Result<T, CoreError> {
    let path = model_path(model_dir, name)?;

    let content = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!("Failed to read model {}: {}", path.display(), e);
        CoreError::ModelLoad(format!("{}: {}", path.display(), e))
    })?;

    let model = serde_json::from_slice(&content).map_err(|e| {
        tracing::error!("Failed to parse model {}: {}", path.display(), e);
        CoreError::ModelLoad(format!("{}: {}", path.display(), e))
    })?;

    tracing::info!(model = %name, path = %path.display(), "Model loaded");
    Ok(model)
}
