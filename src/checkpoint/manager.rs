use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::ai::algorithms::WEIGHTS_FILE;
use crate::ai::QAgent;
use crate::checkpoint::metadata::ModelMetadata;
use crate::error::CheckpointError;

pub const METADATA_FILE: &str = "metadata.json";

/// Configuration for the model manager.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelManagerConfig {
    pub models_dir: PathBuf,
    /// Write the replay memory into metadata.json. Turning this off keeps
    /// saves small at the cost of resuming with an empty buffer.
    pub save_memory: bool,
}

impl Default for ModelManagerConfig {
    fn default() -> Self {
        ModelManagerConfig {
            models_dir: PathBuf::from("models/saved_models"),
            save_memory: true,
        }
    }
}

/// Saves, loads, lists and deletes named models under one directory.
///
/// Layout: `<models_dir>/<name>/q_network.mpk` plus
/// `<models_dir>/<name>/metadata.json`.
#[derive(Debug, Clone)]
pub struct ModelManager {
    config: ModelManagerConfig,
}

impl ModelManager {
    pub fn new(config: ModelManagerConfig) -> Self {
        if let Err(e) = fs::create_dir_all(&config.models_dir) {
            warn!(dir = %config.models_dir.display(), "could not create models directory: {e}");
        }
        ModelManager { config }
    }

    pub fn models_dir(&self) -> &Path {
        &self.config.models_dir
    }

    pub fn model_dir(&self, name: &str) -> PathBuf {
        self.config.models_dir.join(name)
    }

    /// `custom` if given, otherwise `connect4_<unix seconds>`.
    pub fn generate_model_name(&self, custom: Option<&str>) -> String {
        match custom {
            Some(name) => name.to_string(),
            None => format!("connect4_{}", unix_now()),
        }
    }

    /// Save weights and metadata under `name`, replacing any previous save.
    ///
    /// Everything is written into `<name>.tmp` first and renamed into place,
    /// so a crash mid-save never leaves a half-written model behind.
    pub fn save_model(
        &self,
        agent: &QAgent,
        name: &str,
        win_rate: Option<f32>,
    ) -> Result<PathBuf, CheckpointError> {
        validate_name(name)?;
        let tmp_dir = self.config.models_dir.join(format!("{name}.tmp"));
        let final_dir = self.model_dir(name);

        if tmp_dir.exists() {
            fs::remove_dir_all(&tmp_dir)?;
        }
        fs::create_dir_all(&tmp_dir)?;

        agent.save_weights(&tmp_dir)?;

        let mut metadata = agent.export_metadata(self.config.save_memory);
        metadata.timestamp = Some(unix_now());
        metadata.win_rate = win_rate;
        let meta_json = serde_json::to_string_pretty(&metadata)?;
        fs::write(tmp_dir.join(METADATA_FILE), meta_json)?;

        // Atomic rename
        if final_dir.exists() {
            fs::remove_dir_all(&final_dir)?;
        }
        fs::rename(&tmp_dir, &final_dir)?;

        debug!(
            model = name,
            episodes = metadata.episodes,
            epsilon = metadata.epsilon,
            "model saved"
        );
        Ok(final_dir)
    }

    /// Restore `name` into `agent`: weights first, then training state.
    ///
    /// The weights must exist. Metadata is best effort; when it is missing
    /// or unreadable the agent resumes from fresh defaults.
    pub fn load_model(
        &self,
        name: &str,
        agent: &mut QAgent,
    ) -> Result<ModelMetadata, CheckpointError> {
        validate_name(name)?;
        let dir = self.model_dir(name);
        if !dir.is_dir() {
            return Err(CheckpointError::ModelNotFound {
                name: name.to_string(),
                dir: self.config.models_dir.clone(),
            });
        }

        let metadata = self.load_metadata(name);
        if let (Some(rows), Some(cols)) = (metadata.rows, metadata.cols) {
            let (agent_rows, agent_cols) = agent.board_dims();
            if (rows, cols) != (agent_rows, agent_cols) {
                return Err(CheckpointError::ModelLoad(format!(
                    "model '{name}' was trained on a {rows}x{cols} board, agent expects {agent_rows}x{agent_cols}"
                )));
            }
        }

        agent.load_weights(&dir)?;
        agent.restore_metadata(&metadata);
        info!(
            model = name,
            episodes = metadata.episodes,
            epsilon = metadata.epsilon,
            memory = agent.memory().len(),
            "model loaded"
        );
        Ok(metadata)
    }

    /// Read and parse `name`'s metadata, reporting any failure.
    pub fn read_metadata(&self, name: &str) -> Result<ModelMetadata, CheckpointError> {
        validate_name(name)?;
        let meta_path = self.model_dir(name).join(METADATA_FILE);
        let meta_json =
            fs::read_to_string(&meta_path).map_err(|e| CheckpointError::MetadataRead {
                path: meta_path.clone(),
                source: e,
            })?;
        serde_json::from_str(&meta_json).map_err(|e| CheckpointError::MetadataParse {
            path: meta_path,
            source: e,
        })
    }

    /// Like [`ModelManager::read_metadata`], but falls back to
    /// [`ModelMetadata::default`] when the file is missing or corrupt.
    pub fn load_metadata(&self, name: &str) -> ModelMetadata {
        match self.read_metadata(name) {
            Ok(metadata) => metadata,
            Err(CheckpointError::MetadataRead { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                info!(model = name, "no metadata found, starting from scratch");
                ModelMetadata::default()
            }
            Err(e) => {
                warn!(model = name, "ignoring unreadable metadata: {e}");
                ModelMetadata::default()
            }
        }
    }

    /// Episodes trained across all runs of `name`; zero if unknown.
    pub fn lifetime_episodes(&self, name: &str) -> u64 {
        self.load_metadata(name).episodes
    }

    /// Saved models sorted by name, with their (lenient) metadata.
    pub fn list_saved_models(&self) -> Result<Vec<(String, ModelMetadata)>, CheckpointError> {
        if !self.config.models_dir.exists() {
            return Ok(Vec::new());
        }

        let weights_file = format!("{WEIGHTS_FILE}.mpk");
        let mut results = Vec::new();
        for entry in fs::read_dir(&self.config.models_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".tmp") || !path.join(&weights_file).exists() {
                continue;
            }
            let metadata = self.load_metadata(&name);
            results.push((name, metadata));
        }
        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    }

    /// Remove a saved model. Returns `false` if there was nothing to delete.
    pub fn delete_model(&self, name: &str) -> Result<bool, CheckpointError> {
        validate_name(name)?;
        let dir = self.model_dir(name);
        if !dir.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir)?;
        info!(model = name, "model deleted");
        Ok(true)
    }
}

/// Names map straight to directory names, so they must stay inside the
/// models directory.
fn validate_name(name: &str) -> Result<(), CheckpointError> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.ends_with(".tmp")
        || name.contains(['/', '\\']);
    if invalid {
        return Err(CheckpointError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
