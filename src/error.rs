use std::path::PathBuf;

/// Errors that can occur while saving or loading models.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("invalid model name '{0}'")]
    InvalidName(String),

    #[error("model '{name}' not found in {dir}")]
    ModelNotFound { name: String, dir: PathBuf },

    #[error("failed to read metadata from {path}: {source}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse metadata from {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to save model: {0}")]
    ModelSave(String),

    #[error("failed to load model: {0}")]
    ModelLoad(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("unknown training mode '{value}' (expected one of: {valid})")]
    UnknownMode { value: String, valid: String },

    #[error("human move provider required for vs_human training")]
    MissingMoveProvider,

    #[error("episode count required for {mode} training")]
    MissingEpisodeCount { mode: &'static str },

    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("agent expects a {agent_rows}x{agent_cols} board but the trainer uses {rows}x{cols}")]
    BoardMismatch {
        agent_rows: usize,
        agent_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("selected illegal action {action} (legal: {legal:?})")]
    IllegalAction { action: usize, legal: Vec<usize> },

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_error_display() {
        let err = CheckpointError::ModelNotFound {
            name: "connect4_1".to_string(),
            dir: PathBuf::from("models"),
        };
        assert_eq!(err.to_string(), "model 'connect4_1' not found in models");
    }

    #[test]
    fn test_unknown_mode_display() {
        let err = TrainingError::UnknownMode {
            value: "league".to_string(),
            valid: "self_play, vs_random, vs_human".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown training mode 'league' (expected one of: self_play, vs_random, vs_human)"
        );
    }

    #[test]
    fn test_illegal_action_display() {
        let err = TrainingError::IllegalAction {
            action: 5,
            legal: vec![0, 1, 2],
        };
        assert_eq!(err.to_string(), "selected illegal action 5 (legal: [0, 1, 2])");
    }

    #[test]
    fn test_board_mismatch_display() {
        let err = TrainingError::BoardMismatch {
            agent_rows: 6,
            agent_cols: 7,
            rows: 5,
            cols: 5,
        };
        assert_eq!(
            err.to_string(),
            "agent expects a 6x7 board but the trainer uses 5x5"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("agent.learning_rate must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: agent.learning_rate must be > 0"
        );
    }
}
