use std::path::Path;

use tracing::warn;

use crate::ai::QAgentConfig;
use crate::checkpoint::ModelManagerConfig;
use crate::error::ConfigError;
use crate::game::CONNECT;
use crate::training::trainer::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: QAgentConfig,
    pub training: TrainerConfig,
    pub models: ModelManagerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let agent = &self.agent;
        if agent.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "agent.learning_rate must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&agent.gamma) {
            return Err(ConfigError::Validation(
                "agent.gamma must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&agent.epsilon_start) {
            return Err(ConfigError::Validation(
                "agent.epsilon_start must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&agent.epsilon_min) {
            return Err(ConfigError::Validation(
                "agent.epsilon_min must be in [0, 1]".into(),
            ));
        }
        if agent.epsilon_min > agent.epsilon_start {
            return Err(ConfigError::Validation(
                "agent.epsilon_min must be <= agent.epsilon_start".into(),
            ));
        }
        if agent.epsilon_decay <= 0.0 || agent.epsilon_decay > 1.0 {
            return Err(ConfigError::Validation(
                "agent.epsilon_decay must be in (0, 1]".into(),
            ));
        }
        if agent.batch_size == 0 {
            return Err(ConfigError::Validation(
                "agent.batch_size must be > 0".into(),
            ));
        }
        if agent.memory_capacity < agent.batch_size {
            return Err(ConfigError::Validation(
                "agent.memory_capacity must be >= agent.batch_size".into(),
            ));
        }
        if agent.hidden_size == 0 {
            return Err(ConfigError::Validation(
                "agent.hidden_size must be > 0".into(),
            ));
        }

        let training = &self.training;
        if training.episodes == 0 {
            return Err(ConfigError::Validation(
                "training.episodes must be > 0".into(),
            ));
        }
        if training.rows == 0 || training.cols == 0 {
            return Err(ConfigError::Validation(
                "training.rows and training.cols must be > 0".into(),
            ));
        }
        if training.rows < CONNECT && training.cols < CONNECT {
            return Err(ConfigError::Validation(format!(
                "training board {}x{} is too small to connect {CONNECT}",
                training.rows, training.cols
            )));
        }
        if training.target_update_interval == 0 {
            return Err(ConfigError::Validation(
                "training.target_update_interval must be > 0".into(),
            ));
        }
        if training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if training.save_interval == 0 {
            return Err(ConfigError::Validation(
                "training.save_interval must be > 0".into(),
            ));
        }

        if self.models.models_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "models.models_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[agent]
learning_rate = 0.01
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.agent.learning_rate - 0.01).abs() < 1e-9);
        // Other fields should be defaults
        assert!((config.agent.gamma - 0.95).abs() < 1e-6);
        assert_eq!(config.agent.memory_capacity, 2000);
        assert_eq!(config.training.episodes, 5000);
        assert_eq!(config.training.draw_reward, None);
        assert!(config.models.save_memory);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.agent.batch_size, default.agent.batch_size);
        assert_eq!(config.training.target_update_interval, 10);
        assert_eq!(config.models.models_dir, default.models.models_dir);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[training]
episodes = 500
draw_reward = 0.0

[models]
models_dir = "elsewhere"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.training.episodes, 500);
        assert_eq!(config.training.draw_reward, Some(0.0));
        assert_eq!(config.models.models_dir, Path::new("elsewhere"));
        // Others are defaults
        assert!((config.agent.learning_rate - 1e-3).abs() < 1e-9);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[agent]\ngamma = 2.0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.training.episodes, 5000);
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }

    #[test]
    fn test_validation_rejects_zero_episodes() {
        let mut config = AppConfig::default();
        config.training.episodes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_lr() {
        let mut config = AppConfig::default();
        config.agent.learning_rate = -0.001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_epsilon_min_gt_start() {
        let mut config = AppConfig::default();
        config.agent.epsilon_start = 0.1;
        config.agent.epsilon_min = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_decay() {
        let mut config = AppConfig::default();
        config.agent.epsilon_decay = 1.5;
        assert!(config.validate().is_err());
        config.agent.epsilon_decay = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_memory_smaller_than_batch() {
        let mut config = AppConfig::default();
        config.agent.memory_capacity = 10;
        config.agent.batch_size = 32;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_tiny_board() {
        let mut config = AppConfig::default();
        config.training.rows = 3;
        config.training.cols = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_intervals() {
        let mut config = AppConfig::default();
        config.training.target_update_interval = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.training.save_interval = 0;
        assert!(config.validate().is_err());
    }
}
