use serde::{Deserialize, Serialize};

use crate::ai::Experience;

/// Training state written next to a model's weights as metadata.json.
///
/// Every field is optional on load; missing keys take the values of a fresh
/// agent (epsilon 1.0, no replay memory, zero episodes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetadata {
    /// Lifetime episode count across all training runs.
    pub episodes: u64,
    pub epsilon: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon_min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon_decay: Option<f32>,
    /// Replay memory, oldest first. Omitted when saved without memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<Experience>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        ModelMetadata {
            episodes: 0,
            epsilon: 1.0,
            epsilon_min: None,
            epsilon_decay: None,
            memory: None,
            timestamp: None,
            win_rate: None,
            learning_rate: None,
            gamma: None,
            rows: None,
            cols: None,
        }
    }
}
