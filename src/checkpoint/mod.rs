//! Model persistence: one directory per named model holding the network
//! weights and a JSON metadata file with the resumable training state.

mod manager;
mod metadata;

pub use manager::{ModelManager, ModelManagerConfig, METADATA_FILE};
pub use metadata::ModelMetadata;
