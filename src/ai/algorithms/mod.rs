mod q_learning;

pub use q_learning::{AgentStats, QAgent, QAgentConfig, WEIGHTS_FILE};
