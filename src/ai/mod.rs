//! Agents: the epsilon-greedy Q-learning agent and its burn value network,
//! the uniform random opponent, and board-state encoding.

mod agent;
pub mod algorithms;
pub mod networks;
mod random;
pub mod state_encoding;

pub use agent::{Agent, Experience};
pub use algorithms::{AgentStats, QAgent, QAgentConfig};
pub use networks::{QNetwork, QNetworkConfig};
pub use random::RandomAgent;
