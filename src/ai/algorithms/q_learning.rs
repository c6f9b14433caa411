use std::path::Path;

use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::record::DefaultRecorder;
use burn::tensor::TensorData;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::ai::agent::{Agent, Experience};
use crate::ai::networks::{QNetwork, QNetworkConfig};
use crate::ai::state_encoding::{encode_state, encode_states_batch};
use crate::checkpoint::ModelMetadata;
use crate::error::CheckpointError;
use crate::game::Board;
use crate::training::replay_buffer::ReplayBuffer;

type InferBackend = NdArray;
type TrainBackend = Autodiff<InferBackend>;

/// File stem of the online network weights inside a model directory.
pub const WEIGHTS_FILE: &str = "q_network";

/// Q-learning hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QAgentConfig {
    pub learning_rate: f64,
    pub gamma: f32,
    pub epsilon_start: f32,
    pub epsilon_min: f32,
    pub epsilon_decay: f32,
    pub memory_capacity: usize,
    pub batch_size: usize,
    pub hidden_size: usize,
    /// Seed for exploration and replay sampling; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for QAgentConfig {
    fn default() -> Self {
        QAgentConfig {
            learning_rate: 1e-3,
            gamma: 0.95,
            epsilon_start: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.995,
            memory_capacity: 2000,
            batch_size: 32,
            hidden_size: 128,
            seed: None,
        }
    }
}

/// Snapshot of the agent's exploration and memory state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AgentStats {
    pub epsilon: f32,
    pub memory_size: usize,
    pub epsilon_min: f32,
    pub epsilon_decay: f32,
}

/// Epsilon-greedy Q-learning agent with an online network, a lagging
/// target network, a bounded replay memory and an Adam optimizer.
pub struct QAgent {
    q_network: QNetwork<TrainBackend>,
    target_network: QNetwork<InferBackend>,
    optimizer: burn::optim::adaptor::OptimizerAdaptor<burn::optim::Adam, QNetwork<TrainBackend>, TrainBackend>,
    memory: ReplayBuffer,
    config: QAgentConfig,
    net_config: QNetworkConfig,
    device: <TrainBackend as Backend>::Device,
    epsilon: f32,
    total_episodes: u64,
    step_count: usize,
    rng: StdRng,
}

impl QAgent {
    /// Build a fresh agent for a `rows` x `cols` board.
    pub fn new(config: QAgentConfig, rows: usize, cols: usize) -> Self {
        let device = Default::default();
        let net_config =
            QNetworkConfig::new(rows * cols, cols).with_hidden_size(config.hidden_size);
        let q_network: QNetwork<TrainBackend> = net_config.init(&device);
        let target_network = q_network.valid();
        let optimizer = AdamConfig::new().init();

        let (rng, memory_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_os_rng(), StdRng::from_os_rng()),
        };
        let memory = ReplayBuffer::with_rng(config.memory_capacity, memory_rng);

        QAgent {
            q_network,
            target_network,
            optimizer,
            memory,
            epsilon: config.epsilon_start,
            config,
            net_config,
            device,
            total_episodes: 0,
            step_count: 0,
            rng,
        }
    }

    /// Epsilon-greedy action selection over `valid_moves`.
    ///
    /// `valid_moves` must be non-empty; callers check for a full board first.
    pub fn act(&mut self, state: &[u8], valid_moves: &[usize]) -> usize {
        assert!(!valid_moves.is_empty(), "No legal actions");

        if self.rng.random::<f32>() < self.epsilon {
            return *valid_moves
                .choose(&mut self.rng)
                .expect("valid_moves is non-empty");
        }

        self.greedy_action(state, valid_moves)
    }

    /// Highest-valued legal column under the online network.
    ///
    /// Ties resolve to the lowest column index.
    pub fn greedy_action(&self, state: &[u8], valid_moves: &[usize]) -> usize {
        assert!(!valid_moves.is_empty(), "No legal actions");
        let q_values = self.q_values(state);

        let mut best_action = valid_moves[0];
        let mut best_q = f32::NEG_INFINITY;
        let mut ordered = valid_moves.to_vec();
        ordered.sort_unstable();
        for col in ordered {
            if q_values[col] > best_q {
                best_q = q_values[col];
                best_action = col;
            }
        }
        best_action
    }

    /// Online network's action values for one state.
    pub fn q_values(&self, state: &[u8]) -> Vec<f32> {
        let input = encode_state::<InferBackend>(state, &self.device);
        tensor_to_vec(self.q_network.valid().forward(input))
    }

    /// Store a transition in replay memory, evicting the oldest when full.
    pub fn remember(&mut self, experience: Experience) {
        self.memory.push(experience);
    }

    /// Train on a uniform sample of `batch_size` stored transitions.
    ///
    /// Returns `None` without touching weights or epsilon when memory holds
    /// fewer than `batch_size` transitions. Otherwise performs one Adam step
    /// toward the TD targets, decays epsilon, and returns the batch loss.
    pub fn replay(&mut self, batch_size: usize) -> Option<f32> {
        if batch_size == 0 || self.memory.len() < batch_size {
            return None;
        }

        let batch = self.memory.sample(batch_size);
        let num_actions = self.net_config.num_actions;

        let states: Vec<&[u8]> = batch.iter().map(|e| e.state.as_slice()).collect();
        let next_states: Vec<&[u8]> = batch.iter().map(|e| e.next_state.as_slice()).collect();

        // Start from the online network's own predictions so that only the
        // taken action contributes to the loss.
        let online = self.q_network.valid();
        let mut target_data = tensor_to_vec(
            online.forward(encode_states_batch::<InferBackend, _>(&states, &self.device)),
        );
        let next_q_data = tensor_to_vec(
            self.target_network
                .forward(encode_states_batch::<InferBackend, _>(&next_states, &self.device)),
        );

        for (i, exp) in batch.iter().enumerate() {
            let target = if exp.done {
                exp.reward
            } else {
                let next_q = &next_q_data[i * num_actions..(i + 1) * num_actions];
                let max_next = next_q.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                exp.reward + self.config.gamma * max_next
            };
            target_data[i * num_actions + exp.action] = target;
        }

        let targets = Tensor::<TrainBackend, 1>::from_data(
            TensorData::from(target_data.as_slice()),
            &self.device,
        )
        .reshape([batch.len() as i32, num_actions as i32]);

        let q_all = self
            .q_network
            .forward(encode_states_batch::<TrainBackend, _>(&states, &self.device));

        // MSE loss
        let diff = q_all - targets;
        let loss = (diff.clone() * diff).mean();

        let loss_val: f32 = loss
            .clone()
            .into_data()
            .to_vec::<f32>()
            .expect("f32 loss tensor extraction")[0];

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.q_network);
        self.q_network =
            self.optimizer
                .step(self.config.learning_rate, self.q_network.clone(), grads);

        self.step_count += 1;
        self.decay_epsilon();
        debug!(loss = loss_val, epsilon = self.epsilon, "replay step");

        Some(loss_val)
    }

    /// Overwrite the target network with a copy of the online weights.
    pub fn update_target_network(&mut self) {
        self.target_network = self.q_network.valid();
    }

    /// Multiplicative decay, floored at `epsilon_min`.
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Set epsilon directly (e.g. 0.0 for pure greedy inference).
    pub fn set_epsilon(&mut self, eps: f32) {
        self.epsilon = eps;
    }

    /// Switch to pure exploitation. Returns the epsilon to hand back to
    /// [`QAgent::exit_eval_mode`].
    pub fn enter_eval_mode(&mut self) -> f32 {
        let saved = self.epsilon;
        self.epsilon = 0.0;
        saved
    }

    pub fn exit_eval_mode(&mut self, saved_epsilon: f32) {
        self.epsilon = saved_epsilon;
    }

    pub fn config(&self) -> &QAgentConfig {
        &self.config
    }

    pub fn memory(&self) -> &ReplayBuffer {
        &self.memory
    }

    /// Board shape the network was built for, as (rows, cols).
    pub fn board_dims(&self) -> (usize, usize) {
        let cols = self.net_config.num_actions;
        (self.net_config.input_size / cols, cols)
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Lifetime episode count, carried across save/load.
    pub fn total_episodes(&self) -> u64 {
        self.total_episodes
    }

    pub fn record_episode(&mut self) {
        self.total_episodes += 1;
    }

    pub fn set_total_episodes(&mut self, episodes: u64) {
        self.total_episodes = episodes;
    }

    pub fn stats(&self) -> AgentStats {
        AgentStats {
            epsilon: self.epsilon,
            memory_size: self.memory.len(),
            epsilon_min: self.config.epsilon_min,
            epsilon_decay: self.config.epsilon_decay,
        }
    }

    /// Save the online network weights into `dir`.
    pub fn save_weights(&self, dir: &Path) -> Result<(), CheckpointError> {
        let recorder = DefaultRecorder::default();
        self.q_network
            .valid()
            .save_file(dir.join(WEIGHTS_FILE), &recorder)
            .map_err(|e| CheckpointError::ModelSave(e.to_string()))
    }

    /// Load online weights from `dir` and rebuild the target network as an
    /// exact copy of them.
    pub fn load_weights(&mut self, dir: &Path) -> Result<(), CheckpointError> {
        let recorder = DefaultRecorder::default();
        let q: QNetwork<TrainBackend> = self
            .net_config
            .init(&self.device)
            .load_file(dir.join(WEIGHTS_FILE), &recorder, &self.device)
            .map_err(|e| CheckpointError::ModelLoad(e.to_string()))?;
        self.q_network = q;
        self.target_network = self.q_network.valid();
        self.optimizer = AdamConfig::new().init();
        Ok(())
    }

    /// Export the persistable training state.
    pub fn export_metadata(&self, include_memory: bool) -> ModelMetadata {
        ModelMetadata {
            episodes: self.total_episodes,
            epsilon: self.epsilon,
            epsilon_min: Some(self.config.epsilon_min),
            epsilon_decay: Some(self.config.epsilon_decay),
            memory: include_memory.then(|| self.memory.iter().cloned().collect()),
            learning_rate: Some(self.config.learning_rate),
            gamma: Some(self.config.gamma),
            rows: Some(self.board_dims().0),
            cols: Some(self.board_dims().1),
            ..Default::default()
        }
    }

    /// Restore training state from metadata. Absent fields fall back to a
    /// fresh agent's values; memory entries that don't fit this board are
    /// dropped.
    pub fn restore_metadata(&mut self, metadata: &ModelMetadata) {
        self.epsilon = metadata.epsilon;
        self.total_episodes = metadata.episodes;
        if let Some(min) = metadata.epsilon_min {
            self.config.epsilon_min = min;
        }
        if let Some(decay) = metadata.epsilon_decay {
            self.config.epsilon_decay = decay;
        }

        self.memory.clear();
        if let Some(memory) = &metadata.memory {
            let cells = self.net_config.input_size;
            let actions = self.net_config.num_actions;
            let mut skipped = 0usize;
            for exp in memory {
                if exp.state.len() == cells && exp.next_state.len() == cells && exp.action < actions {
                    self.memory.push(exp.clone());
                } else {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                warn!(skipped, "dropped replay entries that do not match the board size");
            }
        }
    }
}

impl Agent for QAgent {
    fn select_action(&mut self, board: &Board, valid_moves: &[usize]) -> usize {
        self.act(&board.board_state(), valid_moves)
    }

    fn name(&self) -> &str {
        "Q-learning"
    }
}

fn tensor_to_vec(tensor: Tensor<InferBackend, 2>) -> Vec<f32> {
    tensor
        .into_data()
        .to_vec()
        .expect("f32 tensor data extraction")
}
