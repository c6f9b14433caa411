use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::ai::{Agent, QAgent, RandomAgent};
use crate::checkpoint::ModelManager;
use crate::error::TrainingError;
use crate::game::{Board, Player, COLS, ROWS};
use crate::training::episode::{
    play_opponent_episode, play_self_play_episode, EpisodeTrace, Opponent,
};
use crate::training::metrics::{TrainingMetrics, TrainingStats};
use crate::training::move_provider::MoveProvider;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Episodes per run when the caller doesn't say otherwise.
    pub episodes: usize,
    pub rows: usize,
    pub cols: usize,
    /// Sync the target network on every episode index divisible by this.
    pub target_update_interval: usize,
    pub log_interval: usize,
    /// Autosave cadence, in episodes. Only applies once a model is attached.
    pub save_interval: usize,
    pub eval_games: usize,
    /// Terminal reward for the last move of a drawn game. Unset leaves that
    /// move as an ordinary non-terminal step.
    pub draw_reward: Option<f32>,
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            episodes: 5000,
            rows: ROWS,
            cols: COLS,
            target_update_interval: 10,
            log_interval: 100,
            save_interval: 500,
            eval_games: 100,
            draw_reward: None,
            seed: None,
        }
    }
}

/// Which policy controls player two during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingMode {
    SelfPlay,
    VsRandom,
    VsHuman,
}

impl TrainingMode {
    pub const ALL: [TrainingMode; 3] = [
        TrainingMode::SelfPlay,
        TrainingMode::VsRandom,
        TrainingMode::VsHuman,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrainingMode::SelfPlay => "self_play",
            TrainingMode::VsRandom => "vs_random",
            TrainingMode::VsHuman => "vs_human",
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingMode {
    type Err = TrainingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrainingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| TrainingError::UnknownMode {
                value: s.to_string(),
                valid: TrainingMode::ALL.map(TrainingMode::as_str).join(", "),
            })
    }
}

/// Mode-specific parameters for [`Trainer::train`].
///
/// `self_play` and `vs_random` need `episodes`. `vs_human` needs a
/// `move_provider` and plays a single game unless `episodes` says otherwise.
#[derive(Default)]
pub struct TrainRequest<'a> {
    pub episodes: Option<usize>,
    pub move_provider: Option<&'a mut dyn MoveProvider>,
}

impl<'a> TrainRequest<'a> {
    pub fn episodes(episodes: usize) -> Self {
        TrainRequest {
            episodes: Some(episodes),
            move_provider: None,
        }
    }

    pub fn human(provider: &'a mut dyn MoveProvider) -> Self {
        TrainRequest {
            episodes: None,
            move_provider: Some(provider),
        }
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = Some(episodes);
        self
    }
}

enum EpisodeSource<'a> {
    SelfPlay,
    Random(RandomAgent),
    Human(&'a mut dyn MoveProvider),
}

/// Drives training runs for a [`QAgent`]: plays episodes, feeds replay
/// memory, triggers learning and target sync, and keeps run statistics.
pub struct Trainer {
    config: TrainerConfig,
    board: Board,
    rng: StdRng,
    stats: TrainingStats,
    metrics: TrainingMetrics,
    model: Option<(ModelManager, String)>,
    cancel: Arc<AtomicBool>,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Result<Self, TrainingError> {
        if config.rows == 0 || config.cols == 0 {
            return Err(TrainingError::EmptyBoard {
                rows: config.rows,
                cols: config.cols,
            });
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Trainer {
            board: Board::new(config.rows, config.cols),
            config,
            rng,
            stats: TrainingStats::default(),
            metrics: TrainingMetrics::new(),
            model: None,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Attach a named model. The lifetime episode count is read from its
    /// saved metadata (zero if there is none), and autosaves go to it.
    /// Each run hands the larger of that count and the agent's own to the
    /// agent, so saves never move the persisted counter backwards.
    pub fn initialize(&mut self, manager: ModelManager, model_name: impl Into<String>) {
        let model_name = model_name.into();
        self.stats.total_episodes = manager.lifetime_episodes(&model_name);
        info!(
            model = %model_name,
            total_episodes = self.stats.total_episodes,
            "trainer initialized"
        );
        self.model = Some((manager, model_name));
    }

    /// Flag checked between episodes. Setting it stops the current run after
    /// the episode in progress; the run still returns its stats.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().map(|(_, name)| name.as_str())
    }

    /// Single training entry point. `mode` is one of `self_play`,
    /// `vs_random` or `vs_human`; anything else is rejected before any
    /// episode runs.
    pub fn train(
        &mut self,
        agent: &mut QAgent,
        mode: &str,
        request: TrainRequest<'_>,
    ) -> Result<TrainingStats, TrainingError> {
        let mode = mode.parse::<TrainingMode>().inspect_err(|e| error!("{e}"))?;
        self.train_mode(agent, mode, request)
    }

    pub fn train_mode(
        &mut self,
        agent: &mut QAgent,
        mode: TrainingMode,
        request: TrainRequest<'_>,
    ) -> Result<TrainingStats, TrainingError> {
        let result = self.dispatch(agent, mode, request);
        if let Err(e) = &result {
            error!(mode = %mode, episodes = self.stats.episodes, "training failed: {e}");
        }
        result
    }

    fn dispatch(
        &mut self,
        agent: &mut QAgent,
        mode: TrainingMode,
        request: TrainRequest<'_>,
    ) -> Result<TrainingStats, TrainingError> {
        self.check_board(agent)?;

        let (episodes, source) = match mode {
            TrainingMode::SelfPlay => (
                request
                    .episodes
                    .ok_or(TrainingError::MissingEpisodeCount { mode: mode.as_str() })?,
                EpisodeSource::SelfPlay,
            ),
            TrainingMode::VsRandom => (
                request
                    .episodes
                    .ok_or(TrainingError::MissingEpisodeCount { mode: mode.as_str() })?,
                EpisodeSource::Random(RandomAgent::with_seed(self.rng.random())),
            ),
            TrainingMode::VsHuman => (
                request.episodes.unwrap_or(1),
                EpisodeSource::Human(
                    request
                        .move_provider
                        .ok_or(TrainingError::MissingMoveProvider)?,
                ),
            ),
        };

        self.run(agent, mode, episodes, source)
    }

    fn run(
        &mut self,
        agent: &mut QAgent,
        mode: TrainingMode,
        episodes: usize,
        mut source: EpisodeSource<'_>,
    ) -> Result<TrainingStats, TrainingError> {
        self.stats.reset();
        self.metrics = TrainingMetrics::new();
        self.stats.total_episodes = self.stats.total_episodes.max(agent.total_episodes());
        agent.set_total_episodes(self.stats.total_episodes);
        self.cancel.store(false, Ordering::Relaxed);

        info!(
            mode = %mode,
            agent = agent.name(),
            episodes,
            total_episodes = self.stats.total_episodes,
            epsilon = agent.epsilon(),
            "starting training"
        );

        let draw_reward = self.config.draw_reward;
        for episode in 0..episodes {
            if self.cancel.load(Ordering::Relaxed) {
                info!(episode, "training cancelled");
                break;
            }

            let trace = match &mut source {
                EpisodeSource::SelfPlay => {
                    let start = self.random_seat();
                    Some(play_self_play_episode(
                        agent,
                        &mut self.board,
                        start,
                        draw_reward,
                    )?)
                }
                EpisodeSource::Random(random) => play_opponent_episode(
                    agent,
                    &mut self.board,
                    Opponent::Policy(random),
                    Player::One,
                    draw_reward,
                )?,
                EpisodeSource::Human(provider) => {
                    let start = self.random_seat();
                    play_opponent_episode(
                        agent,
                        &mut self.board,
                        Opponent::Human(&mut **provider),
                        start,
                        draw_reward,
                    )?
                }
            };

            let Some(trace) = trace else {
                info!(episode, "human opponent left the game");
                break;
            };
            self.finish_episode(agent, episode, trace);
        }

        self.stats.final_epsilon = Some(agent.epsilon());
        info!(
            episodes = self.stats.episodes,
            wins = self.stats.wins,
            losses = self.stats.losses,
            draws = self.stats.draws,
            final_epsilon = agent.epsilon(),
            "training finished"
        );
        Ok(self.stats.clone())
    }

    fn finish_episode(&mut self, agent: &mut QAgent, episode: usize, trace: EpisodeTrace) {
        let EpisodeTrace {
            experiences,
            result,
        } = trace;
        debug!(
            episode,
            winner = result.outcome.winner().map_or("draw", Player::name),
            moves = result.game_length,
            recorded = experiences.len(),
            "episode finished"
        );

        for experience in experiences {
            agent.remember(experience);
        }
        self.stats.record(result.outcome);
        agent.record_episode();
        self.metrics.record_episode(result);

        let batch_size = agent.config().batch_size;
        if let Some(loss) = agent.replay(batch_size) {
            self.metrics.record_update(loss);
        }

        if episode.checked_rem(self.config.target_update_interval) == Some(0) {
            agent.update_target_network();
        }

        if matches!(episode.checked_rem(self.config.log_interval), Some(0 | 1)) {
            self.log_progress(agent);
        }

        if (episode + 1).checked_rem(self.config.save_interval) == Some(0) {
            self.autosave(agent);
        }
    }

    fn log_progress(&self, agent: &QAgent) {
        info!(
            episode = self.stats.episodes,
            total_episodes = self.stats.total_episodes,
            win_rate = format_args!("{:.2}", self.stats.win_rate),
            wins = self.stats.wins,
            losses = self.stats.losses,
            draws = self.stats.draws,
            epsilon = format_args!("{:.4}", agent.epsilon()),
            recent_win_rate = format_args!("{:.2}", self.metrics.win_rate()),
            recent_draw_rate = format_args!("{:.2}", self.metrics.draw_rate()),
            avg_loss = format_args!("{:.4}", self.metrics.average_loss()),
            avg_len = format_args!("{:.1}", self.metrics.average_game_length()),
            "training progress"
        );
    }

    fn autosave(&self, agent: &QAgent) {
        let Some((manager, name)) = &self.model else {
            return;
        };
        match manager.save_model(agent, name, Some(self.stats.win_rate)) {
            Ok(path) => info!(path = %path.display(), "autosaved model"),
            Err(e) => warn!(model = %name, "autosave failed: {e}"),
        }
    }

    /// Play `games` greedy games as player one against a random opponent.
    ///
    /// Epsilon is forced to zero for the duration and restored afterwards,
    /// even on error. Nothing is stored in replay memory and the lifetime
    /// counters are untouched; the returned stats cover only these games.
    pub fn evaluate(
        &mut self,
        agent: &mut QAgent,
        games: usize,
    ) -> Result<TrainingStats, TrainingError> {
        self.check_board(agent)?;
        let saved_epsilon = agent.enter_eval_mode();
        let result = self.play_evaluation(agent, games);
        agent.exit_eval_mode(saved_epsilon);

        let mut stats = result?;
        stats.final_epsilon = Some(agent.epsilon());
        info!(
            games = stats.episodes,
            wins = stats.wins,
            losses = stats.losses,
            draws = stats.draws,
            win_rate = format_args!("{:.2}", stats.win_rate),
            "evaluation vs random"
        );
        Ok(stats)
    }

    fn play_evaluation(
        &mut self,
        agent: &mut QAgent,
        games: usize,
    ) -> Result<TrainingStats, TrainingError> {
        let mut random = RandomAgent::with_seed(self.rng.random());
        let mut stats = TrainingStats::default();
        for _ in 0..games {
            let trace = play_opponent_episode(
                agent,
                &mut self.board,
                Opponent::Policy(&mut random),
                Player::One,
                self.config.draw_reward,
            )?;
            if let Some(trace) = trace {
                stats.record(trace.result.outcome);
            }
        }
        Ok(stats)
    }

    fn check_board(&self, agent: &QAgent) -> Result<(), TrainingError> {
        let (agent_rows, agent_cols) = agent.board_dims();
        if (agent_rows, agent_cols) != (self.board.rows(), self.board.cols()) {
            return Err(TrainingError::BoardMismatch {
                agent_rows,
                agent_cols,
                rows: self.board.rows(),
                cols: self.board.cols(),
            });
        }
        Ok(())
    }

    fn random_seat(&mut self) -> Player {
        if self.rng.random_bool(0.5) {
            Player::One
        } else {
            Player::Two
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::QAgentConfig;
    use crate::checkpoint::ModelManagerConfig;
    use crate::training::move_provider::{HumanInput, ScriptedMoves};

    fn small_agent() -> QAgent {
        QAgent::new(
            QAgentConfig {
                hidden_size: 16,
                seed: Some(11),
                ..Default::default()
            },
            ROWS,
            COLS,
        )
    }

    fn seeded_trainer() -> Trainer {
        Trainer::new(TrainerConfig {
            seed: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("self_play".parse::<TrainingMode>().unwrap(), TrainingMode::SelfPlay);
        assert_eq!("vs_random".parse::<TrainingMode>().unwrap(), TrainingMode::VsRandom);
        assert_eq!("vs_human".parse::<TrainingMode>().unwrap(), TrainingMode::VsHuman);
        assert_eq!(TrainingMode::VsHuman.to_string(), "vs_human");
    }

    #[test]
    fn test_unknown_mode_rejected_before_work() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let err = trainer
            .train(&mut agent, "tournament", TrainRequest::episodes(3))
            .unwrap_err();

        match &err {
            TrainingError::UnknownMode { value, valid } => {
                assert_eq!(value, "tournament");
                assert_eq!(valid, "self_play, vs_random, vs_human");
            }
            other => panic!("expected UnknownMode, got {other:?}"),
        }
        assert_eq!(agent.total_episodes(), 0);
        assert!(agent.memory().is_empty());
    }

    #[test]
    fn test_self_play_single_episode() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let stats = trainer
            .train(&mut agent, "self_play", TrainRequest::episodes(1))
            .unwrap();

        assert_eq!(stats.episodes, 1);
        assert_eq!(stats.wins + stats.losses + stats.draws, 1);
        assert_eq!(stats.total_episodes, 1);
        assert_eq!(agent.total_episodes(), 1);
        assert!(!agent.memory().is_empty());
        assert!(agent.memory().len() <= ROWS * COLS);
        assert_eq!(stats.final_epsilon, Some(agent.epsilon()));
    }

    #[test]
    fn test_vs_random_run_learns() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let stats = trainer
            .train(&mut agent, "vs_random", TrainRequest::episodes(12))
            .unwrap();

        assert_eq!(stats.episodes, 12);
        assert_eq!(stats.wins + stats.losses + stats.draws, 12);
        // Twelve games put well over 32 agent moves in memory.
        assert!(agent.step_count() > 0);
        assert!(agent.epsilon() < 1.0);
        assert!(agent
            .memory()
            .iter()
            .all(|e| e.perspective == Player::One));
    }

    #[test]
    fn test_missing_episode_count() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let err = trainer
            .train(&mut agent, "vs_random", TrainRequest::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TrainingError::MissingEpisodeCount { mode: "vs_random" }
        ));
    }

    #[test]
    fn test_vs_human_requires_provider() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let err = trainer
            .train(&mut agent, "vs_human", TrainRequest::episodes(1))
            .unwrap_err();
        assert!(matches!(err, TrainingError::MissingMoveProvider));
    }

    #[test]
    fn test_vs_human_plays_one_game() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        // Always the leftmost open column, after one out-of-range request.
        let mut first = true;
        let mut provider = |_: &Board, valid: &[usize]| {
            if std::mem::take(&mut first) {
                HumanInput::Column(COLS)
            } else {
                HumanInput::Column(valid[0])
            }
        };

        let stats = trainer
            .train(&mut agent, "vs_human", TrainRequest::human(&mut provider))
            .unwrap();
        assert_eq!(stats.episodes, 1);
        assert_eq!(stats.wins + stats.losses + stats.draws, 1);
    }

    #[test]
    fn test_vs_human_cancel_returns_partial_stats() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let mut moves = ScriptedMoves::new([HumanInput::Cancel]);

        let stats = trainer
            .train(
                &mut agent,
                "vs_human",
                TrainRequest::human(&mut moves).with_episodes(5),
            )
            .unwrap();
        assert_eq!(stats.episodes, 0);
        assert_eq!(agent.total_episodes(), 0);
    }

    #[test]
    fn test_board_mismatch_is_rejected() {
        let mut trainer = Trainer::new(TrainerConfig {
            rows: 5,
            cols: 5,
            ..Default::default()
        })
        .unwrap();
        let mut agent = small_agent();
        let err = trainer
            .train(&mut agent, "self_play", TrainRequest::episodes(1))
            .unwrap_err();
        assert!(matches!(err, TrainingError::BoardMismatch { rows: 5, cols: 5, .. }));
    }

    #[test]
    fn test_cancel_before_run_is_cleared() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        trainer.cancel_handle().store(true, Ordering::Relaxed);

        // A stale flag from an earlier run does not block a new one.
        let stats = trainer
            .train(&mut agent, "self_play", TrainRequest::episodes(2))
            .unwrap();
        assert_eq!(stats.episodes, 2);
    }

    #[test]
    fn test_cancel_between_episodes() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        let cancel = trainer.cancel_handle();
        let mut games = 0;
        let mut provider = |board: &Board, valid: &[usize]| {
            if board.board_state().iter().all(|&c| c < 2) {
                games += 1;
                if games == 2 {
                    cancel.store(true, Ordering::Relaxed);
                }
            }
            HumanInput::Column(valid[0])
        };

        let stats = trainer
            .train(
                &mut agent,
                "vs_human",
                TrainRequest::human(&mut provider).with_episodes(10),
            )
            .unwrap();
        assert_eq!(stats.episodes, 2);
    }

    #[test]
    fn test_evaluate_restores_epsilon_and_skips_memory() {
        let mut trainer = seeded_trainer();
        let mut agent = small_agent();
        agent.set_epsilon(0.37);

        let stats = trainer.evaluate(&mut agent, 5).unwrap();
        assert_eq!(stats.episodes, 5);
        assert_eq!(stats.wins + stats.losses + stats.draws, 5);
        assert!((agent.epsilon() - 0.37).abs() < 1e-7);
        assert!(agent.memory().is_empty());
        assert_eq!(agent.total_episodes(), 0);
    }

    #[test]
    fn test_initialize_seeds_lifetime_count() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ModelManager::new(ModelManagerConfig {
            models_dir: dir.path().to_path_buf(),
            save_memory: false,
        });
        let mut saved = small_agent();
        saved.set_total_episodes(40);
        manager.save_model(&saved, "resume_me", None).unwrap();

        let mut trainer = seeded_trainer();
        trainer.initialize(manager, "resume_me");
        assert_eq!(trainer.stats().total_episodes, 40);
        assert_eq!(trainer.model_name(), Some("resume_me"));

        let mut agent = small_agent();
        let stats = trainer
            .train(&mut agent, "self_play", TrainRequest::episodes(3))
            .unwrap();
        assert_eq!(stats.episodes, 3);
        assert_eq!(stats.total_episodes, 43);
    }

    #[test]
    fn test_autosave_on_interval() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ModelManager::new(ModelManagerConfig {
            models_dir: dir.path().to_path_buf(),
            save_memory: true,
        });
        let mut trainer = Trainer::new(TrainerConfig {
            save_interval: 2,
            seed: Some(9),
            ..Default::default()
        })
        .unwrap();
        trainer.initialize(manager, "auto");

        let mut agent = small_agent();
        trainer
            .train(&mut agent, "self_play", TrainRequest::episodes(2))
            .unwrap();

        let model_dir = dir.path().join("auto");
        assert!(model_dir.join("metadata.json").exists());
        assert!(model_dir.join("q_network.mpk").exists());
    }

    #[test]
    fn test_autosave_keeps_lifetime_count_for_fresh_agent() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ModelManager::new(ModelManagerConfig {
            models_dir: dir.path().to_path_buf(),
            save_memory: false,
        });
        let mut saved = small_agent();
        saved.set_total_episodes(40);
        manager.save_model(&saved, "m", None).unwrap();

        let mut trainer = Trainer::new(TrainerConfig {
            save_interval: 2,
            seed: Some(3),
            ..Default::default()
        })
        .unwrap();
        trainer.initialize(manager.clone(), "m");

        // Attached by name only; the agent itself starts from zero.
        let mut agent = small_agent();
        let stats = trainer
            .train(&mut agent, "self_play", TrainRequest::episodes(2))
            .unwrap();

        assert_eq!(stats.total_episodes, 42);
        assert_eq!(agent.total_episodes(), 42);
        assert_eq!(manager.lifetime_episodes("m"), 42);
    }

    #[test]
    fn test_vs_random_draw_on_tiny_board() {
        // Four cells in one row: alternating pieces can never line up.
        let tiny_agent = || {
            QAgent::new(
                QAgentConfig {
                    hidden_size: 8,
                    seed: Some(2),
                    ..Default::default()
                },
                1,
                4,
            )
        };
        let tiny_trainer = |draw_reward| {
            Trainer::new(TrainerConfig {
                rows: 1,
                cols: 4,
                draw_reward,
                seed: Some(4),
                ..Default::default()
            })
            .unwrap()
        };

        let mut agent = tiny_agent();
        let stats = tiny_trainer(None)
            .train(&mut agent, "vs_random", TrainRequest::episodes(1))
            .unwrap();
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.episodes, 1);
        assert_eq!(agent.memory().len(), 2);
        let last = agent.memory().iter().last().unwrap();
        assert_eq!(last.reward, -1.0);
        assert!(!last.done);

        let mut agent = tiny_agent();
        let stats = tiny_trainer(Some(0.5))
            .train(&mut agent, "vs_random", TrainRequest::episodes(1))
            .unwrap();
        assert_eq!(stats.draws, 1);
        let last = agent.memory().iter().last().unwrap();
        assert_eq!(last.reward, 0.5);
        assert!(last.done);
    }

    #[test]
    fn test_zero_sized_board_is_an_error() {
        let err = Trainer::new(TrainerConfig {
            rows: 0,
            ..Default::default()
        })
        .err()
        .expect("zero rows must be rejected");
        assert!(matches!(err, TrainingError::EmptyBoard { rows: 0, cols: 7 }));
    }
}
