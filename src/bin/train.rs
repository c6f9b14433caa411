#![recursion_limit = "256"]

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::prelude::*;

use connect4_rl::ai::QAgent;
use connect4_rl::checkpoint::ModelManager;
use connect4_rl::config::AppConfig;
use connect4_rl::error::CheckpointError;
use connect4_rl::training::metrics::TrainingStats;
use connect4_rl::training::{LineMoveProvider, TrainRequest, Trainer, TrainingMode};

/// Train, evaluate and play against a Connect Four Q-learning agent.
#[derive(Parser)]
#[command(name = "train", about = "Train a Connect Four Q-learning agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v = DEBUG, -vv = TRACE)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a training session
    Train {
        /// Training mode: self_play, vs_random or vs_human
        #[arg(long, default_value = "self_play")]
        mode: String,

        /// Override number of training episodes
        #[arg(long)]
        episodes: Option<usize>,

        /// Model name to save under (generated if omitted)
        #[arg(long)]
        model: Option<String>,

        /// Continue from the saved model of the same name
        #[arg(long, requires = "model")]
        resume: bool,

        /// Override learning rate
        #[arg(long)]
        lr: Option<f64>,

        /// Terminal reward for drawn games
        #[arg(long)]
        draw_reward: Option<f32>,

        /// Seed the agent and trainer for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play greedy games against a random opponent
    Evaluate {
        #[arg(long)]
        model: String,

        #[arg(long)]
        games: Option<usize>,
    },

    /// Play against a saved model from the terminal; it learns from the games
    Play {
        #[arg(long)]
        model: String,

        #[arg(long, default_value_t = 1)]
        games: usize,

        /// Don't write the updated model back
        #[arg(long)]
        no_save: bool,
    },

    /// List saved models
    List,

    /// Delete a saved model
    Delete { name: String },

    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Train {
            mode,
            episodes,
            model,
            resume,
            lr,
            draw_reward,
            seed,
        } => {
            // Apply CLI overrides
            if let Some(lr) = lr {
                app_config.agent.learning_rate = lr;
            }
            if draw_reward.is_some() {
                app_config.training.draw_reward = draw_reward;
            }
            if seed.is_some() {
                app_config.agent.seed = seed;
                app_config.training.seed = seed.map(|s| s.wrapping_add(1));
            }
            app_config.validate().context("invalid configuration")?;
            run_train(&app_config, &mode, episodes, model.as_deref(), resume)
        }
        Command::Evaluate { model, games } => run_evaluate(&app_config, &model, games),
        Command::Play {
            model,
            games,
            no_save,
        } => run_play(&app_config, &model, games, no_save),
        Command::List => run_list(&app_config),
        Command::Delete { name } => {
            let manager = ModelManager::new(app_config.models.clone());
            if manager
                .delete_model(&name)
                .with_context(|| format!("deleting model '{name}'"))?
            {
                println!("Deleted {name}");
                Ok(())
            } else {
                bail!("no saved model named '{name}'")
            }
        }
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

fn new_agent(config: &AppConfig) -> QAgent {
    QAgent::new(
        config.agent.clone(),
        config.training.rows,
        config.training.cols,
    )
}

fn run_train(
    config: &AppConfig,
    mode: &str,
    episodes: Option<usize>,
    model: Option<&str>,
    resume: bool,
) -> Result<()> {
    let manager = ModelManager::new(config.models.clone());
    let name = manager.generate_model_name(model);
    let mut agent = new_agent(config);

    if resume {
        match manager.load_model(&name, &mut agent) {
            Ok(metadata) => info!(model = %name, episodes = metadata.episodes, "resuming"),
            Err(CheckpointError::ModelNotFound { .. }) => {
                warn!(model = %name, "no saved model found, starting fresh")
            }
            Err(e) => return Err(e).with_context(|| format!("loading model '{name}'")),
        }
    }

    let mut trainer =
        Trainer::new(config.training.clone()).context("creating trainer")?;
    trainer.initialize(manager.clone(), name.as_str());

    let stdin = io::stdin();
    let mut provider = LineMoveProvider::new(stdin.lock(), io::stdout());
    let request = if mode == TrainingMode::VsHuman.as_str() {
        TrainRequest::human(&mut provider).with_episodes(episodes.unwrap_or(1))
    } else {
        TrainRequest::episodes(episodes.unwrap_or(config.training.episodes))
    };

    let stats = trainer
        .train(&mut agent, mode, request)
        .with_context(|| format!("{mode} training"))?;
    print_stats("Training", &stats);

    let path = manager
        .save_model(&agent, &name, Some(stats.win_rate))
        .with_context(|| format!("saving model '{name}'"))?;
    println!("Saved model to {}", path.display());

    let eval = trainer
        .evaluate(&mut agent, config.training.eval_games)
        .context("evaluating against random")?;
    print_stats("Eval vs random", &eval);
    Ok(())
}

fn run_evaluate(config: &AppConfig, model: &str, games: Option<usize>) -> Result<()> {
    let manager = ModelManager::new(config.models.clone());
    let mut agent = new_agent(config);
    manager
        .load_model(model, &mut agent)
        .with_context(|| format!("loading model '{model}'"))?;

    let mut trainer =
        Trainer::new(config.training.clone()).context("creating trainer")?;
    let stats = trainer
        .evaluate(&mut agent, games.unwrap_or(config.training.eval_games))
        .context("evaluating against random")?;
    print_stats("Eval vs random", &stats);
    Ok(())
}

fn run_play(config: &AppConfig, model: &str, games: usize, no_save: bool) -> Result<()> {
    let manager = ModelManager::new(config.models.clone());
    let mut agent = new_agent(config);
    manager
        .load_model(model, &mut agent)
        .with_context(|| format!("loading model '{model}'"))?;

    println!("You are O. Columns are numbered along the bottom.");
    let stdin = io::stdin();
    let mut provider = LineMoveProvider::new(stdin.lock(), io::stdout());
    let mut trainer =
        Trainer::new(config.training.clone()).context("creating trainer")?;
    trainer.initialize(manager.clone(), model);

    let stats = trainer
        .train_mode(
            &mut agent,
            TrainingMode::VsHuman,
            TrainRequest::human(&mut provider).with_episodes(games),
        )
        .context("playing against the agent")?;
    print_stats("Your games", &stats);

    if !no_save && stats.episodes > 0 {
        manager
            .save_model(&agent, model, Some(stats.win_rate))
            .with_context(|| format!("saving model '{model}'"))?;
    }
    Ok(())
}

fn run_list(config: &AppConfig) -> Result<()> {
    let manager = ModelManager::new(config.models.clone());
    let models = manager.list_saved_models().context("listing saved models")?;
    if models.is_empty() {
        println!("No saved models in {}", manager.models_dir().display());
        return Ok(());
    }
    for (name, metadata) in models {
        let win_rate = metadata
            .win_rate
            .map(|w| format!("{:.1}%", w * 100.0))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{name:<32} episodes: {:>7}  epsilon: {:.3}  win rate: {win_rate}",
            metadata.episodes, metadata.epsilon
        );
    }
    Ok(())
}

fn print_stats(label: &str, stats: &TrainingStats) {
    println!(
        "{label}: {} games | {} wins, {} losses, {} draws | win rate {:.1}% | lifetime episodes {}",
        stats.episodes,
        stats.wins,
        stats.losses,
        stats.draws,
        stats.win_rate * 100.0,
        stats.total_episodes,
    );
    if let Some(eps) = stats.final_epsilon {
        println!("Final epsilon: {eps:.4}");
    }
}
