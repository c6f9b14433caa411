use tracing::{debug, warn};

use crate::ai::{Agent, Experience, QAgent};
use crate::error::TrainingError;
use crate::game::{Board, GameOutcome, Player};
use crate::training::metrics::EpisodeResult;
use crate::training::move_provider::{HumanInput, MoveProvider};

/// Reward for the move that wins the game for player one.
pub const WIN_REWARD: f32 = 100.0;
/// Reward for a transition that ends with player two winning.
pub const LOSS_REWARD: f32 = -100.0;
/// Shaping penalty on every non-terminal agent move.
pub const STEP_REWARD: f32 = -1.0;

/// Transitions recorded during one episode, plus how it ended.
#[derive(Debug)]
pub struct EpisodeTrace {
    pub experiences: Vec<Experience>,
    pub result: EpisodeResult,
}

/// Who controls player two when the agent holds player one.
pub enum Opponent<'a> {
    Policy(&'a mut dyn Agent),
    Human(&'a mut dyn MoveProvider),
}

/// Play one self-play episode. The agent plays both seats.
///
/// Every move is recorded. A winning move earns [`WIN_REWARD`] when player
/// one made it and [`LOSS_REWARD`] when player two did; all other moves earn
/// [`STEP_REWARD`]. When `draw_reward` is set, the final move of a drawn game
/// is marked terminal with that reward; otherwise it keeps the step penalty.
pub fn play_self_play_episode(
    agent: &mut QAgent,
    board: &mut Board,
    starting_player: Player,
    draw_reward: Option<f32>,
) -> Result<EpisodeTrace, TrainingError> {
    board.reset();
    let mut current = starting_player;
    let mut experiences = Vec::new();

    loop {
        let state = board.board_state();
        let valid_moves = board.valid_moves();
        if valid_moves.is_empty() {
            mark_draw(&mut experiences, draw_reward);
            return Ok(finish(board, experiences, GameOutcome::Draw));
        }

        let action = agent.act(&state, &valid_moves);
        let row = apply(board, action, current, &valid_moves)?;
        let next_state = board.board_state();

        if board.check_winner(current, row, action) {
            let reward = match current {
                Player::One => WIN_REWARD,
                Player::Two => LOSS_REWARD,
            };
            experiences.push(Experience {
                state,
                action,
                reward,
                next_state,
                done: true,
                perspective: current,
            });
            return Ok(finish(board, experiences, GameOutcome::Winner(current)));
        }

        experiences.push(Experience {
            state,
            action,
            reward: STEP_REWARD,
            next_state,
            done: false,
            perspective: current,
        });
        current = current.other();
    }
}

/// Play one episode with the agent as player one against `opponent`.
///
/// Only the agent's own moves are recorded. A win by player one earns
/// [`WIN_REWARD`] on the winning move. A win by player two turns the agent's
/// last recorded transition into a terminal [`LOSS_REWARD`]. Draws follow
/// `draw_reward` as in [`play_self_play_episode`].
///
/// Returns `Ok(None)` if a human opponent cancels mid-game.
pub fn play_opponent_episode(
    agent: &mut QAgent,
    board: &mut Board,
    mut opponent: Opponent<'_>,
    starting_player: Player,
    draw_reward: Option<f32>,
) -> Result<Option<EpisodeTrace>, TrainingError> {
    board.reset();
    let mut current = starting_player;
    let mut experiences: Vec<Experience> = Vec::new();

    loop {
        let state = board.board_state();
        let valid_moves = board.valid_moves();
        if valid_moves.is_empty() {
            mark_draw(&mut experiences, draw_reward);
            return Ok(Some(finish(board, experiences, GameOutcome::Draw)));
        }

        let action = match current {
            Player::One => agent.act(&state, &valid_moves),
            Player::Two => match &mut opponent {
                Opponent::Policy(policy) => policy.select_action(board, &valid_moves),
                Opponent::Human(provider) => {
                    match request_human_move(&mut **provider, board, &valid_moves) {
                        Some(col) => col,
                        None => return Ok(None),
                    }
                }
            },
        };

        let row = apply(board, action, current, &valid_moves)?;
        let next_state = board.board_state();
        let won = board.check_winner(current, row, action);

        match (current, won) {
            (Player::One, true) => {
                experiences.push(Experience {
                    state,
                    action,
                    reward: WIN_REWARD,
                    next_state,
                    done: true,
                    perspective: Player::One,
                });
                return Ok(Some(finish(board, experiences, GameOutcome::Winner(Player::One))));
            }
            (Player::Two, true) => {
                if let Some(last) = experiences.last_mut() {
                    last.reward = LOSS_REWARD;
                    last.next_state = next_state;
                    last.done = true;
                }
                return Ok(Some(finish(board, experiences, GameOutcome::Winner(Player::Two))));
            }
            (Player::One, false) => experiences.push(Experience {
                state,
                action,
                reward: STEP_REWARD,
                next_state,
                done: false,
                perspective: Player::One,
            }),
            (Player::Two, false) => {}
        }
        current = current.other();
    }
}

/// Block on the provider until it supplies a legal column or cancels.
fn request_human_move(
    provider: &mut dyn MoveProvider,
    board: &Board,
    valid_moves: &[usize],
) -> Option<usize> {
    loop {
        match provider.request_move(board, valid_moves) {
            HumanInput::Column(col) if board.is_valid_move(col) => return Some(col),
            HumanInput::Column(col) => {
                warn!(column = col, valid = ?valid_moves, "rejected invalid column");
            }
            HumanInput::Cancel => {
                debug!("move provider cancelled the episode");
                return None;
            }
        }
    }
}

fn apply(
    board: &mut Board,
    action: usize,
    player: Player,
    valid_moves: &[usize],
) -> Result<usize, TrainingError> {
    board
        .make_move(action, player)
        .ok_or_else(|| TrainingError::IllegalAction {
            action,
            legal: valid_moves.to_vec(),
        })
}

fn mark_draw(experiences: &mut [Experience], draw_reward: Option<f32>) {
    if let (Some(reward), Some(last)) = (draw_reward, experiences.last_mut()) {
        last.reward = reward;
        last.done = true;
    }
}

fn finish(board: &Board, experiences: Vec<Experience>, outcome: GameOutcome) -> EpisodeTrace {
    // Recorded transitions skip opponent moves, so count plies on the board.
    let game_length = board.board_state().iter().filter(|&&c| c != 0).count();
    EpisodeTrace {
        experiences,
        result: EpisodeResult {
            outcome,
            game_length,
        },
    }
}
