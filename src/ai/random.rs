use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::Board;

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, _board: &Board, valid_moves: &[usize]) -> usize {
        *valid_moves
            .choose(&mut self.rng)
            .expect("No legal actions available")
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::with_seed(7);
        let mut board = Board::standard();
        for _ in 0..6 {
            board.make_move(2, Player::One).unwrap();
        }
        let legal = board.valid_moves();

        for _ in 0..100 {
            let action = agent.select_action(&board, &legal);
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent = RandomAgent::with_seed(11);
        let mut board = Board::standard();
        let mut player = Player::One;
        let mut moves = 0;

        loop {
            let legal = board.valid_moves();
            if legal.is_empty() {
                break;
            }
            let col = agent.select_action(&board, &legal);
            let row = board.make_move(col, player).unwrap();
            moves += 1;
            if board.check_winner(player, row, col) {
                break;
            }
            player = player.other();
        }

        assert!(moves <= 42);
    }

    #[test]
    #[should_panic(expected = "No legal actions")]
    fn test_random_agent_empty_moves_panics() {
        let mut agent = RandomAgent::with_seed(0);
        agent.select_action(&Board::standard(), &[]);
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
