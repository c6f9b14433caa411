use burn::prelude::*;
use burn::tensor::TensorData;

/// Encode one flattened board state as a `[1, cells]` tensor.
///
/// Cell codes are fed to the network as-is: 0.0 empty, 1.0 player one,
/// 2.0 player two.
pub fn encode_state<B: Backend>(state: &[u8], device: &B::Device) -> Tensor<B, 2> {
    encode_states_batch::<B, _>(&[state], device)
}

/// Encode multiple flattened board states as a `[batch, cells]` tensor.
///
/// All states must have the same length.
pub fn encode_states_batch<B: Backend, S: AsRef<[u8]>>(
    states: &[S],
    device: &B::Device,
) -> Tensor<B, 2> {
    let batch_size = states.len();
    let width = states.first().map(|s| s.as_ref().len()).unwrap_or(0);
    let mut flat = Vec::with_capacity(batch_size * width);
    for state in states {
        let state = state.as_ref();
        assert_eq!(state.len(), width, "board states must share one size");
        flat.extend(state.iter().map(|&c| c as f32));
    }
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([batch_size as i32, width as i32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::game::{Board, Player};

    type TestBackend = NdArray;

    #[test]
    fn test_encode_initial_state_shape() {
        let state = Board::standard().board_state();
        let device = Default::default();
        let tensor = encode_state::<TestBackend>(&state, &device);
        assert_eq!(tensor.shape().dims, [1, 42]);
    }

    #[test]
    fn test_encode_uses_cell_codes() {
        let mut board = Board::standard();
        board.make_move(3, Player::One).unwrap();
        board.make_move(3, Player::Two).unwrap();
        let device = Default::default();
        let data: Vec<f32> = encode_state::<TestBackend>(&board.board_state(), &device)
            .into_data()
            .to_vec()
            .unwrap();

        assert_eq!(data[5 * 7 + 3], 1.0);
        assert_eq!(data[4 * 7 + 3], 2.0);
        assert_eq!(data.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    #[test]
    fn test_encode_batch() {
        let s1 = Board::standard().board_state();
        let mut board = Board::standard();
        board.make_move(0, Player::One).unwrap();
        let s2 = board.board_state();
        let device = Default::default();
        let batch = encode_states_batch::<TestBackend, _>(&[s1, s2], &device);
        assert_eq!(batch.shape().dims, [2, 42]);
    }
}
