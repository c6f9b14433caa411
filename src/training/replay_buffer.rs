use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::ai::Experience;

/// Fixed-capacity ring buffer for storing training experiences.
///
/// Once full, each push overwrites the oldest entry.
pub struct ReplayBuffer {
    buffer: Vec<Experience>,
    capacity: usize,
    position: usize,
    rng: StdRng,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_os_rng())
    }

    pub fn with_rng(capacity: usize, rng: StdRng) -> Self {
        assert!(capacity > 0, "replay capacity must be > 0");
        ReplayBuffer {
            buffer: Vec::with_capacity(capacity),
            capacity,
            position: 0,
            rng,
        }
    }

    /// Add an experience to the buffer. Overwrites oldest when full.
    pub fn push(&mut self, experience: Experience) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(experience);
        } else {
            self.buffer[self.position] = experience;
        }
        self.position = (self.position + 1) % self.capacity;
    }

    /// Sample `batch_size` distinct experiences uniformly at random.
    pub fn sample(&mut self, batch_size: usize) -> Vec<Experience> {
        let len = self.len();
        assert!(batch_size <= len, "Not enough experiences to sample");
        let indices = index::sample(&mut self.rng, len, batch_size);
        indices.iter().map(|i| self.buffer[i].clone()).collect()
    }

    /// Iterate over stored experiences, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        // Until the buffer wraps, storage order is insertion order.
        let split = if self.buffer.len() < self.capacity {
            0
        } else {
            self.position
        };
        let (newer, older) = self.buffer.split_at(split);
        older.iter().chain(newer.iter())
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.position = 0;
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
