//! Batched reward history for the plotting boundary
//!
//! Episode rewards are averaged over fixed-size batches of consecutive
//! episodes and appended to a fixed-capacity buffer. Once the buffer is full
//! further batches are dropped, so a plot consumer always sees at most
//! `capacity` points.

/// Fixed-capacity buffer of per-batch mean episodic rewards
#[derive(Debug, Clone)]
pub struct RewardHistory {
    capacity: usize,
    batch_size: usize,
    points: Vec<f64>,
    batch_sum: f64,
    batch_count: usize,
}

impl RewardHistory {
    /// Create a history holding up to `capacity` points, each the mean of
    /// `batch_size` consecutive episode rewards. A zero batch size is
    /// treated as one.
    pub fn new(capacity: usize, batch_size: usize) -> Self {
        Self {
            capacity,
            batch_size: batch_size.max(1),
            points: Vec::with_capacity(capacity),
            batch_sum: 0.0,
            batch_count: 0,
        }
    }

    /// Fold one episode's total reward into the current batch.
    pub fn record_episode(&mut self, total_reward: f64) {
        self.batch_sum += total_reward;
        self.batch_count += 1;
        if self.batch_count >= self.batch_size {
            if self.points.len() < self.capacity {
                self.points.push(self.batch_sum / self.batch_count as f64);
            }
            self.batch_sum = 0.0;
            self.batch_count = 0;
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn into_points(self) -> Vec<f64> {
        self.points
    }
}
