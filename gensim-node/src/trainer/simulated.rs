//! Simulated trainer
//!
//! Produces a plausible-looking descending loss curve with a little seeded
//! noise. Never fails and holds no real resources.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::StepError;
use crate::trainer::Trainer;

/// Starting loss for every job
const INITIAL_LOSS: f64 = 2.4;

/// Loss shed per step
const DECAY_PER_STEP: f64 = 0.2;

/// Loss never drops below this
const LOSS_FLOOR: f64 = 0.05;

/// Default trainer: a seeded synthetic loss curve
pub struct SimulatedTrainer {
    rng: StdRng,
    /// Smoothed noise carried between steps of one job
    momentum: f64,
}

impl SimulatedTrainer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, momentum: 0.0 }
    }
}

#[async_trait]
impl Trainer for SimulatedTrainer {
    async fn step(&mut self, step_index: u32) -> std::result::Result<f64, StepError> {
        let jitter: f64 = self.rng.gen_range(-0.05..0.05);
        self.momentum = 0.5 * self.momentum + jitter;

        let loss = INITIAL_LOSS - DECAY_PER_STEP * f64::from(step_index) + self.momentum;
        Ok(loss.max(LOSS_FLOOR))
    }

    fn reset(&mut self) {
        self.momentum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_loss_trends_downward() {
        let mut trainer = SimulatedTrainer::new(Some(1));

        let first = trainer.step(1).await.unwrap();
        let last = trainer.step(12).await.unwrap();

        assert!(first > last);
        assert!(last >= LOSS_FLOOR);
    }

    #[tokio::test]
    async fn test_seeded_trainers_agree() {
        let mut a = SimulatedTrainer::new(Some(9));
        let mut b = SimulatedTrainer::new(Some(9));

        for step in 1..=12 {
            assert_eq!(a.step(step).await.unwrap(), b.step(step).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_reset_clears_momentum() {
        let mut trainer = SimulatedTrainer::new(Some(3));
        for step in 1..=6 {
            trainer.step(step).await.unwrap();
        }

        trainer.reset();
        assert_eq!(trainer.momentum, 0.0);
    }
}
