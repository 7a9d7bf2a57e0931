//! Job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job template from the catalog
///
/// Immutable; drawn uniformly at random when a new job starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    pub name: String,

    /// Payout for completing the job on the baseline device
    pub base_reward: f64,
}

impl JobTemplate {
    pub fn new(name: impl Into<String>, base_reward: f64) -> Self {
        Self {
            name: name.into(),
            base_reward,
        }
    }
}

/// A job currently being executed by the node
///
/// Created when a job is selected; destroyed when it completes or the node
/// stops. At most one exists per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningJob {
    pub id: Uuid,
    pub template: JobTemplate,
    pub total_steps: u32,
    pub completed_steps: u32,
}

impl RunningJob {
    /// Creates a fresh job instance with no completed steps
    pub fn new(template: JobTemplate, total_steps: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            template,
            total_steps,
            completed_steps: 0,
        }
    }

    /// Progress through the job as a percentage in [0, 100]
    pub fn progress_percent(&self) -> f64 {
        100.0 * f64::from(self.completed_steps) / f64::from(self.total_steps)
    }

    /// Whether every step has executed
    pub fn is_complete(&self) -> bool {
        self.completed_steps >= self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        let mut job = RunningJob::new(JobTemplate::new("test", 1.0), 12);
        assert_eq!(job.progress_percent(), 0.0);

        job.completed_steps = 6;
        assert_eq!(job.progress_percent(), 50.0);

        job.completed_steps = 12;
        assert_eq!(job.progress_percent(), 100.0);
        assert!(job.is_complete());
    }

    #[test]
    fn test_progress_first_step_of_twelve() {
        let mut job = RunningJob::new(JobTemplate::new("test", 1.0), 12);
        job.completed_steps = 1;
        assert!((job.progress_percent() - 8.33).abs() < 0.01);
    }
}
