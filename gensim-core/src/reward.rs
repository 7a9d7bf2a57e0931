//! Reward model
//!
//! Pure payout function mapping (job, device) to $SY. Proportional, never
//! clamped: a faster device earns more on the same job.

use crate::domain::device::Device;
use crate::domain::job::JobTemplate;

/// Payout for completing `template` on `device`, rounded to 2 decimals
/// for display
pub fn reward(template: &JobTemplate, device: &Device) -> f64 {
    round2(template.base_reward * device.relative_speed)
}

/// Rounds half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_reward_is_proportional() {
        let job = JobTemplate::new("test", 1.2);
        let device = Device::new("baseline", 1.0);
        assert_eq!(reward(&job, &device), 1.2);

        let fast = Device::new("fast", 2.0);
        assert_eq!(reward(&job, &fast), 2.4);
    }

    #[test]
    fn test_reward_rounds_to_two_decimals() {
        let job = JobTemplate::new("test", 0.8);
        let device = Device::new("odd", 1.8);
        // 0.8 * 1.8 = 1.4400000000000002 as f64
        assert_eq!(reward(&job, &device), 1.44);

        let job = JobTemplate::new("test", 1.111);
        let device = Device::new("unit", 1.0);
        assert_eq!(reward(&job, &device), 1.11);
    }

    #[test]
    fn test_reward_matches_base_times_speed_across_catalog() {
        for job in catalog::jobs() {
            for device in catalog::devices() {
                let expected = round2(job.base_reward * device.relative_speed);
                assert_eq!(reward(&job, &device), expected);
            }
        }
    }
}
