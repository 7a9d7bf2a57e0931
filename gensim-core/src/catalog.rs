//! Device and job catalog
//!
//! The static registry a node draws from: the devices a user can contribute
//! and the job templates the simulated network hands out. Contents never
//! change at runtime.

use rand::Rng;

use crate::domain::device::Device;
use crate::domain::job::JobTemplate;

/// Devices available to contribute, with throughput relative to RTX 3090-ish
/// baseline hardware
const DEVICES: &[(&str, f64)] = &[
    ("RTX 4090", 1.5),
    ("H100", 2.0),
    ("A100", 1.8),
    ("RTX 3090", 1.2),
    ("MacBook M2", 0.6),
];

/// Job templates the network hands out, with baseline payout in $SY
const JOBS: &[(&str, f64)] = &[
    ("Train ResNet-18 on CIFAR-10", 0.8),
    ("Fine-tune Llama-7B", 2.4),
    ("Run Stable Diffusion inference", 1.2),
    ("Train GPT-2 from scratch", 1.6),
];

/// All devices in the catalog
pub fn devices() -> Vec<Device> {
    DEVICES
        .iter()
        .map(|(name, speed)| Device::new(*name, *speed))
        .collect()
}

/// All job templates in the catalog
pub fn jobs() -> Vec<JobTemplate> {
    JOBS.iter()
        .map(|(name, reward)| JobTemplate::new(*name, *reward))
        .collect()
}

/// Looks up a device by its display name
pub fn device_by_name(name: &str) -> Option<Device> {
    DEVICES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, speed)| Device::new(*n, *speed))
}

/// Default device used when the user picks none
pub fn default_device() -> Device {
    let (name, speed) = DEVICES[0];
    Device::new(name, speed)
}

/// Draws a job template uniformly at random
///
/// The rng is caller-supplied so runs can be seeded for deterministic tests.
pub fn pick_job<R: Rng + ?Sized>(rng: &mut R) -> JobTemplate {
    let (name, reward) = JOBS[rng.gen_range(0..JOBS.len())];
    JobTemplate::new(name, reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_device_lookup() {
        let device = device_by_name("H100").unwrap();
        assert_eq!(device.relative_speed, 2.0);

        assert!(device_by_name("TPU v9").is_none());
    }

    #[test]
    fn test_catalog_is_well_formed() {
        assert!(!devices().is_empty());
        assert!(!jobs().is_empty());
        for device in devices() {
            assert!(device.relative_speed > 0.0);
        }
        for job in jobs() {
            assert!(job.base_reward >= 0.0);
        }
    }

    #[test]
    fn test_pick_job_is_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            assert_eq!(pick_job(&mut a), pick_job(&mut b));
        }
    }

    #[test]
    fn test_pick_job_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(pick_job(&mut rng).name);
        }

        assert_eq!(seen.len(), jobs().len());
    }
}
