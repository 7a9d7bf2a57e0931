//! Node configuration
//!
//! Defines all configurable parameters for a node including step pacing,
//! job sizing, and the device the node contributes.

use std::time::Duration;

/// Node configuration
///
/// All timings are configurable so tests can run under tokio's paused clock
/// and demos can be sped up.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Catalog name of the device this node contributes
    pub device: String,

    /// Steps each job is decomposed into
    pub steps_per_job: u32,

    /// Pacing delay between steps on a baseline (speed 1.0) device
    ///
    /// The effective delay is divided by the device's relative speed.
    pub base_step_delay: Duration,

    /// How long the completion celebration stays up before auto-clearing
    pub celebrate_duration: Duration,

    /// Seed for job selection and simulated metrics; None draws from entropy
    pub seed: Option<u64>,

    /// URL appended to the share string
    pub share_url: String,
}

impl NodeConfig {
    /// Creates a new configuration with defaults for the given device
    pub fn new(device: String) -> Self {
        Self {
            device,
            steps_per_job: 12,
            base_step_delay: Duration::from_millis(600),
            celebrate_duration: Duration::from_secs(2),
            seed: None,
            share_url: "https://playground.gensyn.ai".to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables (all optional):
    /// - GENSIM_DEVICE (default: first catalog device)
    /// - GENSIM_STEPS_PER_JOB (default: 12)
    /// - GENSIM_STEP_DELAY_MS (default: 600)
    /// - GENSIM_CELEBRATE_MS (default: 2000)
    /// - GENSIM_SEED (default: unset, entropy)
    /// - GENSIM_SHARE_URL
    pub fn from_env() -> anyhow::Result<Self> {
        let device = std::env::var("GENSIM_DEVICE")
            .unwrap_or_else(|_| gensim_core::catalog::default_device().name);

        let mut config = Self::new(device);

        if let Some(steps) = std::env::var("GENSIM_STEPS_PER_JOB")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.steps_per_job = steps;
        }

        if let Some(delay) = std::env::var("GENSIM_STEP_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.base_step_delay = Duration::from_millis(delay);
        }

        if let Some(celebrate) = std::env::var("GENSIM_CELEBRATE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.celebrate_duration = Duration::from_millis(celebrate);
        }

        config.seed = std::env::var("GENSIM_SEED")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        if let Ok(url) = std::env::var("GENSIM_SHARE_URL") {
            config.share_url = url;
        }

        Ok(config)
    }

    /// Pins the random seed for deterministic runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the baseline pacing delay
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.base_step_delay = delay;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.device.is_empty() {
            anyhow::bail!("device cannot be empty");
        }

        if gensim_core::catalog::device_by_name(&self.device).is_none() {
            anyhow::bail!("device '{}' is not in the catalog", self.device);
        }

        if self.steps_per_job == 0 {
            anyhow::bail!("steps_per_job must be greater than 0");
        }

        if self.base_step_delay.is_zero() {
            anyhow::bail!("base_step_delay must be greater than 0");
        }

        if self.share_url.is_empty() {
            anyhow::bail!("share_url cannot be empty");
        }

        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::new(gensim_core::catalog::default_device().name)
    }
}
