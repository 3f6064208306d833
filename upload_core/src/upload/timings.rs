use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Artificial delays of the simulated pipeline, in simulated milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTimings {
    pub intake_delay_ms: u64,
    pub validation_delay_ms: u64,
    pub storage_delay_ms: u64,
    pub min_transfer_ms: u64,
    pub max_transfer_ms: u64,
    pub transfer_steps: u32,
    pub bytes_per_second: u64,
}

impl Default for SimulationTimings {
    fn default() -> Self {
        Self {
            intake_delay_ms: 300,
            validation_delay_ms: 800,
            storage_delay_ms: 500,
            min_transfer_ms: 1000,
            max_transfer_ms: 5000,
            transfer_steps: 20,
            bytes_per_second: 1024 * 1024,
        }
    }
}

impl SimulationTimings {
    pub fn intake_delay(&self) -> Duration {
        Duration::from_millis(self.intake_delay_ms)
    }

    pub fn validation_delay(&self) -> Duration {
        Duration::from_millis(self.validation_delay_ms)
    }

    pub fn storage_delay(&self) -> Duration {
        Duration::from_millis(self.storage_delay_ms)
    }
}
