//! Synthetic transfer progress
//!
//! The schedule is a pure function of the file size: its total duration scales
//! at `bytes_per_second`, clamped to `[min_transfer_ms, max_transfer_ms]`, and
//! is split into `transfer_steps` equal ticks. Very large files still finish
//! within the upper bound.

use std::time::Duration;

use super::timings::SimulationTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTick {
    pub step: u32,
    pub delay: Duration,
    pub percent: u8,
}

impl ProgressTick {
    pub fn is_final(&self) -> bool {
        self.percent == 100
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSchedule {
    total: Duration,
    steps: u32,
}

impl TransferSchedule {
    pub fn for_size(size: u64, timings: &SimulationTimings) -> Self {
        let rate = timings.bytes_per_second.max(1) as u128;
        let scaled_ms = (size as u128 * 1000) / rate;
        let clamped_ms = scaled_ms.clamp(
            timings.min_transfer_ms as u128,
            timings.max_transfer_ms.max(timings.min_transfer_ms) as u128,
        ) as u64;

        Self {
            total: Duration::from_millis(clamped_ms),
            steps: timings.transfer_steps.max(1),
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn step_duration(&self) -> Duration {
        self.total / self.steps
    }

    pub fn ticks(&self) -> impl Iterator<Item = ProgressTick> {
        let steps = self.steps;
        let delay = self.step_duration();
        (1..=steps).map(move |step| ProgressTick {
            step,
            delay,
            percent: ((step as u64 * 100) / steps as u64).min(100) as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_scales_with_size() {
        let timings = SimulationTimings::default();

        let schedule = TransferSchedule::for_size(3 * 1024 * 1024, &timings);
        assert_eq!(schedule.total(), Duration::from_millis(3000));
        assert_eq!(schedule.step_duration(), Duration::from_millis(150));
    }

    #[test]
    fn test_duration_is_clamped() {
        let timings = SimulationTimings::default();

        assert_eq!(TransferSchedule::for_size(0, &timings).total(), Duration::from_millis(1000));
        assert_eq!(TransferSchedule::for_size(1024, &timings).total(), Duration::from_millis(1000));
        assert_eq!(
            TransferSchedule::for_size(u64::MAX, &timings).total(),
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn test_ticks_are_even_and_end_at_100() {
        let timings = SimulationTimings::default();
        let schedule = TransferSchedule::for_size(2_000_000, &timings);

        let ticks: Vec<ProgressTick> = schedule.ticks().collect();
        assert_eq!(ticks.len(), 20);
        assert!(ticks.iter().enumerate().all(|(i, t)| t.step == i as u32 + 1));
        assert_eq!(ticks[0].percent, 5);
        assert_eq!(ticks[9].percent, 50);
        assert!(ticks.iter().all(|t| t.delay == schedule.step_duration()));
        assert!(ticks.windows(2).all(|w| w[0].percent < w[1].percent));

        let last = ticks.last().unwrap();
        assert_eq!(last.percent, 100);
        assert!(last.is_final());
        assert_eq!(ticks.iter().filter(|t| t.is_final()).count(), 1);
    }

    #[test]
    fn test_uneven_step_count() {
        let timings = SimulationTimings {
            transfer_steps: 3,
            ..SimulationTimings::default()
        };
        let percents: Vec<u8> = TransferSchedule::for_size(0, &timings)
            .ticks()
            .map(|t| t.percent)
            .collect();
        assert_eq!(percents, vec![33, 66, 100]);
    }
}
