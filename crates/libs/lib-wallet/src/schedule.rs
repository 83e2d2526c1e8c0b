//! Manual-initialisation retry schedule
//!
//! Attempts happen immediately, after each one-shot delay, and on every
//! multiple of the period, all measured from mount. Coinciding offsets are
//! attempted once. With the defaults the offsets are
//! `0, 500, 2000, 3000, 6000, 9000, ...` milliseconds.

use std::time::Duration;

use crate::config::WalletConfig;

/// Infinite iterator over attempt offsets from mount.
#[derive(Clone, Debug)]
pub struct ManualInitSchedule {
    fixed: Vec<u64>,
    fixed_idx: usize,
    period: u64,
    next_periodic: u64,
    last: Option<u64>,
}

impl ManualInitSchedule {
    pub fn new(delays_ms: &[u64], period_ms: u64) -> Self {
        let mut fixed = delays_ms.to_vec();
        fixed.sort_unstable();
        fixed.dedup();
        let period = period_ms.max(1);

        Self {
            fixed,
            fixed_idx: 0,
            period,
            next_periodic: period,
            last: None,
        }
    }

    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(&config.manual_init_delays_ms, config.manual_init_period_ms)
    }

    /// Waits between consecutive attempts, starting with a zero wait.
    pub fn waits(self) -> impl Iterator<Item = Duration> {
        let mut previous = Duration::ZERO;
        self.map(move |offset| {
            let wait = offset.saturating_sub(previous);
            previous = offset;
            wait
        })
    }
}

impl Iterator for ManualInitSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let offset = match self.last {
            None => 0,
            Some(last) => {
                while self.fixed.get(self.fixed_idx).is_some_and(|&f| f <= last) {
                    self.fixed_idx += 1;
                }
                while self.next_periodic <= last {
                    self.next_periodic += self.period;
                }
                match self.fixed.get(self.fixed_idx) {
                    Some(&fixed) if fixed < self.next_periodic => fixed,
                    _ => self.next_periodic,
                }
            }
        };

        self.last = Some(offset);
        Some(Duration::from_millis(offset))
    }
}
