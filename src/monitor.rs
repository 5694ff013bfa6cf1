//! Freshness of the derived state, owned by a single rendering surface.

use std::time::{Duration, Instant};

use crate::core::state::EnergyState;

/// What a renderer should show.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reading {
    /// The latest poll succeeded.
    Live(EnergyState),

    /// The latest poll failed, but the last successful one is recent enough.
    LastKnown { state: EnergyState, age: Duration },

    /// Nothing recent enough to show.
    Offline {
        /// Age of the last successful poll, if any.
        last_seen: Option<Duration>,
    },
}

#[derive(Copy, Clone)]
struct Success {
    at: Instant,
    state: EnergyState,
}

pub struct Monitor {
    freshness_window: Duration,
    last_success: Option<Success>,
    is_failing: bool,
}

impl Monitor {
    pub const fn new(freshness_window: Duration) -> Self {
        Self { freshness_window, last_success: None, is_failing: false }
    }

    pub fn record_success(&mut self, at: Instant, state: EnergyState) {
        self.last_success = Some(Success { at, state });
        self.is_failing = false;
    }

    pub fn record_failure(&mut self) {
        self.is_failing = true;
    }

    pub fn reading(&self, now: Instant) -> Reading {
        let Some(success) = self.last_success else {
            return Reading::Offline { last_seen: None };
        };
        let age = now.saturating_duration_since(success.at);
        if age > self.freshness_window {
            Reading::Offline { last_seen: Some(age) }
        } else if self.is_failing {
            Reading::LastKnown { state: success.state, age }
        } else {
            Reading::Live(success.state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::state::BatteryDirection,
        quantity::{percentage::Percentage, power::Watts},
    };

    const WINDOW: Duration = Duration::from_secs(6);

    fn state() -> EnergyState {
        EnergyState {
            solar: Watts(320.0),
            home_load: Watts(410.0),
            battery_percent: Percentage(55.0),
            grid_flow: Watts::ZERO,
            grid_significant: false,
            battery_flow: Watts::ZERO,
            battery_direction: BatteryDirection::Idle,
            time_to_empty: None,
        }
    }

    #[test]
    fn never_succeeded_is_offline() {
        let mut monitor = Monitor::new(WINDOW);
        assert_eq!(monitor.reading(Instant::now()), Reading::Offline { last_seen: None });
        monitor.record_failure();
        assert_eq!(monitor.reading(Instant::now()), Reading::Offline { last_seen: None });
    }

    #[test]
    fn live_after_success() {
        let mut monitor = Monitor::new(WINDOW);
        let now = Instant::now();
        monitor.record_success(now, state());
        assert_eq!(monitor.reading(now), Reading::Live(state()));
        assert_eq!(monitor.reading(now + Duration::from_secs(3)), Reading::Live(state()));
    }

    #[test]
    fn last_known_after_failure_within_window() {
        let mut monitor = Monitor::new(WINDOW);
        let now = Instant::now();
        monitor.record_success(now, state());
        monitor.record_failure();
        let age = Duration::from_secs(3);
        assert_eq!(monitor.reading(now + age), Reading::LastKnown { state: state(), age });
    }

    #[test]
    fn window_boundary_is_fresh() {
        let mut monitor = Monitor::new(WINDOW);
        let now = Instant::now();
        monitor.record_success(now, state());
        monitor.record_failure();
        assert_eq!(
            monitor.reading(now + WINDOW),
            Reading::LastKnown { state: state(), age: WINDOW },
        );
    }

    #[test]
    fn offline_beyond_window() {
        let mut monitor = Monitor::new(WINDOW);
        let now = Instant::now();
        monitor.record_success(now, state());
        let age = Duration::from_secs(7);
        assert_eq!(monitor.reading(now + age), Reading::Offline { last_seen: Some(age) });
        monitor.record_failure();
        assert_eq!(monitor.reading(now + age), Reading::Offline { last_seen: Some(age) });
    }

    #[test]
    fn recovers_after_success() {
        let mut monitor = Monitor::new(WINDOW);
        let now = Instant::now();
        monitor.record_success(now, state());
        monitor.record_failure();
        let later = now + Duration::from_secs(30);
        monitor.record_success(later, state());
        assert_eq!(monitor.reading(later), Reading::Live(state()));
    }
}
