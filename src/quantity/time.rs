use std::time::Duration;

use chrono::TimeDelta;

quantity!(Hours, via: f64, suffix: "h", precision: 1);

impl Hours {
    /// Convert into a time delta rounded to whole seconds.
    ///
    /// Returns [`None`] when the value does not fit, which includes NaN and infinities.
    #[must_use]
    pub fn to_time_delta(self) -> Option<TimeDelta> {
        let seconds = (self.0 * 3600.0).round();
        if !seconds.is_finite() || seconds.abs() >= 1e15 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let seconds = seconds as i64;
        TimeDelta::try_seconds(seconds)
    }
}

impl From<Duration> for Hours {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64() / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_time_delta_ok() {
        assert_eq!(Hours(6.0).to_time_delta(), Some(TimeDelta::hours(6)));
        assert_eq!(Hours(1.5).to_time_delta(), Some(TimeDelta::minutes(90)));
    }

    #[test]
    fn from_duration_ok() {
        assert_eq!(Hours::from(Duration::from_secs(48 * 3600)), Hours(48.0));
    }

    #[test]
    fn to_time_delta_non_finite() {
        assert_eq!(Hours(f64::INFINITY).to_time_delta(), None);
        assert_eq!(Hours(f64::NAN).to_time_delta(), None);
    }
}
