use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;

use crate::quantity::power::{Kilowatts, Watts};

/// Power in kilowatts with a single decimal and no spacing, like `1.2kW`.
pub struct CompactPower(pub Watts);

impl Display for CompactPower {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}kW", Kilowatts::from(self.0).0)
    }
}

/// Hours and zero-padded minutes, like `6h05m`.
pub struct CompactDuration(pub TimeDelta);

impl Debug for CompactDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for CompactDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.0.num_minutes().max(0);
        write!(f, "{}h{:02}m", minutes / 60, minutes % 60)
    }
}
