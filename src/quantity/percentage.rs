quantity!(Percentage, via: f64, suffix: "%", precision: 0);

impl Percentage {
    pub const EMPTY: Self = Self(0.0);
    pub const FULL: Self = Self(100.0);

    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0
    }
}
