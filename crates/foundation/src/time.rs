/// Engine time in seconds since the globe was mounted.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Self = Time(0.0);

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn advanced(self, dt_s: f64) -> Self {
        Time(self.0 + dt_s.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn advancing_ignores_negative_deltas() {
        let t = Time(1.0).advanced(-5.0);
        assert_eq!(t, Time(1.0));
        assert_eq!(Time(1.0).advanced(0.5).seconds(), 1.5);
    }
}
