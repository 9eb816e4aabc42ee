/// Edge-triggered observer of the cart count.
///
/// The first value seen is the baseline and never fires, so mounting a controller on a
/// non-empty cart does not produce a notification. Afterwards every new value fires once.
#[derive(Debug, Default)]
pub struct CountObserver {
    fired_once: bool,
    last: u64,
}

impl CountObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `count` and reports whether it is a change after the baseline.
    pub fn observe(&mut self, count: u64) -> bool {
        if !self.fired_once {
            self.fired_once = true;
            self.last = count;
            return false;
        }
        let changed = count != self.last;
        self.last = count;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_is_baseline() {
        let mut observer = CountObserver::new();
        assert!(!observer.observe(2));
        assert!(observer.observe(5));
        assert!(!observer.observe(5));
        assert!(observer.observe(0));
    }

    #[test]
    fn test_zero_baseline_does_not_fire() {
        let mut observer = CountObserver::new();
        assert!(!observer.observe(0));
        assert!(observer.observe(1));
    }
}
