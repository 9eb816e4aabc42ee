use std::fmt::Display;

/// The quantity picked for the displayed product. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Stays at one.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }

    pub fn can_decrement(self) -> bool {
        self.0 > 1
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_floor() {
        assert_eq!(Quantity::ONE.decrement(), Quantity::ONE);
        assert!(!Quantity::ONE.can_decrement());
        assert_eq!(Quantity::new(0), None);
    }

    #[test]
    fn test_increment_then_decrement_is_identity() {
        for value in 2..10 {
            let q = Quantity::new(value).unwrap();
            assert_eq!(q.increment().decrement(), q);
        }
    }

    #[test]
    fn test_increment_saturates() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment(), max);
    }
}
