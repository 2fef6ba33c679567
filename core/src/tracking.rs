/// Slot-consumption counter for one conversion attempt.
///
/// Every checker and getter records how many stack slots it inspected, on the
/// failure path as well as on success, so the caller can tell where the next
/// argument starts. Create one per attempt; never share one between unrelated
/// conversions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tracking {
    used: usize,
    last: usize,
}

impl Tracking {
    pub const fn new() -> Self {
        Self { used: 0, last: 0 }
    }

    /// Record that `count` more slots were consumed.
    pub fn use_slots(&mut self, count: usize) {
        self.last = count;
        self.used += count;
    }

    /// Total slots consumed so far.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Slots consumed by the most recent `use_slots` call.
    pub fn last(&self) -> usize {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates() {
        let mut tracking = Tracking::new();
        tracking.use_slots(1);
        tracking.use_slots(2);
        assert_eq!(tracking.used(), 3);
        assert_eq!(tracking.last(), 2);
    }
}
