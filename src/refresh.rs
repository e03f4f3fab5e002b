//! Pull-to-refresh control.

/// Token for one refresh gesture.
///
/// Not `Clone`: [`RefreshControl::complete`] consumes it, so a gesture can
/// be completed at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a refresh gesture must be completed"]
pub struct RefreshGesture {
    id: u64,
}

#[derive(Debug, Default)]
pub struct RefreshControl {
    next_id: u64,
    outstanding: usize,
    completed: u64,
}

impl RefreshControl {
    /// Start a gesture; the spinner shows until it is completed.
    pub fn pull(&mut self) -> RefreshGesture {
        self.next_id += 1;
        self.outstanding += 1;
        RefreshGesture { id: self.next_id }
    }

    pub fn complete(&mut self, gesture: RefreshGesture) {
        tracing::debug!(gesture = gesture.id, "refresh complete");
        self.outstanding = self.outstanding.saturating_sub(1);
        self.completed += 1;
    }

    pub fn is_refreshing(&self) -> bool {
        self.outstanding > 0
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_retracts_after_completion() {
        let mut control = RefreshControl::default();
        let gesture = control.pull();
        assert!(control.is_refreshing());
        control.complete(gesture);
        assert!(!control.is_refreshing());
        assert_eq!(control.completed(), 1);
    }

    #[test]
    fn overlapping_gestures_each_complete() {
        let mut control = RefreshControl::default();
        let first = control.pull();
        let second = control.pull();
        assert_ne!(first, second);

        control.complete(second);
        assert!(control.is_refreshing());
        control.complete(first);
        assert!(!control.is_refreshing());
        assert_eq!(control.completed(), 2);
    }
}
