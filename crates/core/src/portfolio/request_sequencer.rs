use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Ticket identifying one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn sequence(&self) -> u64 {
        self.0
    }
}

/// Orders overlapping fetches so a slow, older response cannot overwrite the
/// result of a newer one that already landed.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token greater than every token issued before it.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Runs `apply` if `token` is newer than the last applied token.
    /// Returns whether it ran.
    pub fn apply_if_current<F: FnOnce()>(&self, token: RequestToken, apply: F) -> bool {
        let mut applied = match self.applied.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if token.0 <= *applied {
            return false;
        }
        *applied = token.0;
        apply();
        true
    }

    /// Convenience check without a side effect.
    pub fn try_apply(&self, token: RequestToken) -> bool {
        self.apply_if_current(token, || {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let sequencer = RequestSequencer::new();

        let first = sequencer.begin();
        let second = sequencer.begin();

        assert_eq!(first.sequence(), 1);
        assert!(second > first);
    }

    #[test]
    fn test_in_order_completion_applies_both() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(sequencer.try_apply(first));
        assert!(sequencer.try_apply(second));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(sequencer.try_apply(second));
        assert!(!sequencer.try_apply(first));
    }

    #[test]
    fn test_token_applies_once() {
        let sequencer = RequestSequencer::new();
        let token = sequencer.begin();

        assert!(sequencer.try_apply(token));
        assert!(!sequencer.try_apply(token));
    }

    #[test]
    fn test_apply_closure_skipped_for_stale_token() {
        let sequencer = RequestSequencer::new();
        let old = sequencer.begin();
        let new = sequencer.begin();
        let mut hits = Vec::new();

        sequencer.apply_if_current(new, || hits.push("new"));
        sequencer.apply_if_current(old, || hits.push("old"));

        assert_eq!(hits, vec!["new"]);
    }
}
