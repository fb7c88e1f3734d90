//! Single-value slots that expire at a deadline.
//!
//! Used for the undo buffer and the transient notice. Replacing or taking the
//! value cancels the pending deadline.

/// Holds at most one value until `expires_at_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimedSlot<T> {
    pending: Option<(T, i64)>,
}

impl<T> Default for TimedSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> TimedSlot<T> {
    /// Stores `value`, overwriting any pending one.
    pub(crate) fn put(&mut self, value: T, now_ms: i64, ttl_ms: i64) {
        self.pending = Some((value, now_ms.saturating_add(ttl_ms)));
    }

    /// Takes the value if it has not expired. An expired value is dropped.
    pub(crate) fn take(&mut self, now_ms: i64) -> Option<T> {
        match self.pending.take() {
            Some((value, expires_at_ms)) if now_ms < expires_at_ms => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get(&self, now_ms: i64) -> Option<&T> {
        self.pending
            .as_ref()
            .filter(|(_, expires_at_ms)| now_ms < *expires_at_ms)
            .map(|(value, _)| value)
    }

    /// Drops the value when its deadline has passed. Returns `true` if it did.
    pub(crate) fn expire(&mut self, now_ms: i64) -> bool {
        let expired = matches!(self.pending, Some((_, expires_at_ms)) if now_ms >= expires_at_ms);
        if expired {
            self.pending = None;
        }
        expired
    }

    /// Cancels the pending value regardless of its deadline.
    pub(crate) fn clear(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
