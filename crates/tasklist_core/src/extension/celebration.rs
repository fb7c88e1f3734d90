//! "All tasks complete" effects.

/// Optional effects fired when the whole list becomes done.
///
/// Every hook defaults to a no-op so a provider only implements what its
/// platform supports.
pub trait CelebrationProvider: Send {
    /// Short audible cue.
    fn play_sound(&mut self) {}

    /// Haptic feedback.
    fn vibrate(&mut self) {}

    /// Decorative particle effect.
    fn confetti(&mut self) {}
}

/// Fires at most once per completion event.
///
/// Disarmed while the list is fully done; re-arms as soon as it is not.
/// Only [`CompletionLatch::observe`] can fire; [`CompletionLatch::settle`]
/// tracks the state without firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompletionLatch {
    armed: bool,
}

impl CompletionLatch {
    /// A list that starts fully done must not celebrate until it changes.
    pub(crate) fn new(all_done: bool) -> Self {
        Self { armed: !all_done }
    }

    /// Feeds the current completion state; returns `true` when the
    /// celebration should fire.
    pub(crate) fn observe(&mut self, all_done: bool) -> bool {
        if !all_done {
            self.armed = true;
            return false;
        }
        std::mem::replace(&mut self.armed, false)
    }

    /// Tracks a completion state reached without a toggle.
    pub(crate) fn settle(&mut self, all_done: bool) {
        self.armed = !all_done;
    }
}
