//! Drag-and-drop reorder capability.

use std::sync::mpsc::{self, Receiver, Sender};

/// One completed drag gesture, in list positions at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderMove {
    pub old_index: usize,
    pub new_index: usize,
}

/// Source of completed drags.
///
/// When no provider is installed, reordering is disabled in the rendered view
/// and the rest of the list keeps working.
pub trait ReorderProvider: Send {
    /// Drains the drags reported since the last call, oldest first.
    fn take_moves(&mut self) -> Vec<ReorderMove>;
}

/// Provider fed through a channel by the host's drag library.
pub struct ChannelReorderProvider {
    rx: Receiver<ReorderMove>,
}

/// Host-side handle of a [`ChannelReorderProvider`].
#[derive(Debug, Clone)]
pub struct ReorderReporter {
    tx: Sender<ReorderMove>,
}

impl ChannelReorderProvider {
    pub fn new() -> (Self, ReorderReporter) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, ReorderReporter { tx })
    }
}

impl ReorderProvider for ChannelReorderProvider {
    fn take_moves(&mut self) -> Vec<ReorderMove> {
        self.rx.try_iter().collect()
    }
}

impl ReorderReporter {
    /// Reports a finished drag. Returns `false` once the provider is gone.
    pub fn report(&self, old_index: usize, new_index: usize) -> bool {
        self.tx
            .send(ReorderMove {
                old_index,
                new_index,
            })
            .is_ok()
    }
}
