//! Shared navigation state.
//!
//! One writer (the dispatch path) and any number of readers. Both records
//! live behind a single lock and are only ever replaced whole, so a reader
//! never sees fields from two different decodes.

use std::sync::{PoisonError, RwLock};

use crate::ubx_packets::{NavSolution, ReceiverId};

/// Consistent copy of everything the store holds
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavSnapshot {
    pub navigation: NavSolution,
    pub identity: ReceiverId,
}

/// Latest navigation solution and receiver identity, zero-initialized.
///
/// Construct once and share by reference (or `Arc`) between the decode
/// loop and its consumers.
#[derive(Debug, Default)]
pub struct NavStore {
    state: RwLock<NavSnapshot>,
}

impl NavStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_navigation(&self, solution: NavSolution) {
        // Updates are plain copies and cannot leave the record half-written,
        // so a poisoned lock still guards a consistent value.
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.navigation = solution;
    }

    pub fn update_identity(&self, id: ReceiverId) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.identity = id;
    }

    pub fn snapshot(&self) -> NavSnapshot {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn navigation(&self) -> NavSolution {
        self.snapshot().navigation
    }

    pub fn identity(&self) -> ReceiverId {
        self.snapshot().identity
    }
}
