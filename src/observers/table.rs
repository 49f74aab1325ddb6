//! # Global observer table.
//!
//! Observers see every dispatched record regardless of its type. Unlike
//! subscribers, an observer is identified for removal by its callback alone;
//! the context is not part of the key.

use crate::error::{BusError, TableKind};
use crate::subscribers::{Callback, Context, Entry, SlotRow};

/// Fixed table of `OBSERVERS` type-agnostic slots.
pub(crate) struct ObserverTable<const OBSERVERS: usize, const PAYLOAD: usize> {
    row: SlotRow<OBSERVERS, PAYLOAD>,
}

impl<const OBSERVERS: usize, const PAYLOAD: usize> ObserverTable<OBSERVERS, PAYLOAD> {
    pub const fn new() -> Self {
        Self {
            row: SlotRow::EMPTY,
        }
    }

    /// Registers an observer in the lowest free slot; returns the slot index.
    pub fn add(&mut self, callback: Callback<PAYLOAD>, context: Context) -> Result<usize, BusError> {
        self.row
            .claim(Entry { callback, context })
            .ok_or(BusError::TableFull {
                table: TableKind::Observers,
                limit: OBSERVERS,
            })
    }

    /// Removes the first slot holding `callback`, whatever its context.
    pub fn remove(&mut self, callback: Callback<PAYLOAD>) -> Result<usize, BusError> {
        self.row
            .release(|e| e.same_callback(callback))
            .ok_or(BusError::NotFound {
                table: TableKind::Observers,
            })
    }

    #[inline]
    pub fn entry(&self, index: usize) -> Option<Entry<PAYLOAD>> {
        self.row.get(index)
    }

    pub fn count(&self) -> usize {
        self.row.used()
    }

    pub fn clear(&mut self) {
        self.row.clear();
    }
}
