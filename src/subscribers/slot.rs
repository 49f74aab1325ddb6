//! # Callback slots shared by subscriber rows and the observer table.
//!
//! A [`SlotRow`] is a fixed array of optional `(callback, context)` entries.
//!
//! ## Rules
//! - `claim` takes the **lowest free index** (linear scan from 0).
//! - `release` frees the first used slot matching the key; other slots never move.
//! - Dispatch order is slot order, so remove + re-add may move a callback forward.

use crate::events::EventRecord;

/// Callback invoked for a dispatched record.
///
/// Plain function pointers keep the tables allocation-free and give each
/// registration a comparable identity for removal.
pub type Callback<const PAYLOAD: usize> = fn(&EventRecord<PAYLOAD>, Context);

/// Opaque caller-owned token passed back unchanged to a callback.
///
/// The bus never interprets it. Typical uses are an index into caller-owned
/// state or a small discriminator when one callback is registered several times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Context(usize);

impl Context {
    /// No context.
    pub const NONE: Context = Context(0);

    #[inline]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for Context {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// A used slot.
#[derive(Clone, Copy)]
pub(crate) struct Entry<const PAYLOAD: usize> {
    pub callback: Callback<PAYLOAD>,
    pub context: Context,
}

impl<const PAYLOAD: usize> Entry<PAYLOAD> {
    /// Address comparison of the callback.
    ///
    /// Function pointer identity is what the caller registered; the same function
    /// reached through different codegen units may compare unequal.
    #[inline]
    pub fn same_callback(&self, callback: Callback<PAYLOAD>) -> bool {
        self.callback as usize == callback as usize
    }
}

/// Fixed row of `N` slots.
#[derive(Clone, Copy)]
pub(crate) struct SlotRow<const N: usize, const PAYLOAD: usize> {
    slots: [Option<Entry<PAYLOAD>>; N],
}

impl<const N: usize, const PAYLOAD: usize> SlotRow<N, PAYLOAD> {
    pub const EMPTY: Self = Self { slots: [None; N] };

    /// Stores the entry in the first free slot, returning its index.
    ///
    /// `None` when every slot is used.
    pub fn claim(&mut self, entry: Entry<PAYLOAD>) -> Option<usize> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(entry);
        Some(index)
    }

    /// Frees the first used slot for which `matches` holds, returning its index.
    pub fn release(&mut self, matches: impl Fn(&Entry<PAYLOAD>) -> bool) -> Option<usize> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&matches))?;
        self.slots[index] = None;
        Some(index)
    }

    /// Entry at `index`, if that slot is used.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Entry<PAYLOAD>> {
        self.slots.get(index).copied().flatten()
    }

    /// Number of used slots.
    pub fn used(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.slots = [None; N];
    }
}
