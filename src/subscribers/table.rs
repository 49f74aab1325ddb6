//! # Per-type subscriber table.
//!
//! One [`SlotRow`] per event type. A subscriber is identified for removal by
//! the `(callback, context)` pair, so the same function may be registered
//! several times on one type with different contexts.
//!
//! ```text
//!   type 0  [ cbA/ctx1 | cbA/ctx2 |    -     | ... ]
//!   type 1  [    -     | cbB/0    |    -     | ... ]
//!   ...
//!   type N  [ ...                                  ]
//! ```

use crate::error::{ArgumentError, BusError, TableKind};
use crate::events::EventType;

use super::slot::{Callback, Context, Entry, SlotRow};

/// Fixed `TYPES × SUBSCRIBERS` grid of subscriber slots.
pub(crate) struct SubscriberTable<const TYPES: usize, const SUBSCRIBERS: usize, const PAYLOAD: usize>
{
    rows: [SlotRow<SUBSCRIBERS, PAYLOAD>; TYPES],
}

impl<const TYPES: usize, const SUBSCRIBERS: usize, const PAYLOAD: usize>
    SubscriberTable<TYPES, SUBSCRIBERS, PAYLOAD>
{
    pub const fn new() -> Self {
        Self {
            rows: [SlotRow::EMPTY; TYPES],
        }
    }

    fn row_index(event_type: EventType) -> Result<usize, BusError> {
        let index = usize::from(event_type);
        if index >= TYPES {
            return Err(ArgumentError::EventTypeOutOfRange {
                event_type,
                limit: TYPES,
            }
            .into());
        }
        Ok(index)
    }

    /// Registers `(callback, context)` for `event_type`; returns the slot index.
    pub fn add(
        &mut self,
        event_type: EventType,
        callback: Callback<PAYLOAD>,
        context: Context,
    ) -> Result<usize, BusError> {
        let row = Self::row_index(event_type)?;
        self.rows[row]
            .claim(Entry { callback, context })
            .ok_or(BusError::TableFull {
                table: TableKind::Subscribers,
                limit: SUBSCRIBERS,
            })
    }

    /// Removes the first slot of `event_type` matching both callback and context.
    pub fn remove(
        &mut self,
        event_type: EventType,
        callback: Callback<PAYLOAD>,
        context: Context,
    ) -> Result<usize, BusError> {
        let row = Self::row_index(event_type)?;
        self.rows[row]
            .release(|e| e.same_callback(callback) && e.context == context)
            .ok_or(BusError::NotFound {
                table: TableKind::Subscribers,
            })
    }

    /// Slot `index` of the row for `event_type`, if used.
    ///
    /// Out-of-range types yield `None`.
    #[inline]
    pub fn entry(&self, event_type: EventType, index: usize) -> Option<Entry<PAYLOAD>> {
        self.rows.get(usize::from(event_type))?.get(index)
    }

    /// Used slots for `event_type`.
    pub fn count(&self, event_type: EventType) -> Result<usize, BusError> {
        let row = Self::row_index(event_type)?;
        Ok(self.rows[row].used())
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventRecord;

    type Table = SubscriberTable<4, 2, 4>;

    fn cb(_: &EventRecord<4>, _: Context) {}
    fn other(_: &EventRecord<4>, _: Context) {}

    #[test]
    fn test_add_rejects_out_of_range_type() {
        let mut table = Table::new();
        let err = table.add(4, cb, Context::NONE).unwrap_err();
        assert_eq!(
            err,
            BusError::InvalidArgument(ArgumentError::EventTypeOutOfRange {
                event_type: 4,
                limit: 4
            })
        );
    }

    #[test]
    fn test_row_full() {
        let mut table = Table::new();
        table.add(1, cb, Context::new(1)).unwrap();
        table.add(1, cb, Context::new(2)).unwrap();
        let err = table.add(1, cb, Context::new(3)).unwrap_err();
        assert_eq!(
            err,
            BusError::TableFull {
                table: TableKind::Subscribers,
                limit: 2
            }
        );
        // other rows are independent
        assert_eq!(table.add(2, cb, Context::NONE), Ok(0));
    }

    #[test]
    fn test_remove_matches_callback_and_context() {
        let mut table = Table::new();
        table.add(0, cb, Context::new(1)).unwrap();
        table.add(0, cb, Context::new(2)).unwrap();

        assert!(table.remove(0, other, Context::new(1)).is_err());
        assert!(table.remove(0, cb, Context::new(3)).is_err());
        assert_eq!(table.remove(0, cb, Context::new(1)), Ok(0));

        assert!(table.entry(0, 0).is_none());
        assert!(table.entry(0, 1).is_some_and(|e| e.context == Context::new(2)));
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut table = Table::new();
        assert_eq!(
            table.remove(3, cb, Context::NONE),
            Err(BusError::NotFound {
                table: TableKind::Subscribers
            })
        );
    }

    #[test]
    fn test_entry_out_of_range_type_is_none() {
        let table = Table::new();
        assert!(table.entry(99, 0).is_none());
    }

    #[test]
    fn test_clear_empties_all_rows() {
        let mut table = Table::new();
        table.add(0, cb, Context::NONE).unwrap();
        table.add(3, other, Context::NONE).unwrap();
        table.clear();
        assert_eq!(table.count(0), Ok(0));
        assert_eq!(table.count(3), Ok(0));
    }
}
