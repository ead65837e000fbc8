use crate::types::RecordIndex;

/// Position of the current record, inactive when the collection is empty.
///
/// Every method takes the live length and keeps the position inside
/// `0..len`; navigation clamps at the boundaries instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(Option<RecordIndex>);

impl Cursor {
    /// Cursor pointing at `index`.
    pub fn at(index: RecordIndex) -> Self {
        Self(Some(index))
    }

    /// Cursor on the last record, inactive when `len` is zero.
    pub fn at_last(len: usize) -> Self {
        Self(len.checked_sub(1))
    }

    /// Current position, `None` when inactive.
    pub fn index(self) -> Option<RecordIndex> {
        self.0
    }

    /// Moves to the first record.
    pub fn first(&mut self, len: usize) -> Option<RecordIndex> {
        self.0 = if len == 0 { None } else { Some(0) };
        self.0
    }

    /// Moves one record back, staying on the first at the boundary.
    pub fn prev(&mut self, len: usize) -> Option<RecordIndex> {
        self.0 = if len == 0 {
            None
        } else {
            Some(self.0.unwrap_or(0).saturating_sub(1))
        };
        self.0
    }

    /// Moves one record forward, staying on the last at the boundary.
    pub fn next(&mut self, len: usize) -> Option<RecordIndex> {
        self.0 = if len == 0 {
            None
        } else {
            Some((self.0.map_or(0, |i| i + 1)).min(len - 1))
        };
        self.0
    }

    /// Moves to the last record.
    pub fn last(&mut self, len: usize) -> Option<RecordIndex> {
        self.0 = len.checked_sub(1);
        self.0
    }

    /// Re-clamps after the record at the cursor was removed.
    ///
    /// The position is kept so the cursor lands on the record that shifted
    /// into the freed slot; deleting the last record retreats by one, and
    /// the cursor goes inactive when the collection empties.
    pub fn after_remove(&mut self, new_len: usize) {
        self.0 = match self.0 {
            Some(_) if new_len == 0 => None,
            Some(i) if i >= new_len => Some(new_len - 1),
            keep => keep,
        };
    }
}
