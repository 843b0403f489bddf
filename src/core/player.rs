//! Participant slots and per-slot data storage.
//!
//! ## Slot
//!
//! Type-safe index of one of the two combatant positions in a session.
//! `Slot::FIRST` is the host, `Slot::SECOND` the player who joined.
//!
//! ## SlotPair
//!
//! Per-slot data storage backed by a fixed `[T; 2]` for O(1) access.
//! Supports iteration and indexing by `Slot`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of combatant slots in a session.
pub const SLOT_COUNT: usize = 2;

/// Combatant slot index, serialized as `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    /// The host's slot. Always moves first.
    pub const FIRST: Slot = Slot(0);
    /// The joining player's slot.
    pub const SECOND: Slot = Slot(1);

    /// Create a slot from a raw index, if it is 0 or 1.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < SLOT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the raw slot index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposing slot.
    ///
    /// ```
    /// use battlechip::core::Slot;
    ///
    /// assert_eq!(Slot::FIRST.other(), Slot::SECOND);
    /// assert_eq!(Slot::SECOND.other(), Slot::FIRST);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        Self(1 - self.0)
    }

    /// Both slots in order.
    pub fn all() -> impl Iterator<Item = Slot> {
        [Slot::FIRST, Slot::SECOND].into_iter()
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Slot::new(value).ok_or_else(|| format!("slot index {value} out of range"))
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-slot data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use battlechip::core::{Slot, SlotPair};
///
/// let mut scores: SlotPair<u32> = SlotPair::new(0, 0);
/// scores[Slot::SECOND] += 60;
/// assert_eq!(scores[Slot::FIRST], 0);
/// assert_eq!(scores[Slot::SECOND], 60);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotPair<T> {
    data: [T; SLOT_COUNT],
}

impl<T> SlotPair<T> {
    /// Create from explicit values for each slot.
    pub fn new(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Get a reference to a slot's data.
    #[must_use]
    pub fn get(&self, slot: Slot) -> &T {
        &self.data[slot.index()]
    }

    /// Get a mutable reference to a slot's data.
    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        &mut self.data[slot.index()]
    }

    /// Borrow `slot` and its opponent mutably at the same time.
    ///
    /// Returns `(slot's data, other slot's data)`.
    pub fn split_mut(&mut self, slot: Slot) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        if slot == Slot::FIRST {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Iterate over (Slot, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        Slot::all().zip(self.data.iter())
    }

    /// Iterate over (Slot, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Slot, &mut T)> {
        Slot::all().zip(self.data.iter_mut())
    }

    /// Map each entry to a new value.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> SlotPair<U> {
        SlotPair::new(f(&self.data[0]), f(&self.data[1]))
    }
}

impl<T> Index<Slot> for SlotPair<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        self.get(slot)
    }
}

impl<T> IndexMut<Slot> for SlotPair<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        self.get_mut(slot)
    }
}
