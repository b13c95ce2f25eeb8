//! Single-assignment result slots.
//!
//! A [`ResultStage`] holds at most one value over its whole life: it starts
//! empty, is written once, and is read once. The frame uses one as the
//! caller's destination (the bottom of the destination stack), one per
//! resumption for the composed value of the rest of the computation, and one
//! per awaited step to hand the resumed value back to the parked `.await`.

use std::cell::RefCell;

use super::error::ProtocolError;

enum Slot<T> {
    Empty,
    Written(T),
    Consumed,
}

/// A write-once, read-once slot.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::bridge::{ProtocolError, ResultStage};
///
/// let stage = ResultStage::new();
/// assert_eq!(stage.read(), Err::<i32, _>(ProtocolError::UnsetRead));
///
/// stage.write(7).unwrap();
/// assert_eq!(stage.write(8), Err(ProtocolError::DoubleWrite));
/// assert_eq!(stage.read(), Ok(7));
/// ```
pub struct ResultStage<T> {
    slot: RefCell<Slot<T>>,
}

impl<T> ResultStage<T> {
    /// Creates an empty stage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RefCell::new(Slot::Empty),
        }
    }

    /// Stores `value`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::DoubleWrite`] if the stage was written before, even
    /// if that value has since been read.
    pub fn write(&self, value: T) -> Result<(), ProtocolError> {
        let mut slot = self.slot.borrow_mut();
        match *slot {
            Slot::Empty => {
                *slot = Slot::Written(value);
                Ok(())
            }
            Slot::Written(_) | Slot::Consumed => Err(ProtocolError::DoubleWrite),
        }
    }

    /// Moves the value out.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnsetRead`] if nothing was written or the value was
    /// already taken.
    pub fn read(&self) -> Result<T, ProtocolError> {
        let mut slot = self.slot.borrow_mut();
        match std::mem::replace(&mut *slot, Slot::Consumed) {
            Slot::Written(value) => Ok(value),
            previous @ Slot::Empty => {
                *slot = previous;
                Err(ProtocolError::UnsetRead)
            }
            Slot::Consumed => Err(ProtocolError::UnsetRead),
        }
    }

    /// Returns `true` once a value has been written, whether or not it has
    /// been read since.
    #[must_use]
    pub fn is_written(&self) -> bool {
        !matches!(*self.slot.borrow(), Slot::Empty)
    }
}

impl<T> Default for ResultStage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ResultStage<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match *self.slot.borrow() {
            Slot::Empty => "empty",
            Slot::Written(_) => "written",
            Slot::Consumed => "consumed",
        };
        formatter
            .debug_struct("ResultStage")
            .field("state", &state)
            .finish()
    }
}
