// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monotonic reference-number sources.
//!
//! The engine never owns a counter. Callers pass a [`SequenceSource`] into
//! [`crate::apply`]; storage backs it with a table, tests with
//! [`InMemorySequence`].

use std::collections::HashMap;

/// The independent counters the engine draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Facility,
    Customer,
    Reservation,
}

impl SequenceKind {
    /// Returns the persisted key of this counter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Facility => "facility",
            Self::Customer => "customer",
            Self::Reservation => "reservation",
        }
    }
}

/// A counter could not be advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceError {
    pub kind: SequenceKind,
    pub message: String,
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} sequence: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for SequenceError {}

/// A source of strictly increasing values, one counter per kind.
///
/// Values start at 1. A value handed out is never handed out again, even
/// if the command that drew it is later rolled back by the caller.
pub trait SequenceSource {
    /// Returns the next value of the counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot advance the counter.
    fn next_value(&mut self, kind: SequenceKind) -> Result<u64, SequenceError>;
}

/// Process-local sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemorySequence {
    counters: HashMap<SequenceKind, u64>,
}

impl InMemorySequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `kind` so that the next value handed out is `last + 1`.
    #[must_use]
    pub fn starting_after(mut self, kind: SequenceKind, last: u64) -> Self {
        self.counters.insert(kind, last);
        self
    }
}

impl SequenceSource for InMemorySequence {
    fn next_value(&mut self, kind: SequenceKind) -> Result<u64, SequenceError> {
        let counter: &mut u64 = self.counters.entry(kind).or_insert(0);
        *counter = counter.checked_add(1).ok_or_else(|| SequenceError {
            kind,
            message: String::from("counter exhausted"),
        })?;
        Ok(*counter)
    }
}
