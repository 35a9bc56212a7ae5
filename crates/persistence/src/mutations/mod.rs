// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `facilities`, `customers`, `reservations`: Row writes per table
//! - `audit`: Append-only audit event writes
//! - `sequences`: Transactional reference number source
//! - `transition`: Writes a whole `TransitionResult`
//!
//! Unique and foreign key violations raised by `SQLite` are translated
//! back into the domain conflict they stand for, so a caller cannot tell
//! whether the engine or the storage guard caught it.

pub mod audit;
pub mod customers;
pub mod facilities;
pub mod reservations;
pub mod sequences;
pub mod transition;

pub use sequences::SqliteSequence;
pub use transition::persist_transition;
