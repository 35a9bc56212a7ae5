// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside::{SequenceError, SequenceKind, SequenceSource};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::diesel_schema::sequences;

/// Draws reference numbers from the `sequences` table.
///
/// Increments happen on the caller's connection, so a rolled-back
/// transaction leaves the counter untouched.
pub struct SqliteSequence<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteSequence<'a> {
    pub const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl SequenceSource for SqliteSequence<'_> {
    fn next_value(&mut self, kind: SequenceKind) -> Result<u64, SequenceError> {
        let value: i64 = diesel::update(sequences::table.find(kind.as_str()))
            .set(sequences::last_value.eq(sequences::last_value + 1))
            .returning(sequences::last_value)
            .get_result(self.conn)
            .map_err(|e| SequenceError {
                kind,
                message: e.to_string(),
            })?;

        value.to_u64().ok_or_else(|| SequenceError {
            kind,
            message: format!("negative counter value {value}"),
        })
    }
}
