// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup that cannot be expressed in Diesel DSL.
//!
//! Only `SQLite` is supported. Everything here runs once per connection:
//! PRAGMA configuration, migrations, and the foreign key self-check.

pub mod sqlite;
