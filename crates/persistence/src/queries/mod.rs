// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `facilities`: Facility lookups
//! - `customers`: Customer lookups, including portal account matching
//! - `reservations`: Reservation listings, always priced at the live rate
//! - `audit`: Audit log reads
//! - `scope`: The state slice a command is evaluated against

pub mod audit;
pub mod customers;
pub mod facilities;
pub mod reservations;
pub mod scope;
