// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::reservation::Reservation;
use serde::{Deserialize, Serialize};
use time::Date;

labeled_enum! {
    /// Customer classification derived from valid reservation count.
    pub enum CustomerTier ("customer tier") {
        New => ("new", "New"),
        Occasional => ("occasional", "Occasional"),
        Frequent => ("frequent", "Frequent"),
    }
}

/// Highest valid reservation count still classified as occasional.
pub const OCCASIONAL_TIER_MAX: usize = 5;

/// A person or account holding reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    /// National ID / document number, unique when present.
    pub document_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Linked portal account, if the customer books online.
    pub account_id: Option<String>,
    pub tier: CustomerTier,
}

/// Aggregates derived from a customer's reservations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub valid_reservations: usize,
    pub total_spent: f64,
    pub last_reservation: Option<Date>,
}

/// Classifies a valid reservation count into a tier.
///
/// 0 is `New`, 1 through 5 is `Occasional`, anything above is `Frequent`.
#[must_use]
pub const fn classify_tier(valid_reservations: usize) -> CustomerTier {
    match valid_reservations {
        0 => CustomerTier::New,
        n if n <= OCCASIONAL_TIER_MAX => CustomerTier::Occasional,
        _ => CustomerTier::Frequent,
    }
}

/// Computes the derived aggregates of a customer.
///
/// Only confirmed, in-progress and completed reservations count.
/// Reservations belonging to other customers are ignored.
#[must_use]
pub fn summarize_customer(customer_id: i64, reservations: &[Reservation]) -> CustomerSummary {
    let valid = reservations
        .iter()
        .filter(|r| r.customer_id == customer_id && r.state.counts_toward_tier())
        .collect::<Vec<_>>();

    CustomerSummary {
        valid_reservations: valid.len(),
        total_spent: valid.iter().map(|r| r.amount()).sum(),
        last_reservation: valid.iter().map(|r| r.date).max(),
    }
}

/// Recomputes the tier of `customer` from its reservation set.
#[must_use]
pub fn recompute_tier(customer: &Customer, reservations: &[Reservation]) -> CustomerTier {
    classify_tier(summarize_customer(customer.customer_id, reservations).valid_reservations)
}
