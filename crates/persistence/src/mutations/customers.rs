// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{Customer, DomainError};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};

use crate::diesel_schema::{customers, reservations};
use crate::error::PersistenceError;

/// Inserts a new customer.
///
/// # Errors
///
/// Returns `DuplicateDocument` if the document number is taken, or a
/// database error.
pub fn insert_customer(
    conn: &mut SqliteConnection,
    customer: &Customer,
) -> Result<(), PersistenceError> {
    let result = diesel::insert_into(customers::table)
        .values((
            customers::customer_id.eq(customer.customer_id),
            customers::name.eq(&customer.name),
            customers::document_number.eq(customer.document_number.as_deref()),
            customers::phone.eq(&customer.phone),
            customers::email.eq(customer.email.as_deref()),
            customers::address.eq(customer.address.as_deref()),
            customers::account_id.eq(customer.account_id.as_deref()),
            customers::tier.eq(customer.tier.as_str()),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            info!(customer_id = customer.customer_id, "Customer registered");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(DomainError::DuplicateDocument(
                customer.document_number.clone().unwrap_or_default(),
            )
            .into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Stores a recomputed tier.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub fn update_customer_tier(
    conn: &mut SqliteConnection,
    customer: &Customer,
) -> Result<(), PersistenceError> {
    diesel::update(customers::table.find(customer.customer_id))
        .set(customers::tier.eq(customer.tier.as_str()))
        .execute(conn)?;

    debug!(
        customer_id = customer.customer_id,
        tier = %customer.tier,
        "Customer tier updated"
    );
    Ok(())
}

/// Deletes a customer.
///
/// # Errors
///
/// Returns `CustomerReferenced` if reservations still point at it, or a
/// database error.
pub fn delete_customer(conn: &mut SqliteConnection, customer_id: i64) -> Result<(), PersistenceError> {
    match diesel::delete(customers::table.find(customer_id)).execute(conn) {
        Ok(_) => {
            info!(customer_id, "Customer deleted");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
            let count: i64 = reservations::table
                .filter(reservations::customer_id.eq(customer_id))
                .count()
                .get_result(conn)?;
            Err(DomainError::CustomerReferenced {
                customer_id,
                count: usize::try_from(count).unwrap_or(usize::MAX),
            }
            .into())
        }
        Err(e) => Err(e.into()),
    }
}
