// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::Customer;
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use tracing::debug;

use crate::data_models::CustomerRow;
use crate::diesel_schema::customers;
use crate::error::PersistenceError;

diesel::define_sql_function! {
    /// `SQLite`'s ASCII case fold, matching how emails are compared.
    fn lower(value: Nullable<Text>) -> Nullable<Text>;
}

/// Lists every customer, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_customers(conn: &mut SqliteConnection) -> Result<Vec<Customer>, PersistenceError> {
    let rows: Vec<CustomerRow> = customers::table
        .order((customers::name.asc(), customers::customer_id.asc()))
        .select(CustomerRow::as_select())
        .load(conn)?;

    rows.into_iter().map(CustomerRow::into_domain).collect()
}

/// Retrieves a customer by id.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the customer does not exist.
pub fn get_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Option<Customer>, PersistenceError> {
    customers::table
        .find(customer_id)
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()?
        .map(CustomerRow::into_domain)
        .transpose()
}

/// Lists customers holding the given document number.
///
/// At most one row matches; a `Vec` keeps the scope loader uniform.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn customers_with_document(
    conn: &mut SqliteConnection,
    document_number: &str,
) -> Result<Vec<Customer>, PersistenceError> {
    let rows: Vec<CustomerRow> = customers::table
        .filter(customers::document_number.eq(document_number))
        .select(CustomerRow::as_select())
        .load(conn)?;

    rows.into_iter().map(CustomerRow::into_domain).collect()
}

/// Finds the customer linked to a portal login.
///
/// The account id wins over the email when both match different rows.
/// Emails are compared case-insensitively.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no customer matches.
pub fn find_customer_by_email_or_account(
    conn: &mut SqliteConnection,
    email: Option<&str>,
    account_id: Option<&str>,
) -> Result<Option<Customer>, PersistenceError> {
    if let Some(account) = account_id {
        let by_account: Option<CustomerRow> = customers::table
            .filter(customers::account_id.eq(account))
            .order(customers::customer_id.asc())
            .select(CustomerRow::as_select())
            .first(conn)
            .optional()?;
        if let Some(row) = by_account {
            debug!(customer_id = row.customer_id, "Matched customer by account");
            return row.into_domain().map(Some);
        }
    }

    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };

    let by_email: Option<CustomerRow> = customers::table
        .filter(lower(customers::email).eq(email.to_ascii_lowercase()))
        .order(customers::customer_id.asc())
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()?;

    by_email.map(CustomerRow::into_domain).transpose()
}
