// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::customer::Customer;
use crate::error::DomainError;
use crate::facility::{Facility, FacilityCode};
use crate::reservation::{BOOKABLE_END_HOUR, BOOKABLE_START_HOUR};

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 6;

/// Validates that an hourly rate is strictly positive.
///
/// # Errors
///
/// Returns `InvalidRate` if the rate is zero, negative or not a number.
pub fn validate_hourly_rate(rate: f64) -> Result<(), DomainError> {
    // NaN fails the comparison as well
    if rate > 0.0 && rate.is_finite() {
        Ok(())
    } else {
        Err(DomainError::InvalidRate { rate })
    }
}

/// Validates a booking interval against the bookable window.
///
/// # Errors
///
/// Returns `InvalidTimeRange` if `start >= end`, `start < 6` or `end > 23`.
pub fn validate_time_range(start: f64, end: f64) -> Result<(), DomainError> {
    if !start.is_finite() || !end.is_finite() || start >= end {
        return Err(DomainError::InvalidTimeRange {
            start,
            end,
            reason: "start must be before end",
        });
    }
    if start < BOOKABLE_START_HOUR || end > BOOKABLE_END_HOUR {
        return Err(DomainError::InvalidTimeRange {
            start,
            end,
            reason: "bookable hours are 06:00 to 23:00",
        });
    }
    Ok(())
}

/// Rejects bookings dated before `today`.
///
/// # Errors
///
/// Returns `PastDate` if `date < today`.
pub fn validate_booking_date(date: time::Date, today: time::Date) -> Result<(), DomainError> {
    if date < today {
        return Err(DomainError::PastDate { date, today });
    }
    Ok(())
}

/// Validates a required name.
///
/// # Errors
///
/// Returns `InvalidName` if the name is blank.
pub fn validate_name(name: &str, what: &'static str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(what));
    }
    Ok(())
}

/// Validates a facility capacity.
///
/// # Errors
///
/// Returns `InvalidCapacity` for negative values.
pub const fn validate_capacity(capacity: i32) -> Result<(), DomainError> {
    if capacity < 0 {
        return Err(DomainError::InvalidCapacity(capacity));
    }
    Ok(())
}

/// Validates an email address of the form `local@domain.tld`.
///
/// # Errors
///
/// Returns `InvalidEmailFormat` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmailFormat(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty()
        || host.starts_with('.')
        || host.ends_with('.')
        || tld.len() < 2
        || !tld.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Err(invalid());
    }
    Ok(())
}

/// Validates a phone number.
///
/// Allowed characters are digits, spaces, `+`, `-`, `(` and `)`; at least
/// six digits are required.
///
/// # Errors
///
/// Returns `InvalidPhoneFormat` if the number is malformed.
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    let digits: usize = phone.chars().filter(char::is_ascii_digit).count();

    if !phone.chars().all(allowed) || digits < MIN_PHONE_DIGITS {
        return Err(DomainError::InvalidPhoneFormat(phone.to_string()));
    }
    Ok(())
}

/// Validates that a document number is not already registered.
///
/// `exclude_customer_id` skips the customer being updated.
///
/// # Errors
///
/// Returns `DuplicateDocument` if another customer holds the number.
pub fn validate_document_unique(
    document_number: &str,
    existing: &[Customer],
    exclude_customer_id: Option<i64>,
) -> Result<(), DomainError> {
    let taken: bool = existing.iter().any(|c| {
        Some(c.customer_id) != exclude_customer_id
            && c.document_number.as_deref() == Some(document_number)
    });
    if taken {
        return Err(DomainError::DuplicateDocument(document_number.to_string()));
    }
    Ok(())
}

/// Validates that a facility code is not already used.
///
/// # Errors
///
/// Returns `DuplicateCode` on collision.
pub fn validate_code_unique(code: &FacilityCode, existing: &[Facility]) -> Result<(), DomainError> {
    if existing.iter().any(|f| &f.code == code) {
        return Err(DomainError::DuplicateCode(code.clone()));
    }
    Ok(())
}
