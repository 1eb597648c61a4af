//! Checkout form validation
//!
//! These checks are advisory: they block obviously incomplete submissions
//! before any request is made, and the backend re-validates everything.

use chrono::NaiveDate;
use shared::{CateringDetails, OrderDetails};

use crate::error::{FieldErrors, ShopResult};
use crate::payment::BillingDetails;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Phone numbers, dates
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Catering preferences
pub const MAX_NOTE_LEN: usize = 500;

/// Smallest party a catering inquiry accepts
pub const MIN_CATERING_GUESTS: u32 = 20;

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedOrder {
    Regular(OrderDetails),
    Catering { details: CateringDetails, guests: u32 },
}

impl ValidatedOrder {
    /// Contact fields handed to the payment provider
    pub fn billing(&self) -> BillingDetails {
        let (name, email, phone) = match self {
            ValidatedOrder::Regular(d) => (&d.name, &d.email, &d.phone),
            ValidatedOrder::Catering { details: d, .. } => (&d.name, &d.email, &d.phone),
        };
        BillingDetails {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
        }
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn required(
    errors: &mut FieldErrors,
    value: &str,
    field: &'static str,
    label: &str,
    max_len: usize,
) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        return false;
    }
    if value.len() > max_len {
        errors.add(
            field,
            format!("{label} is too long ({} chars, max {max_len})", value.len()),
        );
        return false;
    }
    true
}

fn email(errors: &mut FieldErrors, value: &str) {
    if required(errors, value, "email", "Email", MAX_EMAIL_LEN) && !value.contains('@') {
        errors.add("email", "Please enter a valid email address");
    }
}

/// Regular order: name, email, address and phone are all required
pub fn validate_regular(details: &OrderDetails) -> ShopResult<ValidatedOrder> {
    let mut errors = FieldErrors::new();
    required(&mut errors, &details.name, "name", "Name", MAX_NAME_LEN);
    email(&mut errors, &details.email);
    required(
        &mut errors,
        &details.address,
        "address",
        "Delivery address",
        MAX_ADDRESS_LEN,
    );
    required(&mut errors, &details.phone, "phone", "Phone", MAX_SHORT_TEXT_LEN);
    errors.into_result()?;
    Ok(ValidatedOrder::Regular(OrderDetails {
        name: trimmed(&details.name),
        email: trimmed(&details.email),
        address: trimmed(&details.address),
        phone: trimmed(&details.phone),
    }))
}

/// Catering inquiry: contact fields, an ISO event date and at least 20 guests
pub fn validate_catering(details: &CateringDetails) -> ShopResult<ValidatedOrder> {
    let mut errors = FieldErrors::new();
    required(&mut errors, &details.name, "name", "Name", MAX_NAME_LEN);
    email(&mut errors, &details.email);
    required(&mut errors, &details.phone, "phone", "Phone", MAX_SHORT_TEXT_LEN);

    if required(&mut errors, &details.event_date, "eventDate", "Event date", MAX_SHORT_TEXT_LEN)
        && NaiveDate::parse_from_str(details.event_date.trim(), "%Y-%m-%d").is_err()
    {
        errors.add("eventDate", "Event date must be a date (YYYY-MM-DD)");
    }

    let mut guests = 0;
    if required(&mut errors, &details.guests, "guests", "Number of guests", MAX_SHORT_TEXT_LEN) {
        match details.guests.trim().parse::<u32>() {
            Ok(n) if n >= MIN_CATERING_GUESTS => guests = n,
            Ok(_) => errors.add(
                "guests",
                format!("Catering orders must be for {MIN_CATERING_GUESTS} or more people"),
            ),
            Err(_) => errors.add("guests", "Number of guests must be a whole number"),
        }
    }

    if details.preferences.len() > MAX_NOTE_LEN {
        errors.add(
            "preferences",
            format!("Special preferences are too long (max {MAX_NOTE_LEN})"),
        );
    }

    errors.into_result()?;
    Ok(ValidatedOrder::Catering {
        details: CateringDetails {
            name: trimmed(&details.name),
            email: trimmed(&details.email),
            phone: trimmed(&details.phone),
            event_date: trimmed(&details.event_date),
            guests: trimmed(&details.guests),
            preferences: trimmed(&details.preferences),
        },
        guests,
    })
}
