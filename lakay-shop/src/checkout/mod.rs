//! Checkout: form validation, payment authorization and order submission

mod flow;
mod form;

pub use flow::{Checkout, CheckoutState};
pub use form::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    MIN_CATERING_GUESTS, ValidatedOrder, validate_catering, validate_regular,
};
