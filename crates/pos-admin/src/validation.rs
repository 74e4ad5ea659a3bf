//! # Form Validation
//!
//! Client-side checks run before any write. Error messages double as the
//! text shown to the operator.

use crate::model::ProductDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Add-product form failures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Please enter a valid price.")]
    InvalidPrice,
}

/// Field-level errors on the sell form.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhoneNumber,
}

/// Parses a price the way a browser's `Number(text)` would, then requires a
/// finite value above zero.
///
/// Surrounding whitespace is ignored and the whole remaining text must be
/// numeric, so `"12abc"` is rejected rather than read as 12.
pub fn parse_price(text: &str) -> Result<f64, FormError> {
    let value: f64 = text.trim().parse().map_err(|_| FormError::InvalidPrice)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(FormError::InvalidPrice);
    }
    Ok(value)
}

/// Validates the add-product fields and builds the draft to push.
///
/// Emptiness is checked on the raw text, before the price is parsed.
pub fn product_draft(
    name: &str,
    description: &str,
    price: &str,
    created_at: String,
) -> Result<ProductDraft, FormError> {
    if name.is_empty() || description.is_empty() || price.is_empty() {
        return Err(FormError::MissingFields);
    }
    let price = parse_price(price)?;
    Ok(ProductDraft {
        name: name.to_string(),
        description: description.to_string(),
        price,
        created_at,
    })
}

/// The phone number is optional; when given it must be exactly ten ASCII digits.
pub fn validate_phone_number(phone: &str) -> Result<(), FieldError> {
    if phone.is_empty() || PHONE_NUMBER.is_match(phone) {
        Ok(())
    } else {
        Err(FieldError::InvalidPhoneNumber)
    }
}
