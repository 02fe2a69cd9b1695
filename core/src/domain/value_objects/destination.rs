//! Canonical phone number used as the key of every store.

use std::fmt;

use serde::Serialize;
use sg_shared::phone::{self, PhoneFormatError};

use crate::errors::ValidationError;

/// A normalized and validated E.164 destination
///
/// Only constructible through [`Destination::parse`], so holding one means
/// the value is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    /// Normalize raw input, then validate the canonical form
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = phone::normalize_phone_number(raw).map_err(|e| match e {
            PhoneFormatError::Empty => ValidationError::missing(e.to_string()),
        })?;

        if !phone::is_valid_destination(&normalized) {
            return Err(ValidationError::InvalidPhoneFormat);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering with all but the last 4 digits hidden
    pub fn masked(&self) -> String {
        phone::mask_phone_number(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
