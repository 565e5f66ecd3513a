//! Core customer domain types and field validation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// The minimum number of characters in a phone number.
pub const PHONE_MIN_LENGTH: usize = 10;

/// A newtype wrapper for integer customer IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Create a new customer ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the customer ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A trimmed email address that contains an '@'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create and validate an email address.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidEmail] if `raw_email` is empty or has no '@'.
    pub fn new(raw_email: &str) -> Result<Self, Error> {
        let email = raw_email.trim();

        if !email.is_empty() && email.contains('@') {
            Ok(Self(email.to_owned()))
        } else {
            Err(Error::InvalidEmail(raw_email.to_owned()))
        }
    }

    /// Create a new `Email` without any validation.
    ///
    /// The caller should ensure that `raw_email` is a correctly formatted email address.
    /// For emails coming from the customer, this function should **not** be used, instead use the checked version.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an incorrectly formatted email is provided it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(raw_email: &str) -> Self {
        Self(raw_email.to_owned())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that a phone number is either empty or has at least [PHONE_MIN_LENGTH] characters.
///
/// Returns the trimmed phone number.
///
/// # Errors
///
/// This function will return an [Error::InvalidPhone] if the phone number is too short.
pub fn validate_phone(raw_phone: &str) -> Result<String, Error> {
    let phone = raw_phone.trim();

    if phone.is_empty() || phone.chars().count() >= PHONE_MIN_LENGTH {
        Ok(phone.to_owned())
    } else {
        Err(Error::InvalidPhone(raw_phone.to_owned()))
    }
}

/// Check that a first name is not blank and return it trimmed.
///
/// # Errors
///
/// This function will return an [Error::EmptyName] if the name is blank.
pub fn validate_first_name(raw_name: &str) -> Result<String, Error> {
    let name = raw_name.trim();

    if name.is_empty() {
        Err(Error::EmptyName)
    } else {
        Ok(name.to_owned())
    }
}

/// A registered customer's profile.
///
/// The password hash is deliberately not part of this type so that it can never
/// be sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated profile fields of a customer that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}


#[cfg(test)]
mod field_validation_tests {
    use crate::{
        Error,
        customer::domain::{validate_first_name, validate_phone},
    };

    #[test]
    fn phone_may_be_empty() {
        assert_eq!(validate_phone(""), Ok(String::new()));
    }

    #[test]
    fn phone_with_ten_digits_is_valid() {
        assert_eq!(validate_phone(" 9876543210 "), Ok("9876543210".to_owned()));
    }

    #[test]
    fn short_phone_is_invalid() {
        assert_eq!(
            validate_phone("12345"),
            Err(Error::InvalidPhone("12345".to_owned()))
        );
    }

    #[test]
    fn first_name_cannot_be_blank() {
        assert_eq!(validate_first_name(" \t"), Err(Error::EmptyName));
        assert_eq!(validate_first_name(" Asha "), Ok("Asha".to_owned()));
    }
}
