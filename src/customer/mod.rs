//! Customer accounts: registration, credential checks and profile management.

mod db;
mod domain;
mod log_in;
mod password;
mod profile;
mod signup;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use serde::Serialize;

use crate::AppState;

pub use db::{
    create_customer, create_customer_table, get_customer, get_customer_with_password_by_email,
    update_customer,
};
pub use domain::{Customer, CustomerId, Email, NewCustomer, PHONE_MIN_LENGTH};
pub use log_in::{authenticate, log_in_endpoint};
pub use password::{PASSWORD_MIN_LENGTH, PasswordHash};
pub use profile::{get_profile_endpoint, update_profile_endpoint};
pub use signup::signup_endpoint;

/// The state needed for the customer endpoints.
#[derive(Debug, Clone)]
pub struct CustomerState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,
}

impl FromRef<AppState> for CustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            password_cost: state.password_cost,
        }
    }
}

/// The response body for requests that return a customer's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerResponse {
    pub success: bool,
    pub message: String,
    pub user: Customer,
}

impl CustomerResponse {
    fn new(message: &str, user: Customer) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            user,
        }
    }
}
