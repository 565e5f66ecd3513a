//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, customer::PasswordHash, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The bcrypt cost used when hashing new customer passwords.
    pub password_cost: u32,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        Self::with_password_cost(db_connection, PasswordHash::DEFAULT_COST)
    }

    /// Create a new [AppState] that hashes passwords with `password_cost`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn with_password_cost(db_connection: Connection, password_cost: u32) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            password_cost,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
