//! Checking a customer's email and password.
//!
//! Logging in only verifies credentials and returns the customer's profile. The
//! storefront keeps track of the logged in customer itself.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    customer::{Customer, CustomerResponse, CustomerState, get_customer_with_password_by_email},
};

/// The credentials sent by the log in form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogInData {
    pub email: String,
    pub password: String,
}

/// Get the customer registered with `email` if `password` is correct.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if there is no customer with the email address or the
/// password is wrong, so that callers cannot tell which email addresses are registered.
pub fn authenticate(email: &str, password: &str, connection: &Connection) -> Result<Customer, Error> {
    let (customer, password_hash) = match get_customer_with_password_by_email(email, connection) {
        Ok(found) => found,
        Err(Error::NotFound) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error),
    };

    match password_hash.verify(password) {
        Ok(true) => Ok(customer),
        Ok(false) => Err(Error::InvalidCredentials),
        Err(error) => Err(Error::HashingError(error.to_string())),
    }
}

/// Check a customer's credentials and respond with their profile.
pub async fn log_in_endpoint(
    State(state): State<CustomerState>,
    Json(credentials): Json<LogInData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match authenticate(&credentials.email, &credentials.password, &connection) {
        Ok(customer) => Json(CustomerResponse::new("Login successful", customer)).into_response(),
        Err(Error::InvalidCredentials) => {
            tracing::info!("failed log in attempt for {:?}", credentials.email);
            Error::InvalidCredentials.into_response()
        }
        Err(error) => error.into_response(),
    }
}


#[cfg(test)]
mod log_in_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        customer::{
            CustomerState, PasswordHash, create_customer, create_customer_table,
            db::test_fixtures::new_customer, log_in::LogInData, log_in_endpoint,
        },
        endpoints,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_customer_table(&connection).expect("Could not create customer table");
        create_customer(
            new_customer("asha@example.com"),
            &PasswordHash::from_raw_password("secret123", 4).expect("Could not hash password"),
            &connection,
        )
        .expect("Could not create test customer");

        let state = CustomerState {
            db_connection: Arc::new(Mutex::new(connection)),
            password_cost: 4,
        };
        let app = Router::new()
            .route(endpoints::LOG_IN, post(log_in_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn log_in_succeeds() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN)
            .json(&LogInData {
                email: "asha@example.com".to_owned(),
                password: "secret123".to_owned(),
            })
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["first_name"], "Asha");
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN)
            .json(&LogInData {
                email: "asha@example.com".to_owned(),
                password: "wrongpassword".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let json: Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "invalid email or password");
    }
}
