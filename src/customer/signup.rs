//! Registering new customer accounts.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    customer::{
        CustomerResponse, CustomerState, Email, NewCustomer, PasswordHash, create_customer,
        domain::{validate_first_name, validate_phone},
    },
};

/// The sign up form sent by the storefront.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUpData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl SignUpData {
    fn validate(self) -> Result<(NewCustomer, String), Error> {
        let customer = NewCustomer {
            first_name: validate_first_name(&self.first_name)?,
            last_name: self.last_name.trim().to_owned(),
            email: Email::new(&self.email)?,
            phone: validate_phone(&self.phone)?,
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            pincode: self.pincode.trim().to_owned(),
        };

        Ok((customer, self.password))
    }
}

/// Register a new customer.
///
/// Responds with the new customer's profile, or a failure message if the form is
/// invalid or the email address is already registered.
pub async fn signup_endpoint(
    State(state): State<CustomerState>,
    Json(form): Json<SignUpData>,
) -> Response {
    let (new_customer, raw_password) = match form.validate() {
        Ok(validated) => validated,
        Err(error) => return error.into_response(),
    };

    let password_hash = match PasswordHash::from_raw_password(&raw_password, state.password_cost) {
        Ok(password_hash) => password_hash,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_customer(new_customer, &password_hash, &connection) {
        Ok(customer) => {
            tracing::info!("registered customer {}", customer.id);
            Json(CustomerResponse::new("Account created successfully", customer)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod signup_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        customer::{CustomerState, create_customer_table, signup::SignUpData},
        endpoints,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_customer_table(&connection).expect("Could not create customer table");

        let state = CustomerState {
            db_connection: Arc::new(Mutex::new(connection)),
            password_cost: 4,
        };

        let app = Router::new()
            .route(endpoints::SIGN_UP, post(super::signup_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn sign_up_data() -> SignUpData {
        SignUpData {
            first_name: "Asha".to_owned(),
            last_name: "Verma".to_owned(),
            email: "asha@example.com".to_owned(),
            phone: "9876543210".to_owned(),
            password: "secret123".to_owned(),
            city: "Pune".to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn signup_succeeds() {
        let server = get_test_server();

        let response = server.post(endpoints::SIGN_UP).json(&sign_up_data()).await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["email"], "asha@example.com");
        assert_eq!(json["user"]["city"], "Pune");
        assert!(json["user"]["id"].as_i64().is_some_and(|id| id > 0));
        assert!(json["user"]["created_at"].is_string());
        assert!(
            json["user"].get("password").is_none(),
            "password hash must not be sent to the client"
        );
    }

    #[tokio::test]
    async fn signup_fails_with_invalid_email() {
        let server = get_test_server();

        let response = server
            .post(endpoints::SIGN_UP)
            .json(&SignUpData {
                email: "asha.example.com".to_owned(),
                ..sign_up_data()
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "asha.example.com is not a valid email address");
    }

    #[tokio::test]
    async fn signup_fails_with_short_phone() {
        let server = get_test_server();

        let response = server
            .post(endpoints::SIGN_UP)
            .json(&SignUpData {
                phone: "12345".to_owned(),
                ..sign_up_data()
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn signup_fails_with_short_password() {
        let server = get_test_server();

        let response = server
            .post(endpoints::SIGN_UP)
            .json(&SignUpData {
                password: "abc".to_owned(),
                ..sign_up_data()
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json["message"], "password must be at least 6 characters long");
    }

    #[tokio::test]
    async fn signup_fails_with_duplicate_email() {
        let server = get_test_server();
        server
            .post(endpoints::SIGN_UP)
            .json(&sign_up_data())
            .await
            .assert_status_ok();

        let response = server.post(endpoints::SIGN_UP).json(&sign_up_data()).await;

        response.assert_status(StatusCode::CONFLICT);
        let json: Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "email already registered");
    }
}
