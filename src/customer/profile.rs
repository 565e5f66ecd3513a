//! Reading and updating a customer's profile.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    customer::{
        Customer, CustomerId, CustomerResponse, CustomerState, Email,
        domain::{validate_first_name, validate_phone},
        get_customer, update_customer,
    },
};

/// The profile fields a customer may change. Fields that are not set are left as they are.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl ProfileUpdate {
    /// Apply the set fields to `customer`, validating them as for sign up.
    fn apply(self, mut customer: Customer) -> Result<Customer, Error> {
        if let Some(first_name) = self.first_name {
            customer.first_name = validate_first_name(&first_name)?;
        }
        if let Some(email) = self.email {
            customer.email = Email::new(&email)?;
        }
        if let Some(phone) = self.phone {
            customer.phone = validate_phone(&phone)?;
        }

        let optional_fields = [
            (self.last_name, &mut customer.last_name),
            (self.address, &mut customer.address),
            (self.city, &mut customer.city),
            (self.state, &mut customer.state),
            (self.pincode, &mut customer.pincode),
        ];
        for (update, field) in optional_fields {
            if let Some(value) = update {
                *field = value.trim().to_owned();
            }
        }

        Ok(customer)
    }
}

/// Respond with a customer's profile.
pub async fn get_profile_endpoint(
    State(state): State<CustomerState>,
    Path(customer_id): Path<CustomerId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_customer(customer_id, &connection) {
        Ok(customer) => Json(CustomerResponse::new("Profile loaded", customer)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Update some or all of a customer's profile fields and respond with the updated profile.
pub async fn update_profile_endpoint(
    State(state): State<CustomerState>,
    Path(customer_id): Path<CustomerId>,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let updated = get_customer(customer_id, &connection)
        .and_then(|customer| update.apply(customer))
        .and_then(|customer| {
            update_customer(&customer, &connection)?;
            Ok(customer)
        });

    match updated {
        Ok(customer) => {
            Json(CustomerResponse::new("Profile updated successfully", customer)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod profile_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        customer::{
            CustomerId, CustomerState, PasswordHash, create_customer, create_customer_table,
            db::test_fixtures::new_customer, get_customer, get_profile_endpoint,
            profile::ProfileUpdate, update_profile_endpoint,
        },
        endpoints::{self, format_endpoint},
    };

    fn get_test_server() -> (TestServer, CustomerId, CustomerState) {
        let connection =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_customer_table(&connection).expect("Could not create customer table");
        let password_hash = PasswordHash::new_unchecked("hunter2");
        let customer = create_customer(new_customer("asha@example.com"), &password_hash, &connection)
            .expect("Could not create test customer");
        create_customer(new_customer("ravi@example.com"), &password_hash, &connection)
            .expect("Could not create test customer");

        let state = CustomerState {
            db_connection: Arc::new(Mutex::new(connection)),
            password_cost: 4,
        };
        let app = Router::new()
            .route(
                endpoints::CUSTOMER,
                get(get_profile_endpoint).put(update_profile_endpoint),
            )
            .with_state(state.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            customer.id,
            state,
        )
    }

    #[tokio::test]
    async fn get_profile_succeeds() {
        let (server, customer_id, _) = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::CUSTOMER, customer_id))
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["user"]["id"], customer_id.as_i64());
        assert_eq!(json["user"]["email"], "asha@example.com");
    }

    #[tokio::test]
    async fn get_profile_for_unknown_customer_is_not_found() {
        let (server, _, _) = get_test_server();

        let response = server.get(&format_endpoint(endpoints::CUSTOMER, 999)).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_profile_changes_only_given_fields() {
        let (server, customer_id, state) = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::CUSTOMER, customer_id))
            .json(&ProfileUpdate {
                city: Some("Mumbai".to_owned()),
                phone: Some("9123456789".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["user"]["city"], "Mumbai");
        assert_eq!(json["user"]["first_name"], "Asha");

        let stored = get_customer(customer_id, &state.db_connection.lock().unwrap())
            .expect("Could not get customer");
        assert_eq!(stored.city, "Mumbai");
        assert_eq!(stored.phone, "9123456789");
        assert_eq!(stored.state, "Maharashtra");
    }

    #[tokio::test]
    async fn update_profile_rejects_invalid_phone() {
        let (server, customer_id, state) = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::CUSTOMER, customer_id))
            .json(&ProfileUpdate {
                phone: Some("123".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let stored = get_customer(customer_id, &state.db_connection.lock().unwrap())
            .expect("Could not get customer");
        assert_eq!(stored.phone, "9876543210");
    }

    #[tokio::test]
    async fn update_profile_rejects_email_of_another_customer() {
        let (server, customer_id, _) = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::CUSTOMER, customer_id))
            .json(&ProfileUpdate {
                email: Some("ravi@example.com".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn update_unknown_customer_is_not_found() {
        let (server, _, _) = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::CUSTOMER, 999))
            .json(&ProfileUpdate::default())
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
