//! Application router configuration.

use axum::{
    Router,
    http::{HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState,
    catalog::{
        get_catalog_page, get_collection_page, list_categories_endpoint, list_items_endpoint,
        list_subcategories_endpoint,
    },
    company::get_company_settings_endpoint,
    customer::{get_profile_endpoint, log_in_endpoint, signup_endpoint, update_profile_endpoint},
    endpoints,
    response::ApiMessage,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(endpoints::CATEGORIES, get(list_categories_endpoint))
        .route(endpoints::SUBCATEGORIES, get(list_subcategories_endpoint))
        .route(endpoints::ITEMS, get(list_items_endpoint))
        .route(endpoints::COMPANY_SETTINGS, get(get_company_settings_endpoint))
        .route(endpoints::SIGN_UP, post(signup_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint))
        .route(
            endpoints::CUSTOMER,
            get(get_profile_endpoint).put(update_profile_endpoint),
        );

    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CATALOG_VIEW, get(get_catalog_page))
        .route(endpoints::COLLECTION_VIEW, get(get_collection_page));

    api_routes
        .merge(page_routes)
        .fallback(get_404_not_found)
        .layer(cors_layer())
        .with_state(state)
}

/// Allow the storefront to call the API from any origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}

/// The root path '/' redirects to the catalog page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::CATALOG_VIEW)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiMessage::failure("the requested resource could not be found")),
    )
        .into_response()
}

#[cfg(test)]
mod router_tests {
    use axum::http::{HeaderValue, StatusCode, header};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, NewCategory, NewItem, build_router, create_category, create_item, endpoints,
    };

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open in-memory database");
        let state = AppState::with_password_cost(connection, 4).expect("Could not create state");
        {
            let connection = state.db_connection.lock().unwrap();
            create_category(NewCategory::new("CAT-001", "School Shirts", "shirts"), &connection)
                .expect("Could not create test category");
            create_item(NewItem::new("ITEM-001", "White Shirt", "CAT-001"), &connection)
                .expect("Could not create test item");
        }

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_catalog() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(response.header(header::LOCATION), endpoints::CATALOG_VIEW);
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/brochure").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json: Value = response.json();
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let server = get_test_server();

        let response = server
            .get(endpoints::CATEGORIES)
            .add_header(header::ORIGIN, HeaderValue::from_static("https://shop.example.com"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn resolves_items_by_slug_through_the_router() {
        let server = get_test_server();

        let response = server
            .get(endpoints::ITEMS)
            .add_query_param("category", "shirts")
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json[0]["name"], "ITEM-001");
        assert_eq!(json[0]["category"], "CAT-001");
    }

    #[tokio::test]
    async fn sign_up_then_log_in() {
        let server = get_test_server();
        let credentials = json!({"email": "asha@example.com", "password": "secret123"});

        server
            .post(endpoints::SIGN_UP)
            .json(&json!({
                "first_name": "Asha",
                "email": "asha@example.com",
                "phone": "9876543210",
                "password": "secret123",
            }))
            .await
            .assert_status_ok();
        let response = server.post(endpoints::LOG_IN).json(&credentials).await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["first_name"], "Asha");
    }
}
