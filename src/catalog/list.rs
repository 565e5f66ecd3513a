//! JSON endpoints for browsing the catalog.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    catalog::{get_published_categories, get_published_items, get_published_subcategories},
    resolver::{EntityKind, resolve},
};

/// The state needed for the catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CatalogState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for listing subcategories.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubcategoryQuery {
    /// A category ID, slug or partial title.
    pub category: Option<String>,
}

/// Query parameters for listing items.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ItemQuery {
    /// A category ID, slug or partial title.
    pub category: Option<String>,
    /// A subcategory ID, slug or partial title.
    pub subcategory: Option<String>,
}

/// List the published categories.
pub async fn list_categories_endpoint(State(state): State<CatalogState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_published_categories(&connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_response(),
    }
}

/// List the published subcategories, optionally for a single category.
pub async fn list_subcategories_endpoint(
    State(state): State<CatalogState>,
    Query(query): Query<SubcategoryQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let subcategories = resolve_parameter(query.category.as_deref(), EntityKind::Category, &connection)
        .and_then(|category| get_published_subcategories(category.as_deref(), &connection));

    match subcategories {
        Ok(subcategories) => Json(subcategories).into_response(),
        Err(error) => error.into_response(),
    }
}

/// List the published items, optionally for a single category and/or subcategory.
pub async fn list_items_endpoint(
    State(state): State<CatalogState>,
    Query(query): Query<ItemQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let items = resolve_parameter(query.category.as_deref(), EntityKind::Category, &connection)
        .and_then(|category| {
            let subcategory = resolve_parameter(
                query.subcategory.as_deref(),
                EntityKind::Subcategory,
                &connection,
            )?;

            get_published_items(category.as_deref(), subcategory.as_deref(), &connection)
        });

    match items {
        Ok(items) => Json(items).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Resolve an optional identifier from a query string.
///
/// Missing and blank parameters mean "no filter". Other values are resolved as given,
/// so an unresolved value is matched exactly as the client sent it.
pub(crate) fn resolve_parameter(
    parameter: Option<&str>,
    kind: EntityKind,
    connection: &Connection,
) -> Result<Option<String>, Error> {
    match parameter {
        Some(identifier) if !identifier.trim().is_empty() => {
            resolve(connection, identifier, kind).map(Some)
        }
        _ => Ok(None),
    }
}
