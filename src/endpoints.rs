//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/customers/{user_id}', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the catalog page.
pub const ROOT: &str = "/";
/// The page listing all published categories.
pub const CATALOG_VIEW: &str = "/uniforms";
/// The page listing the subcategories and items of a single category.
pub const COLLECTION_VIEW: &str = "/uniforms/{category}";

/// The route for listing published categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for listing published subcategories.
pub const SUBCATEGORIES: &str = "/api/subcategories";
/// The route for listing published items.
pub const ITEMS: &str = "/api/items";
/// The route for the active company settings.
pub const COMPANY_SETTINGS: &str = "/api/company_settings";
/// The route for registering a new customer.
pub const SIGN_UP: &str = "/api/customers/signup";
/// The route for checking a customer's credentials.
pub const LOG_IN: &str = "/api/customers/log_in";
/// The route to get or update a customer's profile.
pub const CUSTOMER: &str = "/api/customers/{user_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Only the first parameter, a name wrapped in curly braces, is replaced. If
/// there is no parameter, the path is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
