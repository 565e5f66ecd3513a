//! The retailer's contact details and social links, shown in the storefront header and footer.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// The company profile.
///
/// Several profiles may be stored, but only active ones are shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CompanySettings {
    /// The trading name shown in the header.
    pub company_name: String,
    /// A slogan shown under the company name.
    pub tagline: Option<String>,
    /// The customer service phone number.
    pub phone: Option<String>,
    /// The customer service email address.
    pub email: Option<String>,
    /// The street address of the shop.
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// The Indian postal code.
    pub pincode: Option<String>,
    pub website: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    /// The number used for WhatsApp enquiries, in international format without a '+'.
    pub whatsapp_number: Option<String>,
}

/// Store a company profile and return its row ID.
pub fn save_company_settings(
    settings: &CompanySettings,
    is_active: bool,
    connection: &Connection,
) -> Result<i64, Error> {
    connection.execute(
        "INSERT INTO company_settings (
            company_name, tagline, phone, email, address, city, state, pincode, website,
            facebook_url, twitter_url, instagram_url, youtube_url, whatsapp_number, is_active
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
        (
            &settings.company_name,
            &settings.tagline,
            &settings.phone,
            &settings.email,
            &settings.address,
            &settings.city,
            &settings.state,
            &settings.pincode,
            &settings.website,
            &settings.facebook_url,
            &settings.twitter_url,
            &settings.instagram_url,
            &settings.youtube_url,
            &settings.whatsapp_number,
            is_active,
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Get the first active company profile, if there is one.
pub fn get_active_company_settings(
    connection: &Connection,
) -> Result<Option<CompanySettings>, Error> {
    connection
        .prepare(
            "SELECT company_name, tagline, phone, email, address, city, state, pincode, website,
                facebook_url, twitter_url, instagram_url, youtube_url, whatsapp_number
            FROM company_settings
            WHERE is_active = 1
            ORDER BY id ASC
            LIMIT 1;",
        )?
        .query_row([], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Initialize the company settings table.
pub fn create_company_settings_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS company_settings (
            id INTEGER PRIMARY KEY,
            company_name TEXT NOT NULL,
            tagline TEXT,
            phone TEXT,
            email TEXT,
            address TEXT,
            city TEXT,
            state TEXT,
            pincode TEXT,
            website TEXT,
            facebook_url TEXT,
            twitter_url TEXT,
            instagram_url TEXT,
            youtube_url TEXT,
            whatsapp_number TEXT,
            is_active INTEGER NOT NULL DEFAULT 1
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<CompanySettings, rusqlite::Error> {
    Ok(CompanySettings {
        company_name: row.get(0)?,
        tagline: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        address: row.get(4)?,
        city: row.get(5)?,
        state: row.get(6)?,
        pincode: row.get(7)?,
        website: row.get(8)?,
        facebook_url: row.get(9)?,
        twitter_url: row.get(10)?,
        instagram_url: row.get(11)?,
        youtube_url: row.get(12)?,
        whatsapp_number: row.get(13)?,
    })
}

/// The state needed for getting the company settings.
#[derive(Debug, Clone)]
pub struct CompanySettingsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CompanySettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get the active company settings, or an empty JSON object if none are active.
pub async fn get_company_settings_endpoint(State(state): State<CompanySettingsState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_active_company_settings(&connection) {
        Ok(Some(settings)) => Json(settings).into_response(),
        Ok(None) => Json(serde_json::json!({})).into_response(),
        Err(error) => error.into_response(),
    }
}
