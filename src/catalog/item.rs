//! Uniform items, the individual garments that customers can buy.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for an item.
pub type ItemId = String;

/// A published item as shown to customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The primary key.
    #[serde(rename = "name")]
    pub id: ItemId,
    /// The display title.
    pub title: String,
    /// The category reference, usually a category ID but may be a title or slug in older data.
    pub category: String,
    /// The subcategory reference, if the item belongs to one.
    pub subcategory: Option<String>,
    /// The URL of the product photo.
    pub image: Option<String>,
    /// A one line summary shown on item cards.
    pub short_description: Option<String>,
    /// The price in rupees. Items without a price are sold on enquiry.
    pub price: Option<f64>,
    /// The position of the item in listings, lowest first.
    pub order: i64,
}

/// The data needed to create an item.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewItem {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub image: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<f64>,
    pub order: i64,
    pub is_published: bool,
}

impl NewItem {
    /// A published item with no subcategory, image, description or price.
    pub fn new(id: &str, title: &str, category: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            category: category.to_owned(),
            subcategory: None,
            image: None,
            short_description: None,
            price: None,
            order: 0,
            is_published: true,
        }
    }
}

/// Create an item and return the stored record.
pub fn create_item(item: NewItem, connection: &Connection) -> Result<Item, Error> {
    connection.execute(
        "INSERT INTO item
            (id, title, category, subcategory, image, short_description, price, display_order, is_published, modified)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        (
            &item.id,
            &item.title,
            &item.category,
            &item.subcategory,
            &item.image,
            &item.short_description,
            item.price,
            item.order,
            item.is_published,
            OffsetDateTime::now_utc(),
        ),
    )?;

    Ok(Item {
        id: item.id,
        title: item.title,
        category: item.category,
        subcategory: item.subcategory,
        image: item.image,
        short_description: item.short_description,
        price: item.price,
        order: item.order,
    })
}

/// Retrieve published items, optionally filtered by category and subcategory.
///
/// Both filters are compared verbatim against the stored references, so callers
/// should [resolve](crate::resolve) them first.
pub fn get_published_items(
    category: Option<&str>,
    subcategory: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Item>, Error> {
    connection
        .prepare(
            "SELECT id, title, category, subcategory, image, short_description, price, display_order
            FROM item
            WHERE is_published = 1
                AND (:category IS NULL OR category = :category)
                AND (:subcategory IS NULL OR subcategory = :subcategory)
            ORDER BY display_order ASC, modified DESC;",
        )?
        .query_map(
            &[(":category", &category), (":subcategory", &subcategory)],
            map_row,
        )?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Initialize the item table and indexes.
pub fn create_item_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS item (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            category TEXT NOT NULL,
            subcategory TEXT,
            image TEXT,
            short_description TEXT,
            price REAL,
            display_order INTEGER NOT NULL DEFAULT 0,
            is_published INTEGER NOT NULL DEFAULT 1,
            modified TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_item_category ON item(category);
        CREATE INDEX IF NOT EXISTS idx_item_subcategory ON item(subcategory);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Item, rusqlite::Error> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        subcategory: row.get(3)?,
        image: row.get(4)?,
        short_description: row.get(5)?,
        price: row.get(6)?,
        order: row.get(7)?,
    })
}
