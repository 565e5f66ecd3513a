//! Subcategories group the items within a category, e.g. "Shirts" under "School Uniforms".

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for a subcategory.
pub type SubcategoryId = String;

/// A published subcategory as shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// The primary key.
    #[serde(rename = "name")]
    pub id: SubcategoryId,
    /// The display title, e.g. "Half Sleeve Shirts".
    pub title: String,
    /// The URL-safe alternate identifier.
    pub slug: String,
    /// The URL of the thumbnail image.
    pub image: Option<String>,
    /// A short blurb shown under the title.
    pub description: String,
    /// The position of the subcategory in listings, lowest first.
    pub order: i64,
}

/// The data needed to create a subcategory.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewSubcategory {
    pub id: SubcategoryId,
    /// The category this subcategory belongs to.
    ///
    /// This is not checked against the category table.
    pub category: String,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub description: String,
    pub order: i64,
    pub is_published: bool,
}

impl NewSubcategory {
    /// A published subcategory with an empty description and no image.
    pub fn new(id: &str, category: &str, title: &str, slug: &str) -> Self {
        Self {
            id: id.to_owned(),
            category: category.to_owned(),
            title: title.to_owned(),
            slug: slug.to_owned(),
            image: None,
            description: String::new(),
            order: 0,
            is_published: true,
        }
    }
}

/// Create a subcategory and return the stored record.
pub fn create_subcategory(
    subcategory: NewSubcategory,
    connection: &Connection,
) -> Result<Subcategory, Error> {
    connection.execute(
        "INSERT INTO subcategory
            (id, category, title, slug, image, description, display_order, is_published, modified)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        (
            &subcategory.id,
            &subcategory.category,
            &subcategory.title,
            &subcategory.slug,
            &subcategory.image,
            &subcategory.description,
            subcategory.order,
            subcategory.is_published,
            OffsetDateTime::now_utc(),
        ),
    )?;

    Ok(Subcategory {
        id: subcategory.id,
        title: subcategory.title,
        slug: subcategory.slug,
        image: subcategory.image,
        description: subcategory.description,
        order: subcategory.order,
    })
}

/// Retrieve published subcategories, optionally only those belonging to `category`.
///
/// `category` is compared verbatim against the stored category reference, so
/// callers should [resolve](crate::resolve) it first.
pub fn get_published_subcategories(
    category: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Subcategory>, Error> {
    connection
        .prepare(
            "SELECT id, title, slug, image, description, display_order
            FROM subcategory
            WHERE is_published = 1 AND (:category IS NULL OR category = :category)
            ORDER BY display_order ASC, modified DESC;",
        )?
        .query_map(&[(":category", &category)], map_row)?
        .map(|maybe_subcategory| maybe_subcategory.map_err(|error| error.into()))
        .collect()
}

/// Initialize the subcategory table and indexes.
pub fn create_subcategory_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS subcategory (
            id TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            image TEXT,
            description TEXT NOT NULL DEFAULT '',
            display_order INTEGER NOT NULL DEFAULT 0,
            is_published INTEGER NOT NULL DEFAULT 1,
            modified TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_subcategory_category ON subcategory(category);
        CREATE INDEX IF NOT EXISTS idx_subcategory_title ON subcategory(title);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Subcategory, rusqlite::Error> {
    Ok(Subcategory {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        image: row.get(3)?,
        description: row.get(4)?,
        order: row.get(5)?,
    })
}
