//! Uniform categories and their database operations.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for a category, e.g. "CAT-001".
pub type CategoryId = String;

/// A published uniform category as shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The primary key.
    #[serde(rename = "name")]
    pub id: CategoryId,
    /// The display title, e.g. "School Uniforms".
    pub title: String,
    /// The URL-safe alternate identifier.
    pub slug: String,
    /// A short blurb shown under the title.
    pub description: String,
    /// The URL of the banner image for the category card.
    pub hero_image: Option<String>,
    /// The label of the call to action button on the category card.
    pub button_text: Option<String>,
    /// The position of the category in listings, lowest first.
    pub order: i64,
}

/// The data needed to create a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// The primary key. The caller should ensure it is unique.
    pub id: CategoryId,
    /// The display title.
    pub title: String,
    /// The URL-safe alternate identifier. Must be unique.
    pub slug: String,
    /// A short blurb shown under the title.
    pub description: String,
    /// The URL of the banner image for the category card.
    pub hero_image: Option<String>,
    /// The label of the call to action button on the category card.
    pub button_text: Option<String>,
    /// The position of the category in listings, lowest first.
    pub order: i64,
    /// Whether customers can see the category.
    pub is_published: bool,
}

impl NewCategory {
    /// A published category with an empty description and no image.
    pub fn new(id: &str, title: &str, slug: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            slug: slug.to_owned(),
            description: String::new(),
            hero_image: None,
            button_text: None,
            order: 0,
            is_published: true,
        }
    }
}

/// Create a category and return the stored record.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category
            (id, title, slug, description, hero_image, button_text, display_order, is_published, modified)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        (
            &category.id,
            &category.title,
            &category.slug,
            &category.description,
            &category.hero_image,
            &category.button_text,
            category.order,
            category.is_published,
            OffsetDateTime::now_utc(),
        ),
    )?;

    Ok(Category {
        id: category.id,
        title: category.title,
        slug: category.slug,
        description: category.description,
        hero_image: category.hero_image,
        button_text: category.button_text,
        order: category.order,
    })
}

/// Retrieve a single published category by ID.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no category with that ID or it is not published.
pub fn get_published_category(category_id: &str, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, title, slug, description, hero_image, button_text, display_order
            FROM category WHERE id = :id AND is_published = 1;",
        )?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the published categories in display order, most recently modified first among ties.
pub fn get_published_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, title, slug, description, hero_image, button_text, display_order
            FROM category
            WHERE is_published = 1
            ORDER BY display_order ASC, modified DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            hero_image TEXT,
            button_text TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            is_published INTEGER NOT NULL DEFAULT 1,
            modified TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_title ON category(title);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        hero_image: row.get(4)?,
        button_text: row.get(5)?,
        order: row.get(6)?,
    })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        catalog::category::{
            NewCategory, create_category, create_category_table, get_published_category,
            get_published_categories,
        },
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let mut new_category = NewCategory::new("CAT-001", "School Shirts", "shirts");
        new_category.description = "Crisp cotton shirts".to_owned();

        let category = create_category(new_category, &connection).expect("Could not create category");

        assert_eq!(category.id, "CAT-001");
        assert_eq!(category.description, "Crisp cotton shirts");
        assert_eq!(get_published_category("CAT-001", &connection), Ok(category));
    }

    #[test]
    fn create_category_fails_on_duplicate_slug() {
        let connection = get_test_db_connection();
        create_category(NewCategory::new("CAT-001", "Shirts", "shirts"), &connection)
            .expect("Could not create test category");

        let result = create_category(NewCategory::new("CAT-002", "Shirts 2", "shirts"), &connection);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn get_published_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        assert_eq!(get_published_category("CAT-404", &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_published_category_skips_hidden_category() {
        let connection = get_test_db_connection();
        let mut hidden = NewCategory::new("CAT-009", "Archived Ties", "ties");
        hidden.is_published = false;
        create_category(hidden, &connection).expect("Could not create test category");

        assert_eq!(
            get_published_category("CAT-009", &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn published_categories_are_in_display_order() {
        let connection = get_test_db_connection();
        let mut second = NewCategory::new("CAT-002", "Corporate", "corporate");
        second.order = 2;
        let mut first = NewCategory::new("CAT-001", "School", "school");
        first.order = 1;
        let mut hidden = NewCategory::new("CAT-003", "Hidden", "hidden");
        hidden.is_published = false;
        for category in [second, first, hidden] {
            create_category(category, &connection).expect("Could not create test category");
        }

        let categories = get_published_categories(&connection).expect("Could not get categories");

        let ids: Vec<_> = categories.iter().map(|category| category.id.as_str()).collect();
        assert_eq!(ids, ["CAT-001", "CAT-002"]);
    }

    #[test]
    fn serializes_id_as_name() {
        let connection = get_test_db_connection();
        let category = create_category(NewCategory::new("CAT-001", "Shirts", "shirts"), &connection)
            .expect("Could not create test category");

        let json = serde_json::to_value(&category).expect("Could not serialize category");

        assert_eq!(json["name"], "CAT-001");
        assert_eq!(json["order"], 0);
    }
}
