//! A minimal read interface over the catalog collections.
//!
//! The [resolver](crate::resolver) only needs to know whether a key exists and to
//! look up the key of a record matching a single field filter, so that is all this
//! trait exposes.

use std::fmt::Display;

use rusqlite::Connection;

use crate::Error;

/// The catalog collections that can be searched by key, slug or title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Top level uniform categories, e.g. "School Uniforms".
    Category,
    /// Groupings of items within a category, e.g. "Shirts".
    Subcategory,
}

impl Collection {
    fn table(self) -> &'static str {
        match self {
            Collection::Category => "category",
            Collection::Subcategory => "subcategory",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// A text field that a [Filter] can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The URL-safe alternate identifier.
    Slug,
    /// The display title.
    Title,
}

impl Field {
    fn column(self) -> &'static str {
        match self {
            Field::Slug => "slug",
            Field::Title => "title",
        }
    }
}

/// A predicate on a single field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<'a> {
    /// The field is exactly equal to the value.
    Equals(Field, &'a str),
    /// The field contains the value, ignoring ASCII case.
    ///
    /// The value is matched literally, so `%` and `_` are not wildcards.
    Contains(Field, &'a str),
}

impl Display for Filter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Equals(field, value) => write!(f, "{} = {value:?}", field.column()),
            Filter::Contains(field, value) => write!(f, "{} contains {value:?}", field.column()),
        }
    }
}

/// Read access to catalog records by key and by field filters.
pub trait DocumentStore {
    /// Check whether a record with the primary key `key` exists in `collection`.
    fn exists(&self, collection: Collection, key: &str) -> Result<bool, Error>;

    /// Get the primary key of a record in `collection` that matches `filter`.
    ///
    /// When more than one record matches, which one is returned is up to the store.
    fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<String>, Error>;
}

impl DocumentStore for Connection {
    fn exists(&self, collection: Collection, key: &str) -> Result<bool, Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);",
            collection.table()
        );

        self.query_row(&query, [key], |row| row.get(0))
            .map_err(|error| error.into())
    }

    fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<String>, Error> {
        let (clause, value) = match filter {
            Filter::Equals(field, value) => (format!("{} = ?1", field.column()), value.to_owned()),
            Filter::Contains(field, value) => (
                format!("{} LIKE '%' || ?1 || '%' ESCAPE '\\'", field.column()),
                escape_like_pattern(value),
            ),
        };

        // Fetch two rows so that ambiguous matches can be reported.
        let query = format!(
            "SELECT id FROM {} WHERE {clause} LIMIT 2;",
            collection.table()
        );

        let keys = self
            .prepare(&query)?
            .query_map([value], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        if keys.len() > 1 {
            tracing::warn!(
                "more than one {collection} matched the filter {filter}, using {:?}",
                keys[0]
            );
        }

        Ok(keys.into_iter().next())
    }
}

fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for character in value.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }

    escaped
}
