//! Resolves loosely specified category and subcategory identifiers to primary keys.
//!
//! Clients may refer to a category by its key (`CAT-001`), its slug (`shirts`) or
//! part of its title (`school`). [resolve] tries each of these in turn and returns
//! the key of the first match. If nothing matches, the identifier is returned as
//! is so that it can still be matched literally against legacy item data, which
//! may store titles or slugs in its reference columns.

use crate::{
    Error,
    document_store::{Collection, DocumentStore, Field, Filter},
};

/// The kind of entity an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A [Category](crate::Category).
    Category,
    /// A [Subcategory](crate::Subcategory).
    Subcategory,
}

impl EntityKind {
    fn collection(self) -> Collection {
        match self {
            EntityKind::Category => Collection::Category,
            EntityKind::Subcategory => Collection::Subcategory,
        }
    }
}

/// A single way of looking up a key from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    KeyLookup,
    SlugLookup,
    TitleLookup,
}

/// The strategies in the order they are tried.
const STRATEGIES: [Strategy; 3] = [
    Strategy::KeyLookup,
    Strategy::SlugLookup,
    Strategy::TitleLookup,
];

impl Strategy {
    fn apply(
        self,
        store: &impl DocumentStore,
        collection: Collection,
        identifier: &str,
    ) -> Result<Option<String>, Error> {
        match self {
            Strategy::KeyLookup => Ok(store
                .exists(collection, identifier)?
                .then(|| identifier.to_owned())),
            Strategy::SlugLookup => {
                store.find_one(collection, Filter::Equals(Field::Slug, identifier))
            }
            Strategy::TitleLookup => {
                store.find_one(collection, Filter::Contains(Field::Title, identifier))
            }
        }
    }
}

/// Resolve `identifier` to the primary key of an entity of the given `kind`.
///
/// The identifier is matched against, in order:
/// 1. primary keys (exact),
/// 2. slugs (exact),
/// 3. titles (case-insensitive substring).
///
/// The first match wins. If no entity matches, `identifier` is returned unchanged.
///
/// # Errors
///
/// Only errors from the underlying `store` are returned. A missing entity is never
/// an error.
pub fn resolve(
    store: &impl DocumentStore,
    identifier: &str,
    kind: EntityKind,
) -> Result<String, Error> {
    let collection = kind.collection();

    for strategy in STRATEGIES {
        if let Some(key) = strategy.apply(store, collection, identifier)? {
            tracing::debug!("resolved {collection} {identifier:?} to {key:?} via {strategy:?}");
            return Ok(key);
        }
    }

    tracing::debug!("could not resolve {collection} {identifier:?}, using it as is");

    Ok(identifier.to_owned())
}
