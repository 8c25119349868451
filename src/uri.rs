//! URI resolution: collection vs single item by id.
//!
//! The routing table is immutable and owned by the matcher instance, so
//! independent providers (e.g. one per test) never share state.

use crate::contract;
use crate::error::ProviderError;

/// Routing code for a resolved URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Zero or more records, optionally narrowed by a caller selection.
    Collection,
    /// Exactly one record, by the id extracted from the trailing segment.
    Item(i64),
}

/// Matches store URIs against the two known shapes.
#[derive(Debug, Clone)]
pub struct UriMatcher {
    collection: String,
}

impl UriMatcher {
    pub fn new(scheme: &str, authority: &str, collection_path: &str) -> Self {
        UriMatcher {
            collection: format!("{}://{}/{}", scheme, authority, collection_path),
        }
    }

    /// Resolve a URI to a routing code. Exact collection path wins; a single
    /// extra all-digit segment is an item; anything else is a routing error.
    pub fn resolve(&self, uri: &str) -> Result<Route, ProviderError> {
        if uri == self.collection {
            return Ok(Route::Collection);
        }
        if let Some(tail) = uri.strip_prefix(&self.collection) {
            if let Some(segment) = tail.strip_prefix('/') {
                if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(id) = segment.parse::<i64>() {
                        return Ok(Route::Item(id));
                    }
                }
            }
        }
        Err(ProviderError::Routing(uri.to_string()))
    }
}

impl Default for UriMatcher {
    fn default() -> Self {
        UriMatcher::new(contract::SCHEME, contract::AUTHORITY, contract::PATH_PETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{collection_uri, item_uri};

    #[test]
    fn collection_uri_resolves() {
        let m = UriMatcher::default();
        assert_eq!(m.resolve(&collection_uri()).unwrap(), Route::Collection);
    }

    #[test]
    fn item_uri_resolves_with_id() {
        let m = UriMatcher::default();
        assert_eq!(m.resolve(&item_uri(42)).unwrap(), Route::Item(42));
    }

    #[test]
    fn malformed_uris_are_routing_errors() {
        let m = UriMatcher::default();
        for uri in [
            "content://com.shelter.pets",
            "content://com.shelter.pets/cats",
            "content://com.shelter.pets/pets/",
            "content://com.shelter.pets/pets/abc",
            "content://com.shelter.pets/pets/-3",
            "content://com.shelter.pets/pets/3/extra",
            "content://other.authority/pets",
            "http://com.shelter.pets/pets",
            "",
        ] {
            assert!(
                matches!(m.resolve(uri), Err(ProviderError::Routing(_))),
                "expected routing error for {uri:?}"
            );
        }
    }

    #[test]
    fn matcher_instances_are_independent() {
        let other = UriMatcher::new("content", "other.authority", "pets");
        assert_eq!(
            other.resolve("content://other.authority/pets/1").unwrap(),
            Route::Item(1)
        );
        assert!(other.resolve(&collection_uri()).is_err());
    }
}
