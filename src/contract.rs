//! Contract for the pets table: table/column names, gender codes, the typed
//! record shape, and the URI and content-type vocabulary used to address
//! records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// URI scheme for all store URIs.
pub const SCHEME: &str = "content";

/// Authority segment; must match the one consumers address.
pub const AUTHORITY: &str = "com.shelter.pets";

/// Path segment for the pets collection.
pub const PATH_PETS: &str = "pets";

/// MIME-style tag for a directory of pet records.
pub const CONTENT_LIST_TYPE: &str = "vnd.shelter.cursor.dir/com.shelter.pets/pets";

/// MIME-style tag for a single pet record.
pub const CONTENT_ITEM_TYPE: &str = "vnd.shelter.cursor.item/com.shelter.pets/pets";

pub const TABLE: &str = "pets";

pub const COL_ID: &str = "id";
pub const COL_NAME: &str = "name";
pub const COL_BREED: &str = "breed";
pub const COL_GENDER: &str = "gender";
pub const COL_WEIGHT: &str = "weight";

/// URI addressing the whole collection.
pub fn collection_uri() -> String {
    format!("{}://{}/{}", SCHEME, AUTHORITY, PATH_PETS)
}

/// URI addressing a single record by id.
pub fn item_uri(id: i64) -> String {
    format!("{}://{}/{}/{}", SCHEME, AUTHORITY, PATH_PETS, id)
}

/// Gender codes as stored in the `gender` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Unknown = 0,
    Male = 1,
    Female = 2,
}

impl Gender {
    pub fn from_code(code: i64) -> Option<Gender> {
        match code {
            0 => Some(Gender::Unknown),
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Single authority for gender validity; the validator and any future
/// consumer must agree through this function.
pub fn is_valid_gender(code: i64) -> bool {
    Gender::from_code(code).is_some()
}

/// A stored pet record, for consumers that want typed rows instead of raw
/// JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub gender: i64,
    pub weight: i64,
}

impl Pet {
    /// Decode a full (unprojected) query row.
    pub fn from_row(row: Value) -> Result<Pet, serde_json::Error> {
        serde_json::from_value(row)
    }

    pub fn gender(&self) -> Option<Gender> {
        Gender::from_code(self.gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_codes_round_trip() {
        assert_eq!(Gender::from_code(0), Some(Gender::Unknown));
        assert_eq!(Gender::from_code(1), Some(Gender::Male));
        assert_eq!(Gender::from_code(2), Some(Gender::Female));
        assert_eq!(Gender::Male.code(), 1);
    }

    #[test]
    fn only_three_genders_are_valid() {
        assert!(is_valid_gender(0));
        assert!(is_valid_gender(1));
        assert!(is_valid_gender(2));
        assert!(!is_valid_gender(-1));
        assert!(!is_valid_gender(3));
    }

    #[test]
    fn uris_follow_the_grammar() {
        assert_eq!(collection_uri(), "content://com.shelter.pets/pets");
        assert_eq!(item_uri(7), "content://com.shelter.pets/pets/7");
    }

    #[test]
    fn content_types_are_distinct_and_namespaced() {
        assert_ne!(CONTENT_LIST_TYPE, CONTENT_ITEM_TYPE);
        for tag in [CONTENT_LIST_TYPE, CONTENT_ITEM_TYPE] {
            assert!(tag.contains(AUTHORITY));
            assert!(tag.ends_with(PATH_PETS));
        }
    }
}
