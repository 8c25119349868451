//! Field-set validation for inserts and partial updates.
//!
//! A field set maps column name to a JSON value; a key present with
//! `Value::Null` is distinct from an absent key. Unrecognized keys are
//! passed through uninterpreted.

use crate::contract::{is_valid_gender, COL_GENDER, COL_NAME, COL_WEIGHT};
use crate::error::ValidationError;
use serde_json::Value;
use std::collections::HashMap;

/// Mapping from column name to its new value, used for insert and update.
pub type FieldSet = HashMap<String, Value>;

/// Validate a field set for insert. Order: name, then gender, then weight.
/// Breed is unchecked.
pub fn validate_insert(fields: &FieldSet) -> Result<(), ValidationError> {
    match fields.get(COL_NAME) {
        Some(Value::String(s)) if !s.is_empty() => {}
        _ => return Err(ValidationError::MissingName),
    }
    match fields.get(COL_GENDER) {
        Some(v) => check_gender(v)?,
        None => return Err(ValidationError::InvalidGender(Value::Null)),
    }
    if let Some(v) = fields.get(COL_WEIGHT) {
        check_weight(v)?;
    }
    Ok(())
}

/// Validate a field set for update. Only fields present in the set are
/// checked; absent fields are left untouched in storage.
pub fn validate_update(fields: &FieldSet) -> Result<(), ValidationError> {
    if let Some(v) = fields.get(COL_NAME) {
        match v {
            Value::String(s) if !s.is_empty() => {}
            _ => return Err(ValidationError::MissingName),
        }
    }
    if let Some(v) = fields.get(COL_GENDER) {
        check_gender(v)?;
    }
    if let Some(v) = fields.get(COL_WEIGHT) {
        check_weight(v)?;
    }
    Ok(())
}

fn check_gender(v: &Value) -> Result<(), ValidationError> {
    match v.as_i64() {
        Some(code) if is_valid_gender(code) => Ok(()),
        _ => Err(ValidationError::InvalidGender(v.clone())),
    }
}

fn check_weight(v: &Value) -> Result<(), ValidationError> {
    // Null weight is left to storage: absent on insert means the column
    // default applies; null on update surfaces the NOT NULL constraint.
    if v.is_null() {
        return Ok(());
    }
    match v.as_i64() {
        Some(w) if w >= 0 => Ok(()),
        _ => Err(ValidationError::NegativeWeight(v.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_pet() -> FieldSet {
        FieldSet::from([
            ("name".into(), json!("Rex")),
            ("breed".into(), json!("Lab")),
            ("gender".into(), json!(1)),
            ("weight".into(), json!(20)),
        ])
    }

    #[test]
    fn insert_accepts_a_valid_pet() {
        assert_eq!(validate_insert(&valid_pet()), Ok(()));
    }

    #[test]
    fn insert_accepts_absent_breed_and_weight() {
        let fields = FieldSet::from([
            ("name".into(), json!("Rex")),
            ("gender".into(), json!(0)),
        ]);
        assert_eq!(validate_insert(&fields), Ok(()));
    }

    #[test]
    fn insert_rejects_missing_empty_or_null_name() {
        for name in [None, Some(json!("")), Some(json!(null)), Some(json!(5))] {
            let mut fields = valid_pet();
            match name {
                Some(v) => {
                    fields.insert("name".into(), v);
                }
                None => {
                    fields.remove("name");
                }
            }
            assert_eq!(validate_insert(&fields), Err(ValidationError::MissingName));
        }
    }

    #[test]
    fn insert_rejects_absent_or_invalid_gender() {
        let mut fields = valid_pet();
        fields.remove("gender");
        assert!(matches!(
            validate_insert(&fields),
            Err(ValidationError::InvalidGender(_))
        ));
        for bad in [json!(3), json!(-1), json!("male"), json!(null)] {
            let mut fields = valid_pet();
            fields.insert("gender".into(), bad.clone());
            assert_eq!(
                validate_insert(&fields),
                Err(ValidationError::InvalidGender(bad))
            );
        }
    }

    #[test]
    fn insert_rejects_negative_or_non_integer_weight() {
        for bad in [json!(-1), json!(-20), json!("heavy")] {
            let mut fields = valid_pet();
            fields.insert("weight".into(), bad.clone());
            assert_eq!(
                validate_insert(&fields),
                Err(ValidationError::NegativeWeight(bad))
            );
        }
    }

    #[test]
    fn update_checks_only_present_fields() {
        let fields = FieldSet::from([("weight".into(), json!(22))]);
        assert_eq!(validate_update(&fields), Ok(()));
        assert_eq!(validate_update(&FieldSet::new()), Ok(()));
    }

    #[test]
    fn update_rejects_invalid_present_fields() {
        assert_eq!(
            validate_update(&FieldSet::from([("name".into(), json!(""))])),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            validate_update(&FieldSet::from([("gender".into(), json!(7))])),
            Err(ValidationError::InvalidGender(json!(7)))
        );
        assert_eq!(
            validate_update(&FieldSet::from([("weight".into(), json!(-2))])),
            Err(ValidationError::NegativeWeight(json!(-2)))
        );
    }

    #[test]
    fn unrecognized_keys_pass_through() {
        let mut fields = valid_pet();
        fields.insert("microchip".into(), json!("A-113"));
        assert_eq!(validate_insert(&fields), Ok(()));
        assert_eq!(
            validate_update(&FieldSet::from([("microchip".into(), json!("A-113"))])),
            Ok(())
        );
    }
}
