//! Shape and numeric checks for ids and request bodies.
//!
//! Nothing in here touches the store: every request is rejected here before
//! a connection is checked out.

use serde_json::Value;
use thiserror::Error;

use crate::models::{FoodChanges, FoodPayload, NewFood};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The 'id' parameter must be a valid number. Given id: {0}")]
    NotANumber(String),

    #[error("The 'name' field is required or invalid.")]
    InvalidName,

    #[error("The '{0}' field must be a valid non-negative number.")]
    InvalidField(&'static str),

    #[error("At least one of the macronutrients (proteins, fats, carbs) must be greater than 0.")]
    MissingMacros,
}

pub fn validate_id(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::NotANumber(raw.to_string()))
}

pub fn validate_create(payload: &FoodPayload) -> Result<NewFood, ValidationError> {
    let name = match &payload.name {
        Some(value) => name(value)?,
        None => return Err(ValidationError::InvalidName),
    };

    let mut values = [0.0; 7];
    for (slot, (field, value)) in values.iter_mut().zip(payload.numeric_fields()) {
        if let Some(value) = value {
            *slot = number(field, value)?;
        }
    }
    let [calories, proteins, fats, carbs, fiber, sugar, sodium] = values;

    if proteins == 0.0 && fats == 0.0 && carbs == 0.0 {
        return Err(ValidationError::MissingMacros);
    }

    Ok(NewFood {
        name,
        calories,
        proteins,
        fats,
        carbs,
        fiber,
        sugar,
        sodium,
    })
}

/// Absent and `null` fields stay unset so the store keeps what it has.
pub fn validate_update(payload: &FoodPayload) -> Result<FoodChanges, ValidationError> {
    let name = match &payload.name {
        None | Some(Value::Null) => None,
        Some(value) => Some(name(value)?),
    };

    let mut values = [None; 7];
    for (slot, (field, value)) in values.iter_mut().zip(payload.numeric_fields()) {
        *slot = match value {
            None | Some(Value::Null) => None,
            Some(value) => Some(number(field, value)?),
        };
    }
    let [calories, proteins, fats, carbs, fiber, sugar, sodium] = values;

    Ok(FoodChanges {
        name,
        calories,
        proteins,
        fats,
        carbs,
        fiber,
        sugar,
        sodium,
    })
}

fn name(value: &Value) -> Result<String, ValidationError> {
    match value.as_str().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::InvalidName),
    }
}

fn number(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    match value.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(ValidationError::InvalidField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> FoodPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn id_must_be_numeric() {
        assert_eq!(validate_id("42"), Ok(42));
        assert_eq!(
            validate_id("abc"),
            Err(ValidationError::NotANumber("abc".to_string()))
        );
        assert!(validate_id("").is_err());
        assert!(validate_id("3.5").is_err());
    }

    #[test]
    fn not_a_number_message_names_the_id() {
        let err = validate_id("abc").unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn create_defaults_absent_numbers_to_zero() {
        let food = validate_create(&payload(json!({"name": " Egg ", "proteins": 6}))).unwrap();
        assert_eq!(food.name, "Egg");
        assert_eq!(food.proteins, 6.0);
        assert_eq!(food.calories, 0.0);
        assert_eq!(food.sodium, 0.0);
    }

    #[test]
    fn create_requires_a_name() {
        for body in [
            json!({"proteins": 1}),
            json!({"name": "   ", "proteins": 1}),
            json!({"name": null, "proteins": 1}),
            json!({"name": 12, "proteins": 1}),
        ] {
            assert_eq!(
                validate_create(&payload(body)),
                Err(ValidationError::InvalidName)
            );
        }
    }

    #[test]
    fn create_reports_first_invalid_field_in_fixed_order() {
        let body = json!({"name": "Egg", "sodium": "x", "fats": "y", "proteins": 1});
        assert_eq!(
            validate_create(&payload(body)),
            Err(ValidationError::InvalidField("fats"))
        );
    }

    #[test]
    fn create_rejects_null_and_negative_numbers() {
        assert_eq!(
            validate_create(&payload(json!({"name": "Egg", "calories": null, "proteins": 1}))),
            Err(ValidationError::InvalidField("calories"))
        );
        assert_eq!(
            validate_create(&payload(json!({"name": "Egg", "proteins": 1, "sugar": -2}))),
            Err(ValidationError::InvalidField("sugar"))
        );
    }

    #[test]
    fn create_requires_a_macronutrient() {
        let body = json!({"name": "Salt", "sodium": 38000, "calories": 10});
        assert_eq!(
            validate_create(&payload(body)),
            Err(ValidationError::MissingMacros)
        );
    }

    #[test]
    fn update_leaves_absent_and_null_fields_unset() {
        let changes = validate_update(&payload(json!({"name": null, "sodium": 50}))).unwrap();
        assert_eq!(
            changes,
            FoodChanges {
                sodium: Some(50.0),
                ..FoodChanges::default()
            }
        );
    }

    #[test]
    fn update_keeps_explicit_zero() {
        let changes = validate_update(&payload(json!({"carbs": 0}))).unwrap();
        assert_eq!(changes.carbs, Some(0.0));
    }

    #[test]
    fn update_checks_supplied_fields() {
        assert_eq!(
            validate_update(&payload(json!({"name": ""}))),
            Err(ValidationError::InvalidName)
        );
        assert_eq!(
            validate_update(&payload(json!({"fiber": "lots"}))),
            Err(ValidationError::InvalidField("fiber"))
        );
    }
}
