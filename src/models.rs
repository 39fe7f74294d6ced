use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::foods;

/// A stored food item, one row of the `foods` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Food {
    pub id: i32,
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

/// A validated food item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[table_name = "foods"]
pub struct NewFood {
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NewFood {
    pub fn with_id(self, id: i32) -> Food {
        Food {
            id,
            name: self.name,
            calories: self.calories,
            proteins: self.proteins,
            fats: self.fats,
            carbs: self.carbs,
            fiber: self.fiber,
            sugar: self.sugar,
            sodium: self.sodium,
        }
    }
}

/// A validated partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodChanges {
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub proteins: Option<f64>,
    pub fats: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

impl FoodChanges {
    /// Applies the changes on top of `food`, keeping every unset field.
    pub fn apply_to(&self, food: &mut Food) {
        if let Some(name) = &self.name {
            food.name = name.clone();
        }
        let fields = [
            (&mut food.calories, self.calories),
            (&mut food.proteins, self.proteins),
            (&mut food.fats, self.fats),
            (&mut food.carbs, self.carbs),
            (&mut food.fiber, self.fiber),
            (&mut food.sugar, self.sugar),
            (&mut food.sodium, self.sodium),
        ];
        for (stored, change) in fields {
            if let Some(value) = change {
                *stored = value;
            }
        }
    }
}

/// Request body for create and update, before validation.
///
/// Each field keeps the raw JSON value so the validator can tell an absent
/// field (`None`) from an explicit `null` (`Some(Value::Null)`). Only JSON
/// objects deserialize into a payload; arrays and scalars are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct FoodPayload {
    pub name: Option<Value>,
    pub calories: Option<Value>,
    pub proteins: Option<Value>,
    pub fats: Option<Value>,
    pub carbs: Option<Value>,
    pub fiber: Option<Value>,
    pub sugar: Option<Value>,
    pub sodium: Option<Value>,
}

impl From<Map<String, Value>> for FoodPayload {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            calories: body.remove("calories"),
            proteins: body.remove("proteins"),
            fats: body.remove("fats"),
            carbs: body.remove("carbs"),
            fiber: body.remove("fiber"),
            sugar: body.remove("sugar"),
            sodium: body.remove("sodium"),
        }
    }
}

impl FoodPayload {
    /// Numeric fields in the order they are validated.
    pub fn numeric_fields(&self) -> [(&'static str, Option<&Value>); 7] {
        [
            ("calories", self.calories.as_ref()),
            ("proteins", self.proteins.as_ref()),
            ("fats", self.fats.as_ref()),
            ("carbs", self.carbs.as_ref()),
            ("fiber", self.fiber.as_ref()),
            ("sugar", self.sugar.as_ref()),
            ("sodium", self.sodium.as_ref()),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedFood {
    pub message: String,
    #[serde(rename = "newFood")]
    pub new_food: Food,
}

#[derive(Debug, Serialize)]
pub struct UpdatedFood {
    pub message: String,
    #[serde(rename = "updatedFood")]
    pub updated_food: Food,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pong {
    pub result: String,
}
