use crate::models::NewFood;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

pub fn calories_from_macros(proteins: f64, carbs: f64, fats: f64) -> f64 {
    proteins * KCAL_PER_GRAM_PROTEIN + carbs * KCAL_PER_GRAM_CARBS + fats * KCAL_PER_GRAM_FAT
}

/// Fills in calories from the macronutrients when none were given.
/// Only used on create; updates keep whatever calories are stored.
pub fn derive_calories(mut food: NewFood) -> NewFood {
    if food.calories == 0.0 {
        food.calories = calories_from_macros(food.proteins, food.carbs, food.fats);
    }
    food
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(calories: f64, proteins: f64, fats: f64, carbs: f64) -> NewFood {
        NewFood {
            name: "Egg".to_string(),
            calories,
            proteins,
            fats,
            carbs,
            fiber: 0.0,
            sugar: 0.0,
            sodium: 0.0,
        }
    }

    #[test]
    fn derives_when_calories_are_zero() {
        assert_eq!(derive_calories(food(0.0, 6.0, 5.0, 1.0)).calories, 73.0);
    }

    #[test]
    fn keeps_given_calories() {
        assert_eq!(derive_calories(food(80.0, 6.0, 5.0, 1.0)).calories, 80.0);
    }

    #[test]
    fn weights_fat_more_than_protein_and_carbs() {
        assert_eq!(calories_from_macros(1.0, 0.0, 0.0), 4.0);
        assert_eq!(calories_from_macros(0.0, 1.0, 0.0), 4.0);
        assert_eq!(calories_from_macros(0.0, 0.0, 1.0), 9.0);
    }
}
