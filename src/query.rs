use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text, Unsigned, Varchar};

use crate::models::{Food, FoodChanges, NewFood};
use crate::schema::foods;

no_arg_sql_function!(
    last_insert_id,
    Unsigned<BigInt>,
    "Id generated by the last INSERT on this connection"
);

const UPDATE_FOOD: &str = "UPDATE foods SET \
    name = IFNULL(?, name), \
    calories = IFNULL(?, calories), \
    proteins = IFNULL(?, proteins), \
    fats = IFNULL(?, fats), \
    carbs = IFNULL(?, carbs), \
    fiber = IFNULL(?, fiber), \
    sugar = IFNULL(?, sugar), \
    sodium = IFNULL(?, sodium) \
    WHERE id = ?";

/// `SELECT ... FOR UPDATE` of one row, for use inside a transaction.
macro_rules! locked_food {
    ($food_id:expr) => {
        foods::table.find($food_id).for_update()
    };
}

/// The coalescing update, binds in column order followed by the id.
/// Unset fields bind as NULL, so `IFNULL` keeps the stored column value.
macro_rules! update_statement {
    ($food_id:expr, $changes:expr) => {
        diesel::sql_query(UPDATE_FOOD)
            .bind::<Nullable<Varchar>, _>($changes.name.clone())
            .bind::<Nullable<Double>, _>($changes.calories)
            .bind::<Nullable<Double>, _>($changes.proteins)
            .bind::<Nullable<Double>, _>($changes.fats)
            .bind::<Nullable<Double>, _>($changes.carbs)
            .bind::<Nullable<Double>, _>($changes.fiber)
            .bind::<Nullable<Double>, _>($changes.sugar)
            .bind::<Nullable<Double>, _>($changes.sodium)
            .bind::<Integer, _>($food_id)
    };
}

pub(crate) fn find_all_foods(conn: &MysqlConnection) -> QueryResult<Vec<Food>> {
    foods::table.load::<Food>(conn)
}

pub(crate) fn find_food(food_id: i32, conn: &MysqlConnection) -> QueryResult<Option<Food>> {
    foods::table.find(food_id).first::<Food>(conn).optional()
}

fn lock_food(food_id: i32, conn: &MysqlConnection) -> QueryResult<Option<Food>> {
    locked_food!(food_id).first::<Food>(conn).optional()
}

/// Returns `None` when the insert reports no affected rows.
pub(crate) fn insert_food(new_food: &NewFood, conn: &MysqlConnection) -> QueryResult<Option<Food>> {
    conn.transaction(|| {
        let inserted = diesel::insert_into(foods::table)
            .values(new_food)
            .execute(conn)?;
        if inserted == 0 {
            return Ok(None);
        }
        let id = diesel::select(last_insert_id).get_result::<u64>(conn)?;
        let id = i32::try_from(id)
            .map_err(|e| diesel::result::Error::DeserializationError(Box::new(e)))?;
        Ok(Some(new_food.clone().with_id(id)))
    })
}

/// Locks the row, applies the coalescing update and reads the row back.
pub(crate) fn update_food(
    food_id: i32,
    changes: &FoodChanges,
    conn: &MysqlConnection,
) -> QueryResult<Option<Food>> {
    conn.transaction(|| {
        if lock_food(food_id, conn)?.is_none() {
            return Ok(None);
        }
        update_statement!(food_id, changes).execute(conn)?;
        find_food(food_id, conn)
    })
}

/// Returns the row as it was before deletion.
pub(crate) fn delete_food(food_id: i32, conn: &MysqlConnection) -> QueryResult<Option<Food>> {
    conn.transaction(|| {
        let food = match lock_food(food_id, conn)? {
            Some(food) => food,
            None => return Ok(None),
        };
        let deleted = diesel::delete(foods::table.find(food_id)).execute(conn)?;
        Ok(if deleted > 0 { Some(food) } else { None })
    })
}

pub(crate) fn ping(conn: &MysqlConnection) -> QueryResult<String> {
    diesel::select(diesel::dsl::sql::<Text>("'pong'")).get_result::<String>(conn)
}
