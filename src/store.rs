use diesel::mysql::MysqlConnection;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use failsafe::backoff::EqualJittered;
use failsafe::failure_policy::{ConsecutiveFailures, OrElse, SuccessRateOverTimeWindow};
use failsafe::{CircuitBreaker, StateMachine};
use thiserror::Error;

use crate::models::{Food, FoodChanges, NewFood};
use crate::query;

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

pub type CircuitBreakerType = StateMachine<
    OrElse<SuccessRateOverTimeWindow<EqualJittered>, ConsecutiveFailures<EqualJittered>>,
    (),
>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not check out a database connection: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("database is unavailable, circuit breaker is open")]
    Unavailable,
}

/// Persistence operations on food items.
///
/// Absence is `Ok(None)`; errors are reserved for failures of the store
/// itself.
pub trait FoodStore: Send + Sync {
    fn list(&self) -> Result<Vec<Food>, StoreError>;

    fn find(&self, id: i32) -> Result<Option<Food>, StoreError>;

    /// `Ok(None)` means the store accepted the insert but reported no
    /// affected rows.
    fn insert(&self, food: &NewFood) -> Result<Option<Food>, StoreError>;

    /// Overwrites the set fields of `changes` and returns the updated row.
    fn update(&self, id: i32, changes: &FoodChanges) -> Result<Option<Food>, StoreError>;

    /// Removes the row and returns what it held.
    fn delete(&self, id: i32) -> Result<Option<Food>, StoreError>;

    fn ping(&self) -> Result<String, StoreError>;
}

pub struct MysqlFoodStore {
    pool: DbPool,
    circuit_breaker: CircuitBreakerType,
}

impl MysqlFoodStore {
    pub fn new(pool: DbPool, circuit_breaker: CircuitBreakerType) -> Self {
        Self {
            pool,
            circuit_breaker,
        }
    }

    /// Runs `f` on a pooled connection through the circuit breaker. The
    /// connection goes back to the pool when `f` returns.
    fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&MysqlConnection) -> diesel::QueryResult<T>,
    {
        let result = self.circuit_breaker.call(|| {
            let conn: PooledConnection<ConnectionManager<MysqlConnection>> = self.pool.get()?;
            f(&conn).map_err(StoreError::from)
        });
        match result {
            Ok(value) => Ok(value),
            Err(failsafe::Error::Inner(e)) => Err(e),
            Err(failsafe::Error::Rejected) => {
                log::warn!("rejecting database call, circuit breaker is open");
                Err(StoreError::Unavailable)
            }
        }
    }
}

impl FoodStore for MysqlFoodStore {
    fn list(&self) -> Result<Vec<Food>, StoreError> {
        self.with_conn(query::find_all_foods)
    }

    fn find(&self, id: i32) -> Result<Option<Food>, StoreError> {
        self.with_conn(|conn| query::find_food(id, conn))
    }

    fn insert(&self, food: &NewFood) -> Result<Option<Food>, StoreError> {
        self.with_conn(|conn| query::insert_food(food, conn))
    }

    fn update(&self, id: i32, changes: &FoodChanges) -> Result<Option<Food>, StoreError> {
        self.with_conn(|conn| query::update_food(id, changes, conn))
    }

    fn delete(&self, id: i32) -> Result<Option<Food>, StoreError> {
        self.with_conn(|conn| query::delete_food(id, conn))
    }

    fn ping(&self) -> Result<String, StoreError> {
        self.with_conn(query::ping)
    }
}
