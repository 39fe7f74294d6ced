//! HTTP API for managing food items and their nutrition facts, stored in
//! MySQL through diesel.

#[macro_use]
extern crate diesel;

pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod nutrition;
mod query;
pub mod schema;
pub mod store;
pub mod validate;

pub use handlers::{configure, route_not_found};
pub use store::{FoodStore, MysqlFoodStore};
