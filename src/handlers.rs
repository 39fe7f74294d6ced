use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::controller;
use crate::error::ApiError;
use crate::models::{CreatedFood, FoodPayload, Pong, UpdatedFood};
use crate::store::FoodStore;

type Store = web::Data<dyn FoodStore>;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub route: &'static str,
}

pub const AVAILABLE_ROUTES: [RouteInfo; 6] = [
    RouteInfo {
        method: "GET",
        route: "/api/foods",
    },
    RouteInfo {
        method: "GET",
        route: "/api/foods/:id",
    },
    RouteInfo {
        method: "POST",
        route: "/api/foods",
    },
    RouteInfo {
        method: "PATCH",
        route: "/api/foods/:id",
    },
    RouteInfo {
        method: "DELETE",
        route: "/api/foods/:id",
    },
    RouteInfo {
        method: "GET",
        route: "/ping",
    },
];

#[get("/api/foods")]
async fn get_foods(store: Store) -> Result<HttpResponse, ApiError> {
    let foods = web::block(move || controller::list_foods(store.get_ref())).await??;
    Ok(HttpResponse::Ok().json(foods))
}

#[get("/api/foods/{id}")]
async fn get_food_by_id(store: Store, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let food = web::block(move || controller::get_food(store.get_ref(), &id)).await??;
    Ok(HttpResponse::Ok().json(food))
}

#[post("/api/foods")]
async fn create_food(
    store: Store,
    payload: web::Json<FoodPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let food = web::block(move || controller::create_food(store.get_ref(), &payload)).await??;
    Ok(HttpResponse::Created().json(CreatedFood {
        message: "Food created successfully".to_string(),
        new_food: food,
    }))
}

#[patch("/api/foods/{id}")]
async fn update_food(
    store: Store,
    id: web::Path<String>,
    payload: web::Json<FoodPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let payload = payload.into_inner();
    let food =
        web::block(move || controller::update_food(store.get_ref(), &id, &payload)).await??;
    Ok(HttpResponse::Ok().json(UpdatedFood {
        message: format!("Food with ID: {} updated", food.id),
        updated_food: food,
    }))
}

#[delete("/api/foods/{id}")]
async fn delete_food(store: Store, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let food = web::block(move || controller::delete_food(store.get_ref(), &id)).await??;
    Ok(HttpResponse::Ok().json(food))
}

#[get("/ping")]
async fn ping(store: Store) -> Result<HttpResponse, ApiError> {
    let result = web::block(move || controller::ping(store.get_ref())).await??;
    Ok(HttpResponse::Ok().json(Pong { result }))
}

/// Fallback for every request no route matched.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": format!(
            "Not found: Method: {} Route: '{}' doesn't exist.",
            req.method(),
            req.uri()
        ),
        "availableRoutes": AVAILABLE_ROUTES,
    }))
}

/// Registers the food routes, the ping probe, and JSON body handling.
/// The 404 fallback is installed on the `App` with
/// `default_service(web::route().to(route_not_found))`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::MalformedBody(err.to_string()).into()
    }))
    .service(get_foods)
    .service(get_food_by_id)
    .service(create_food)
    .service(update_food)
    .service(delete_food)
    .service(ping);
}
