use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use diesel::mysql::MysqlConnection;
use diesel::r2d2::{self, ConnectionManager};
use failsafe::Config as BreakerConfig;

use food_api::config::Config;
use food_api::{configure, route_not_found, FoodStore, MysqlFoodStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // set up database connection pool
    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url());
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    log::info!(
        "connected to mysql at {}:{}/{}",
        config.db_host,
        config.db_port,
        config.db_name
    );

    let circuit_breaker = BreakerConfig::new().build();
    let store: Arc<dyn FoodStore> = Arc::new(MysqlFoodStore::new(pool, circuit_breaker));
    let store = web::Data::from(store);

    log::info!("starting HTTP server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .default_service(web::route().to(route_not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("server stopped, closing database pool");
    Ok(())
}
