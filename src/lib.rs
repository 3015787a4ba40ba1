#[macro_use]
extern crate log;

pub mod api;
pub mod bot;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod test_utils;

use crate::config::AppConfig;
use crate::db::{
    establish_connection_pool, run_db_migrations, MenuOperations, OrderOperations,
    RestaurantOperations, UserOperations,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub user_ops: UserOperations,
    pub restaurant_ops: RestaurantOperations,
    pub menu_ops: MenuOperations,
    pub order_ops: OrderOperations,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let db = establish_connection_pool(config.database_url.as_deref().unwrap_or_default());

        match run_db_migrations(db.clone()) {
            Ok(()) => info!("Database migrations are up to date"),
            Err(e) => error!(
                "Unable to run migrations, store requests will fail until the database is reachable: {}",
                e
            ),
        }

        let user_ops = UserOperations::new(db.clone());
        let restaurant_ops = RestaurantOperations::new(db.clone());
        let menu_ops = MenuOperations::new(db.clone());
        let order_ops = OrderOperations::new(db);

        AppState {
            config,
            user_ops,
            restaurant_ops,
            menu_ops,
            order_ops,
        }
    }
}
