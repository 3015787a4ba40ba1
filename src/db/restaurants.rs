use crate::db::errors::RepositoryError;
use crate::db::schema::restaurants::dsl::*;
use crate::db::DbConnection;
use crate::models::restaurant::{NewRestaurant, Restaurant, UpdateRestaurant};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct RestaurantOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl RestaurantOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn list_restaurants(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_restaurants: failed to acquire DB connection: {}", e);
            e
        })?;

        restaurants
            .filter(is_active.eq(true))
            .order_by(id.asc())
            .load::<Restaurant>(conn.connection())
            .map_err(|e| {
                error!("list_restaurants: error fetching restaurants: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_restaurant(&self, restaurant_id: i32) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_restaurant: failed to acquire DB connection for id {}: {}",
                restaurant_id, e
            );
            e
        })?;

        // Soft-deleted restaurants are hidden from reads.
        restaurants
            .find(restaurant_id)
            .filter(is_active.eq(true))
            .first::<Restaurant>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!(
                    "Restaurant {restaurant_id} not found"
                )),
                other => {
                    error!(
                        "get_restaurant: error fetching restaurant with id {}: {}",
                        restaurant_id, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn create_restaurant(
        &self,
        new_restaurant: NewRestaurant,
    ) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_restaurant: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(restaurants)
            .values(&new_restaurant)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_restaurant: error inserting restaurant '{}': {}",
                    new_restaurant.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn update_restaurant(
        &self,
        restaurant_id: i32,
        changes: UpdateRestaurant,
    ) -> Result<Restaurant, RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No fields provided for update".to_string(),
            ));
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_restaurant: failed to acquire DB connection for id {}: {}",
                restaurant_id, e
            );
            e
        })?;

        diesel::update(restaurants.find(restaurant_id))
            .set(&changes)
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!(
                    "Restaurant {restaurant_id} not found"
                )),
                other => {
                    error!(
                        "update_restaurant: error updating restaurant with id {}: {}",
                        restaurant_id, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    /// Soft delete: flips `is_active` off. Deleting an already inactive
    /// restaurant is a successful no-op.
    pub fn soft_delete_restaurant(&self, restaurant_id: i32) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "soft_delete_restaurant: failed to acquire DB connection for id {}: {}",
                restaurant_id, e
            );
            e
        })?;

        let affected = diesel::update(restaurants.find(restaurant_id))
            .set(is_active.eq(false))
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "soft_delete_restaurant: error deactivating restaurant with id {}: {}",
                    restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Restaurant {restaurant_id} not found"
            )));
        }
        Ok(())
    }
}
