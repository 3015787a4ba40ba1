use crate::db::errors::RepositoryError;
use crate::db::DbConnection;
use crate::models::menu::{MenuItem, NewMenuItem, UpdateMenuItem};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct MenuOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

/// Missing and inactive parents are indistinguishable to callers: both
/// read as "restaurant not found".
fn ensure_active_restaurant(
    conn: &mut PgConnection,
    target_restaurant_id: i32,
) -> Result<(), RepositoryError> {
    use crate::db::schema::restaurants::dsl::*;

    let active: bool = restaurants
        .find(target_restaurant_id)
        .select(is_active)
        .first(conn)
        .map_err(|e| match e {
            Error::NotFound => RepositoryError::NotFound(format!(
                "Restaurant {target_restaurant_id} not found"
            )),
            other => RepositoryError::DatabaseError(other),
        })?;

    if !active {
        return Err(RepositoryError::NotFound(format!(
            "Restaurant {target_restaurant_id} not found"
        )));
    }
    Ok(())
}

impl MenuOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn list_menu_items(
        &self,
        target_restaurant_id: i32,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_menu_items: failed to acquire DB connection for restaurant {}: {}",
                target_restaurant_id, e
            );
            e
        })?;

        ensure_active_restaurant(conn.connection(), target_restaurant_id)?;

        use crate::db::schema::menu_items::dsl::*;
        menu_items
            .filter(restaurant_id.eq(target_restaurant_id))
            .filter(is_available.eq(true))
            .order_by(id.asc())
            .load::<MenuItem>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_menu_items: error fetching menu items for restaurant {}: {}",
                    target_restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn add_menu_item(
        &self,
        target_restaurant_id: i32,
        menu_item: NewMenuItem,
    ) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "add_menu_item: failed to acquire DB connection for restaurant {}: {}",
                target_restaurant_id, e
            );
            e
        })?;

        ensure_active_restaurant(conn.connection(), target_restaurant_id)?;

        use crate::db::schema::menu_items::dsl::*;
        diesel::insert_into(menu_items)
            .values((
                restaurant_id.eq(target_restaurant_id),
                name.eq(&menu_item.name),
                description.eq(menu_item.description.as_deref()),
                price.eq(menu_item.price),
                category.eq(menu_item.category.as_deref()),
                image_url.eq(menu_item.image_url.as_deref()),
                is_available.eq(menu_item.is_available),
            ))
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "add_menu_item: error inserting menu item '{}': {}",
                    menu_item.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_menu_item(&self, item_id: i32) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_menu_item: failed to acquire DB connection for id {}: {}",
                item_id, e
            );
            e
        })?;

        use crate::db::schema::{menu_items, restaurants};
        menu_items::table
            .inner_join(restaurants::table)
            .filter(menu_items::id.eq(item_id))
            .filter(restaurants::is_active.eq(true))
            .select(MenuItem::as_select())
            .first::<MenuItem>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => {
                    RepositoryError::NotFound(format!("Menu item {item_id} not found"))
                }
                other => {
                    error!(
                        "get_menu_item: error fetching menu item with id {}: {}",
                        item_id, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn update_menu_item(
        &self,
        item_id: i32,
        changes: UpdateMenuItem,
    ) -> Result<MenuItem, RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No fields provided for update".to_string(),
            ));
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_menu_item: failed to acquire DB connection for id {}: {}",
                item_id, e
            );
            e
        })?;

        let item: MenuItem = {
            use crate::db::schema::menu_items::dsl::*;
            menu_items
                .find(item_id)
                .first(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("Menu item {item_id} not found"))
                    }
                    other => {
                        error!(
                            "update_menu_item: error fetching menu item with id {}: {}",
                            item_id, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?
        };

        let parent_active: bool = {
            use crate::db::schema::restaurants::dsl::*;
            restaurants
                .find(item.restaurant_id)
                .select(is_active)
                .first(conn.connection())
                .map_err(|e| {
                    error!(
                        "update_menu_item: error fetching restaurant {} for item {}: {}",
                        item.restaurant_id, item_id, e
                    );
                    RepositoryError::DatabaseError(e)
                })?
        };
        if !parent_active {
            return Err(RepositoryError::Forbidden(format!(
                "Restaurant {} is inactive",
                item.restaurant_id
            )));
        }

        use crate::db::schema::menu_items::dsl::*;
        diesel::update(menu_items.find(item_id))
            .set(&changes)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "update_menu_item: error updating menu item with id {}: {}",
                    item_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Soft delete: flips `is_available` off. Deleting an already unavailable
    /// item is a successful no-op.
    pub fn remove_menu_item(&self, item_id: i32) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "remove_menu_item: failed to acquire DB connection for id {}: {}",
                item_id, e
            );
            e
        })?;

        use crate::db::schema::menu_items::dsl::*;
        let affected = diesel::update(menu_items.find(item_id))
            .set(is_available.eq(false))
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "remove_menu_item: error deactivating menu item with id {}: {}",
                    item_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Menu item {item_id} not found"
            )));
        }
        Ok(())
    }
}
