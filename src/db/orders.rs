use std::collections::HashMap;

use crate::db::{DbConnection, RepositoryError};
use crate::enums::orders::OrderRequest;
use crate::models::menu::MenuItem;
use crate::models::order::{Order, OrderItem, OrderStatus, PaymentStatus, UpdateOrder};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::{debug, error};

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::order_items)]
struct NewOrderItemRow {
    order_id: i32,
    menu_item_id: i32,
    quantity: i32,
    price_at_order: f64,
    notes: Option<String>,
}

/// Result of a cancel request. A terminal order is returned untouched so
/// the caller can attach the current snapshot to its rejection.
#[derive(Debug)]
pub enum CancelOutcome {
    Cancelled(Order),
    AlreadyTerminal(Order),
}

#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_order(
        &self,
        customer: i32,
        request: OrderRequest,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        {
            use crate::db::schema::users::dsl::*;
            users
                .find(customer)
                .select(id)
                .first::<i32>(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("Customer {customer} not found"))
                    }
                    other => {
                        error!(
                            "create_order: error fetching customer {}: {}",
                            customer, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?;
        }

        {
            use crate::db::schema::restaurants::dsl::*;
            let active: bool = restaurants
                .find(request.restaurant_id)
                .select(is_active)
                .first(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => RepositoryError::NotFound(format!(
                        "Restaurant {} not found",
                        request.restaurant_id
                    )),
                    other => {
                        error!(
                            "create_order: error fetching restaurant {}: {}",
                            request.restaurant_id, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?;
            if !active {
                return Err(RepositoryError::ValidationError(format!(
                    "Restaurant {} is not active",
                    request.restaurant_id
                )));
            }
        }

        if request.items.is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "Order for customer {customer} contains no items"
            )));
        }

        // Price every line against the menu as it stands right now; the
        // snapshot is what gets persisted, not the live menu price.
        let mut order_total = 0.0_f64;
        let mut priced_lines: Vec<(MenuItem, i32, Option<String>)> = Vec::new();
        for line in &request.items {
            let item: MenuItem = {
                use crate::db::schema::menu_items::dsl::*;
                menu_items
                    .find(line.menu_item_id)
                    .first(conn.connection())
                    .map_err(|e| match e {
                        Error::NotFound => RepositoryError::NotFound(format!(
                            "Menu item {} not found",
                            line.menu_item_id
                        )),
                        other => {
                            error!(
                                "create_order: error fetching menu item {}: {}",
                                line.menu_item_id, other
                            );
                            RepositoryError::DatabaseError(other)
                        }
                    })?
            };

            if !item.is_available {
                return Err(RepositoryError::ValidationError(format!(
                    "Menu item '{}' is not available",
                    item.name
                )));
            }
            if item.restaurant_id != request.restaurant_id {
                return Err(RepositoryError::ValidationError(format!(
                    "Menu item {} does not belong to restaurant {}",
                    item.id, request.restaurant_id
                )));
            }

            order_total += item.price * f64::from(line.quantity);
            priced_lines.push((item, line.quantity, line.notes.clone()));
        }

        conn.connection().transaction(|conn| {
            use crate::db::schema::{order_items, orders};

            let order: Order = diesel::insert_into(orders::table)
                .values((
                    orders::customer_id.eq(customer),
                    orders::restaurant_id.eq(request.restaurant_id),
                    orders::status.eq(OrderStatus::Pending),
                    orders::total_amount.eq(order_total),
                    orders::delivery_address.eq(request.delivery_address.as_deref()),
                    orders::delivery_latitude.eq(request.delivery_latitude),
                    orders::delivery_longitude.eq(request.delivery_longitude),
                    orders::payment_status.eq(PaymentStatus::Pending),
                    orders::notes.eq(request.notes.as_deref()),
                ))
                .get_result(conn)
                .map_err(RepositoryError::DatabaseError)?;

            let rows: Vec<NewOrderItemRow> = priced_lines
                .iter()
                .map(|(item, line_quantity, line_notes)| NewOrderItemRow {
                    order_id: order.id,
                    menu_item_id: item.id,
                    quantity: *line_quantity,
                    price_at_order: item.price,
                    notes: line_notes.clone(),
                })
                .collect();

            let inserted: Vec<OrderItem> = diesel::insert_into(order_items::table)
                .values(&rows)
                .get_results(conn)
                .map_err(RepositoryError::DatabaseError)?;

            // An undercount rolls the whole order back instead of leaving an
            // orphaned header behind.
            if inserted.len() != rows.len() {
                error!(
                    "create_order: stored {} of {} order items for order {}",
                    inserted.len(),
                    rows.len(),
                    order.id
                );
                return Err(RepositoryError::Internal(format!(
                    "Order {} persisted only {} of {} items",
                    order.id,
                    inserted.len(),
                    rows.len()
                )));
            }

            debug!(
                "create_order: order {} created for customer {} with {} items, total {}",
                order.id,
                customer,
                inserted.len(),
                order_total
            );
            Ok((order, inserted))
        })
    }

    pub fn list_orders(&self) -> Result<Vec<(Order, Vec<OrderItem>)>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{order_items, orders};

        let all_orders = orders::table
            .order_by(orders::created_at.desc())
            .then_order_by(orders::id.desc())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!("list_orders: error fetching orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let order_ids: Vec<i32> = all_orders.iter().map(|order| order.id).collect();
        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order_by(order_items::id.asc())
            .load::<OrderItem>(conn.connection())
            .map_err(|e| {
                error!("list_orders: error fetching order items: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let mut grouped: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row);
        }

        Ok(all_orders
            .into_iter()
            .map(|order| {
                let items = grouped.remove(&order.id).unwrap_or_default();
                (order, items)
            })
            .collect())
    }

    pub fn get_order(&self, order_id: i32) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order: failed to acquire DB connection for id {}: {}",
                order_id, e
            );
            e
        })?;

        let order = {
            use crate::db::schema::orders::dsl::*;
            orders
                .find(order_id)
                .first::<Order>(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("Order {order_id} not found"))
                    }
                    other => {
                        error!(
                            "get_order: error fetching order with id {}: {}",
                            order_id, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?
        };

        let items = self.load_order_items(conn.connection(), order_id)?;
        Ok((order, items))
    }

    pub fn update_order(
        &self,
        order_id: i32,
        changes: UpdateOrder,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No fields provided for update".to_string(),
            ));
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_order: failed to acquire DB connection for id {}: {}",
                order_id, e
            );
            e
        })?;

        let order = {
            use crate::db::schema::orders::dsl::*;
            diesel::update(orders.find(order_id))
                .set(&changes)
                .get_result::<Order>(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("Order {order_id} not found"))
                    }
                    other => {
                        error!(
                            "update_order: error updating order with id {}: {}",
                            order_id, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?
        };

        let items = self.load_order_items(conn.connection(), order_id)?;
        Ok((order, items))
    }

    pub fn cancel_order(&self, order_id: i32) -> Result<CancelOutcome, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "cancel_order: failed to acquire DB connection for id {}: {}",
                order_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            use crate::db::schema::orders::dsl::*;

            let order: Order = orders
                .find(order_id)
                .first(conn)
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("Order {order_id} not found"))
                    }
                    other => {
                        error!(
                            "cancel_order: error fetching order with id {}: {}",
                            order_id, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?;

            if order.status.is_terminal() {
                return Ok(CancelOutcome::AlreadyTerminal(order));
            }

            let cancelled = diesel::update(orders.find(order_id))
                .set(status.eq(OrderStatus::Cancelled))
                .get_result::<Order>(conn)
                .map_err(|e| {
                    error!(
                        "cancel_order: error cancelling order with id {}: {}",
                        order_id, e
                    );
                    RepositoryError::DatabaseError(e)
                })?;
            Ok(CancelOutcome::Cancelled(cancelled))
        })
    }

    fn load_order_items(
        &self,
        conn: &mut PgConnection,
        target_order_id: i32,
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        use crate::db::schema::order_items::dsl::*;
        order_items
            .filter(order_id.eq(target_order_id))
            .order_by(id.asc())
            .load::<OrderItem>(conn)
            .map_err(|e| {
                error!(
                    "load_order_items: error fetching items for order {}: {}",
                    target_order_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}
