use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::order::{Order, OrderItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub menu_item_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub restaurant_id: i32,
    pub delivery_address: Option<String>,
    pub delivery_latitude: Option<f64>,
    pub delivery_longitude: Option<f64>,
    pub notes: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

/// The ordering customer is a raw caller-supplied id; no session or auth
/// scheme backs it.
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderQuery {
    pub current_user_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    pub fn new((order, items): (Order, Vec<OrderItem>)) -> Self {
        Self { order, items }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<OrderWithItems>,
}
