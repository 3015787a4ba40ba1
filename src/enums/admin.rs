use serde::Serialize;
use utoipa::ToSchema;

use crate::models::menu::MenuItem;
use crate::models::restaurant::Restaurant;
use crate::models::user::User;

#[derive(Serialize, ToSchema)]
pub struct RestaurantListResponse {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Serialize, ToSchema)]
pub struct MenuItemListResponse {
    pub menu_items: Vec<MenuItem>,
}

#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
}
