use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::default_true;

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = crate::db::schema::restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(AsChangeset, Debug, Clone, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::restaurants)]
pub struct UpdateRestaurant {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: Option<bool>,
    pub owner_id: Option<i32>,
}

impl UpdateRestaurant {
    /// True when no field was supplied at all, i.e. the update is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
            && self.whatsapp_number.is_none()
            && self.description.is_none()
            && self.cuisine_type.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.is_active.is_none()
            && self.owner_id.is_none()
    }
}
