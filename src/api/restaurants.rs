use crate::api::error_response;
use crate::db::{MenuOperations, RestaurantOperations};
use crate::enums::admin::{MenuItemListResponse, RestaurantListResponse};
use crate::models::menu::{MenuItem, NewMenuItem};
use crate::models::restaurant::{NewRestaurant, Restaurant, UpdateRestaurant};
use actix_web::middleware::NormalizePath;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(
    cfg: &mut ServiceConfig,
    restaurant_ops: &RestaurantOperations,
    menu_ops: &MenuOperations,
) {
    cfg.service(
        scope::scope("/api/restaurants")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(restaurant_ops.clone()))
            .app_data(web::Data::new(menu_ops.clone()))
            .service(list_restaurants)
            .service(create_restaurant)
            .service(get_restaurant)
            .service(update_restaurant)
            .service(remove_restaurant)
            .service(list_menu_items)
            .service(create_menu_item),
    );
}

#[utoipa::path(
    get,
    tag = "Restaurants",
    path = "",
    responses(
        (status = 200, description = "Active restaurants fetched", body = RestaurantListResponse)
    ),
    summary = "List active restaurants"
)]
#[get("")]
pub(super) async fn list_restaurants(
    restaurant_ops: web::Data<RestaurantOperations>,
) -> impl Responder {
    match restaurant_ops.list_restaurants() {
        Ok(list) => HttpResponse::Ok().json(RestaurantListResponse { restaurants: list }),
        Err(e) => {
            error!("RESTAURANT: list_restaurants(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    post,
    tag = "Restaurants",
    path = "",
    request_body = NewRestaurant,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant)
    ),
    summary = "Create a new restaurant"
)]
#[post("")]
pub(super) async fn create_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    req_data: web::Json<NewRestaurant>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    match restaurant_ops.create_restaurant(req_data) {
        Ok(restaurant) => {
            info!("New restaurant created: {}", restaurant.name);
            HttpResponse::Created().json(restaurant)
        }
        Err(e) => {
            error!("RESTAURANT: create_restaurant(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    tag = "Restaurants",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the restaurant to fetch"),
    ),
    responses(
        (status = 200, description = "Restaurant fetched", body = Restaurant),
        (status = 404, description = "Restaurant missing or inactive")
    ),
    summary = "Fetch a restaurant"
)]
#[get("/{id}")]
pub(super) async fn get_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match restaurant_ops.get_restaurant(path.into_inner().0) {
        Ok(restaurant) => HttpResponse::Ok().json(restaurant),
        Err(e) => {
            error!("RESTAURANT: get_restaurant(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    put,
    tag = "Restaurants",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the restaurant to update"),
    ),
    request_body = UpdateRestaurant,
    responses(
        (status = 200, description = "Restaurant updated", body = Restaurant),
        (status = 400, description = "Empty update payload"),
        (status = 404, description = "Restaurant missing")
    ),
    summary = "Partially update a restaurant"
)]
#[put("/{id}")]
pub(super) async fn update_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateRestaurant>,
) -> impl Responder {
    let restaurant_id = path.into_inner().0;
    match restaurant_ops.update_restaurant(restaurant_id, req_data.into_inner()) {
        Ok(restaurant) => {
            info!("Restaurant updated: {}", restaurant.name);
            HttpResponse::Ok().json(restaurant)
        }
        Err(e) => {
            error!("RESTAURANT: update_restaurant(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Restaurants",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the restaurant to deactivate"),
    ),
    responses(
        (status = 204, description = "Restaurant deactivated"),
        (status = 404, description = "Restaurant missing")
    ),
    summary = "Soft-delete a restaurant"
)]
#[delete("/{id}")]
pub(super) async fn remove_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let restaurant_id = path.into_inner().0;
    match restaurant_ops.soft_delete_restaurant(restaurant_id) {
        Ok(()) => {
            info!("Restaurant deactivated: {}", restaurant_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("RESTAURANT: remove_restaurant(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/{id}/menu-items",
    params(
        ("id", description = "Unique id of the parent restaurant"),
    ),
    responses(
        (status = 200, description = "Available menu items fetched", body = MenuItemListResponse),
        (status = 404, description = "Restaurant missing or inactive")
    ),
    summary = "List a restaurant's available menu items"
)]
#[get("/{id}/menu-items")]
pub(super) async fn list_menu_items(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match menu_ops.list_menu_items(path.into_inner().0) {
        Ok(items) => HttpResponse::Ok().json(MenuItemListResponse { menu_items: items }),
        Err(e) => {
            error!("MENU: list_menu_items(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    post,
    tag = "Menu",
    path = "/{id}/menu-items",
    params(
        ("id", description = "Unique id of the parent restaurant"),
    ),
    request_body = NewMenuItem,
    responses(
        (status = 201, description = "Menu item created", body = MenuItem),
        (status = 404, description = "Restaurant missing or inactive")
    ),
    summary = "Create a menu item under a restaurant"
)]
#[post("/{id}/menu-items")]
pub(super) async fn create_menu_item(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<NewMenuItem>,
) -> impl Responder {
    let restaurant_id = path.into_inner().0;
    let req_data = req_data.into_inner();
    let item_name = req_data.name.clone();
    match menu_ops.add_menu_item(restaurant_id, req_data) {
        Ok(item) => {
            info!("New menu item created: {}", item_name);
            HttpResponse::Created().json(item)
        }
        Err(e) => {
            error!("MENU: create_menu_item(): {}", e);
            error_response(&e)
        }
    }
}
