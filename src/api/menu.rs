use crate::api::error_response;
use crate::db::MenuOperations;
use crate::models::menu::{MenuItem, UpdateMenuItem};
use actix_web::middleware::NormalizePath;
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, menu_ops: &MenuOperations) {
    cfg.service(
        scope::scope("/api/menu-items")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(menu_ops.clone()))
            .service(get_menu_item)
            .service(update_menu_item)
            .service(remove_menu_item),
    );
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the item to fetch"),
    ),
    responses(
        (status = 200, description = "Menu item fetched", body = MenuItem),
        (status = 404, description = "Item missing or parent restaurant inactive")
    ),
    summary = "Fetch a menu item"
)]
#[get("/{id}")]
pub(super) async fn get_menu_item(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match menu_ops.get_menu_item(path.into_inner().0) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => {
            error!("MENU: get_menu_item(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    put,
    tag = "Menu",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the item to update"),
    ),
    request_body = UpdateMenuItem,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItem),
        (status = 400, description = "Empty update payload"),
        (status = 403, description = "Parent restaurant inactive"),
        (status = 404, description = "Item missing")
    ),
    summary = "Partially update a menu item"
)]
#[put("/{id}")]
pub(super) async fn update_menu_item(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateMenuItem>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    match menu_ops.update_menu_item(item_id, req_data.into_inner()) {
        Ok(item) => {
            info!("Menu item updated: {}", item.name);
            HttpResponse::Ok().json(item)
        }
        Err(e) => {
            error!("MENU: update_menu_item(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Menu",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the item to deactivate"),
    ),
    responses(
        (status = 204, description = "Menu item deactivated"),
        (status = 404, description = "Item missing")
    ),
    summary = "Soft-delete a menu item"
)]
#[delete("/{id}")]
pub(super) async fn remove_menu_item(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    match menu_ops.remove_menu_item(item_id) {
        Ok(()) => {
            info!("Menu item deactivated: {}", item_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("MENU: remove_menu_item(): {}", e);
            error_response(&e)
        }
    }
}
