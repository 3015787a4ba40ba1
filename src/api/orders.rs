use crate::api::error_response;
use crate::db::{CancelOutcome, OrderOperations};
use crate::enums::common::ErrorDetail;
use crate::enums::orders::{OrderListResponse, OrderQuery, OrderRequest, OrderWithItems};
use crate::models::order::UpdateOrder;
use actix_web::middleware::NormalizePath;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, order_ops: &OrderOperations) {
    cfg.service(
        scope::scope("/api/orders")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(order_ops.clone()))
            .service(create_order)
            .service(list_orders)
            .service(get_order)
            .service(update_order)
            .service(cancel_order),
    );
}

#[utoipa::path(
    post,
    tag = "Orders",
    path = "",
    params(OrderQuery),
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderWithItems),
        (status = 400, description = "Empty order, unavailable item or foreign menu item"),
        (status = 404, description = "Customer, restaurant or menu item missing")
    ),
    summary = "Create a new order"
)]
#[post("")]
pub(super) async fn create_order(
    order_ops: web::Data<OrderOperations>,
    query: web::Query<OrderQuery>,
    req_data: web::Json<OrderRequest>,
) -> impl Responder {
    let customer = query.into_inner().current_user_id;
    match order_ops.create_order(customer, req_data.into_inner()) {
        Ok(created) => {
            info!(
                "New order created: {} for customer {}",
                created.0.id, customer
            );
            HttpResponse::Created().json(OrderWithItems::new(created))
        }
        Err(e) => {
            error!("ORDER: create_order(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "",
    responses(
        (status = 200, description = "Orders fetched, newest first", body = OrderListResponse)
    ),
    summary = "List orders"
)]
#[get("")]
pub(super) async fn list_orders(order_ops: web::Data<OrderOperations>) -> impl Responder {
    match order_ops.list_orders() {
        Ok(list) => HttpResponse::Ok().json(OrderListResponse {
            orders: list.into_iter().map(OrderWithItems::new).collect(),
        }),
        Err(e) => {
            error!("ORDER: list_orders(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the order to fetch"),
    ),
    responses(
        (status = 200, description = "Order fetched", body = OrderWithItems),
        (status = 404, description = "Order missing")
    ),
    summary = "Fetch an order"
)]
#[get("/{id}")]
pub(super) async fn get_order(
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match order_ops.get_order(path.into_inner().0) {
        Ok(found) => HttpResponse::Ok().json(OrderWithItems::new(found)),
        Err(e) => {
            error!("ORDER: get_order(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    put,
    tag = "Orders",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the order to update"),
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = OrderWithItems),
        (status = 400, description = "Empty update payload"),
        (status = 404, description = "Order missing")
    ),
    summary = "Partially update an order"
)]
#[put("/{id}")]
pub(super) async fn update_order(
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateOrder>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    match order_ops.update_order(order_id, req_data.into_inner()) {
        Ok(updated) => {
            info!("Order updated: {}", order_id);
            HttpResponse::Ok().json(OrderWithItems::new(updated))
        }
        Err(e) => {
            error!("ORDER: update_order(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Orders",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the order to cancel"),
    ),
    responses(
        (status = 200, description = "Order cancelled", body = OrderWithItems),
        (status = 400, description = "Order already delivered or cancelled"),
        (status = 404, description = "Order missing")
    ),
    summary = "Cancel an order"
)]
#[delete("/{id}")]
pub(super) async fn cancel_order(
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    match order_ops.cancel_order(order_id) {
        Ok(CancelOutcome::Cancelled(order)) => {
            info!("Order cancelled: {}", order_id);
            HttpResponse::Ok().json(order)
        }
        Ok(CancelOutcome::AlreadyTerminal(order)) => {
            let detail = format!("Order {} is already {}", order.id, order.status.as_str());
            error!("ORDER: cancel_order(): {}", detail);
            // The current snapshot rides along for client convenience.
            let snapshot = serde_json::to_string(&order).unwrap_or_default();
            HttpResponse::BadRequest()
                .insert_header(("x-current-order", snapshot))
                .json(ErrorDetail::new(detail))
        }
        Err(e) => {
            error!("ORDER: cancel_order(): {}", e);
            error_response(&e)
        }
    }
}
