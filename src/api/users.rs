use crate::api::error_response;
use crate::db::UserOperations;
use crate::enums::admin::UserListResponse;
use crate::models::user::{NewUser, User};
use actix_web::middleware::NormalizePath;
use actix_web::{get, post, web, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, user_ops: &UserOperations) {
    cfg.service(
        scope::scope("/api/users")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(user_ops.clone()))
            .service(list_users)
            .service(create_user)
            .service(get_user),
    );
}

#[utoipa::path(
    get,
    tag = "Users",
    path = "",
    responses(
        (status = 200, description = "Users fetched", body = UserListResponse)
    ),
    summary = "List users"
)]
#[get("")]
pub(super) async fn list_users(user_ops: web::Data<UserOperations>) -> impl Responder {
    match user_ops.list_users() {
        Ok(list) => HttpResponse::Ok().json(UserListResponse { users: list }),
        Err(e) => {
            error!("USER: list_users(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    post,
    tag = "Users",
    path = "",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Phone number already registered")
    ),
    summary = "Create a new user"
)]
#[post("")]
pub(super) async fn create_user(
    user_ops: web::Data<UserOperations>,
    req_data: web::Json<NewUser>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    match user_ops.create_user(req_data) {
        Ok(user) => {
            info!("New user created: {}", user.phone_number);
            HttpResponse::Created().json(user)
        }
        Err(e) => {
            error!("USER: create_user(): {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    tag = "Users",
    path = "/{id}",
    params(
        ("id", description = "Unique id of the user to fetch"),
    ),
    responses(
        (status = 200, description = "User fetched", body = User),
        (status = 404, description = "User missing")
    ),
    summary = "Fetch a user"
)]
#[get("/{id}")]
pub(super) async fn get_user(
    user_ops: web::Data<UserOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match user_ops.get_user(path.into_inner().0) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            error!("USER: get_user(): {}", e);
            error_response(&e)
        }
    }
}
