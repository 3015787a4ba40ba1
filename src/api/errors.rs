use actix_web::error::JsonPayloadError;
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::db::RepositoryError;
use crate::enums::common::ErrorDetail;

pub fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().finish()).into()
}

/// Maps a repository failure onto its HTTP response. Domain errors carry
/// their detail verbatim; store-level failures are logged where they occur
/// and surface only a generic detail here.
pub(crate) fn error_response(err: &RepositoryError) -> HttpResponse {
    match err {
        RepositoryError::NotFound(detail) => HttpResponse::NotFound().json(ErrorDetail::new(detail)),
        RepositoryError::ValidationError(detail) => {
            HttpResponse::BadRequest().json(ErrorDetail::new(detail))
        }
        RepositoryError::Conflict(detail) => HttpResponse::Conflict().json(ErrorDetail::new(detail)),
        RepositoryError::Forbidden(detail) => {
            HttpResponse::Forbidden().json(ErrorDetail::new(detail))
        }
        RepositoryError::ConnectionPoolError(_) => HttpResponse::ServiceUnavailable()
            .json(ErrorDetail::new("Data store is unavailable")),
        RepositoryError::DatabaseError(_) | RepositoryError::Internal(_) => {
            HttpResponse::InternalServerError().json(ErrorDetail::new("Internal Server Error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn domain_errors_map_to_their_status_codes() {
        let cases = [
            (
                RepositoryError::NotFound("missing".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                RepositoryError::ValidationError("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::Conflict("dup".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                RepositoryError::Forbidden("no".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                RepositoryError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(error_response(&err).status(), expected, "{err}");
        }
    }

    #[test]
    fn database_errors_map_to_internal_server_error() {
        let err = RepositoryError::DatabaseError(diesel::result::Error::RollbackTransaction);
        assert_eq!(
            error_response(&err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
