use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// Extracts the authenticated caller's id from request extensions.
///
/// `AuthMiddleware` inserts the id after verifying the bearer token, so this
/// extractor is the only way a handler obtains an identity. If the id is
/// missing the route was not behind the gate, which is a wiring error; the
/// safe response is 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUserId(pub Uuid);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Uuid>().copied() {
            Some(user_id) => ready(Ok(AuthenticatedUserId(user_id))),
            None => {
                let err = AppError::Unauthorized("No token, authorization denied".into());
                ready(Err(err.into()))
            }
        }
    }
}
