use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::services::Session;

/// Header carrying the caller's user id, set by the auth proxy in front of the API.
pub const USER_ID_HEADER: &str = "x-user-id";

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        ready(Ok(Session::from_header_value(value)))
    }
}
