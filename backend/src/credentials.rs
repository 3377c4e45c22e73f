use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use crate::{AppState, error::AppError};

/// Bearer token of the caller, forwarded as-is to the Data Management API.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn token(&self) -> &str {
        &self.token
    }

    fn from_request_parts(req: &HttpRequest) -> Option<Self> {
        let from_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| {
                let (scheme, token) = value.trim().split_once(' ')?;
                scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_string())
            });

        let token = from_header.filter(|token| !token.is_empty()).or_else(|| {
            let cookie_name = req
                .app_data::<web::Data<AppState>>()
                .map(|state| state.token_cookie.as_str())?;
            req.cookie(cookie_name)
                .map(|cookie| cookie.value().trim().to_string())
                .filter(|token| !token.is_empty())
        })?;

        Some(Self { token })
    }
}

impl FromRequest for Credentials {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            Self::from_request_parts(req)
                .ok_or_else(|| AppError::Unauthorized("missing bearer token".into())),
        )
    }
}
