//! JWT extraction middleware
//!
//! Verifies the Bearer token (or `?token=` query fallback for websocket
//! upgrades) and stores `BackendClaims` in request extensions. A request
//! without any token passes through with no claims - public pages and
//! protected handlers share the /api scope, and the `CurrentUser`
//! extractor rejects the anonymous ones. A present-but-invalid token is
//! always an error.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::BackendClaims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

/// Token from "Bearer <token>", if the header is present and well-formed.
fn extract_bearer_from_header(
    header_value: Option<&header::HeaderValue>,
) -> Result<Option<String>, AppError> {
    let Some(value) = header_value else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }
    Ok(Some(parts[1].to_string()))
}

/// Browsers cannot set headers on websocket upgrades, so those requests
/// carry the token as a query parameter instead.
fn extract_token_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    for pair in query.split('&') {
        if let Some(token) = pair.strip_prefix("token=") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        let token = match extract_bearer_from_header(auth_header.as_ref()) {
            Ok(Some(token)) => Some(token),
            Ok(None) => extract_token_from_query(req.uri().query()),
            Err(err) => return Box::pin(async move { Err(err.into()) }),
        };

        // Anonymous request: pass through without claims.
        let Some(token) = token else {
            let fut = self.service.call(req);
            return Box::pin(fut);
        };

        let Some(app_state) = app_state else {
            return Box::pin(async move {
                Err(AppError::internal("AppState not available").into())
            });
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                req.extensions_mut().insert(BackendClaims {
                    sub: claims.sub,
                    email: claims.email,
                    exp: claims.exp,
                });
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(err) => Box::pin(async move { Err(err.into()) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::{extract_bearer_from_header, extract_token_from_query};

    #[test]
    fn bearer_header_is_parsed() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_from_header(Some(&value)).unwrap(),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn malformed_bearer_header_errors() {
        for bad in ["abc", "Bearer", "Basic abc", "Bearer "] {
            let value = HeaderValue::from_static(bad);
            assert!(extract_bearer_from_header(Some(&value)).is_err(), "{bad}");
        }
    }

    #[test]
    fn missing_header_is_none_not_error() {
        assert_eq!(extract_bearer_from_header(None).unwrap(), None);
    }

    #[test]
    fn query_token_fallback() {
        assert_eq!(
            extract_token_from_query(Some("foo=1&token=xyz")),
            Some("xyz".to_string())
        );
        assert_eq!(extract_token_from_query(Some("token=")), None);
        assert_eq!(extract_token_from_query(None), None);
    }
}
