use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::claims::BackendClaims;
use crate::db::txn::SharedTxn;
use crate::error::AppError;
use crate::infra::require_db;
use crate::repos::users;
use crate::state::app_state::AppState;

/// Current user record resolved from the database, starting from the JWT
/// claims the JwtExtract middleware stored in request extensions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Claims stored by the JwtExtract middleware
            let claims = req
                .extensions()
                .get::<BackendClaims>()
                .ok_or_else(AppError::unauthorized_missing_bearer)?
                .clone();

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            // Look up user by sub, preferring an injected test transaction
            let user = if let Some(shared_txn) = SharedTxn::from_req(&req) {
                users::find_user_by_sub(shared_txn.transaction(), &claims.sub).await?
            } else {
                let db = require_db(app_state)?;
                users::find_user_by_sub(db, &claims.sub).await?
            };

            let user = user.ok_or(AppError::forbidden_user_not_found())?;

            // sub and email come from the verified JWT; id and is_admin from
            // the database row.
            Ok(CurrentUser {
                id: user.id,
                sub: claims.sub,
                email: Some(claims.email),
                is_admin: user.is_admin,
            })
        })
    }
}
