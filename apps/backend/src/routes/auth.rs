//! Authentication routes: registration, login and Google sign-in.

use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::users::{ensure_google_user, login_email_user, register_email_user};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub google_sub: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

async fn register(
    http_req: HttpRequest,
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterRequest {
        email,
        password,
        name,
    } = req.into_inner();
    let token_email = email.trim().to_ascii_lowercase();

    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(
            async move { register_email_user(txn, &email, &password, name.as_deref()).await },
        )
    })
    .await?;

    let token = mint_access_token(&user.sub, &token_email, SystemTime::now(), &app_state.security)?;
    Ok(HttpResponse::Created().json(TokenResponse { token }))
}

async fn login(
    http_req: HttpRequest,
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = req.into_inner();
    let token_email = email.trim().to_ascii_lowercase();

    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { login_email_user(txn, &email, &password).await })
    })
    .await?;

    let token = mint_access_token(&user.sub, &token_email, SystemTime::now(), &app_state.security)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Handle the Google sign-in callback: creates or reuses a user based on
/// email and returns a backend JWT.
async fn google(
    http_req: HttpRequest,
    req: web::Json<GoogleLoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let GoogleLoginRequest {
        email,
        name,
        google_sub,
    } = req.into_inner();

    if google_sub.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGoogleSub,
            "Google sub cannot be empty",
        ));
    }

    let token_email = email.trim().to_ascii_lowercase();

    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { ensure_google_user(txn, &email, name.as_deref(), &google_sub).await })
    })
    .await?;

    let token = mint_access_token(&user.sub, &token_email, SystemTime::now(), &app_state.security)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Registers routes relative to the `/api/auth` scope so production can
/// wrap the scope in a rate limiter.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)));
    cfg.service(web::resource("/login").route(web::post().to(login)));
    cfg.service(web::resource("/google").route(web::post().to(google)));
}
