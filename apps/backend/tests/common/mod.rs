//! Shared harness for integration tests: in-memory SQLite, migrations,
//! and an app wired with the production middleware that matters for the
//! API contract (JwtExtract + RequestTrace).

pub mod league;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::entities::{user_credentials, users};
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use migration::{migrate, MigrationCommand};
use sea_orm::{ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::json;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Fresh in-memory SQLite with the full schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn connect_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    migrate(&db, MigrationCommand::Up)
        .await
        .expect("apply migrations");
    db
}

pub async fn test_state() -> AppState {
    AppState::new(
        connect_test_db().await,
        SecurityConfig::new(TEST_JWT_SECRET.as_bytes()),
    )
}

/// App with the production route table.
pub fn build_app(
    data: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(JwtExtract)
        .wrap(RequestTrace)
        .app_data(data)
        .configure(routes::configure)
}

/// Register a user through the API and return its bearer token.
pub async fn register_user<S>(app: &S, email: &str, password: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<BoxBody>,
        Error = Error,
    >,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": email,
            "password": password,
            "name": "Test User"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "registration should succeed");

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in body").to_string()
}

/// Flip the is_admin flag for the user owning the given email.
pub async fn make_admin(db: &DatabaseConnection, email: &str) {
    let creds = user_credentials::Entity::find()
        .filter(user_credentials::Column::Email.eq(email))
        .one(db)
        .await
        .expect("query credentials")
        .expect("credentials exist");

    let mut user = users::ActiveModel {
        id: Set(creds.user_id),
        ..Default::default()
    };
    user.is_admin = Set(true);
    users::Entity::update(user)
        .exec(db)
        .await
        .expect("promote user to admin");
}

/// Register a user, promote it to admin and return its token.
pub async fn register_admin<S>(app: &S, db: &DatabaseConnection, email: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<BoxBody>,
        Error = Error,
    >,
{
    let token = register_user(app, email, "correct horse battery staple").await;
    make_admin(db, email).await;
    token
}

/// Bearer header tuple for authenticated requests.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
