use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::rate_limit::auth_rate_limit_config;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::security_headers::SecurityHeaders;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use backend::ws::broker::RealtimeBroker;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting Skittles Club Backend on http://{}:{}", host, port);

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("❌ BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt.as_bytes());

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected");

    // Optional Redis fan-out for multi-instance deployments
    let app_state = match std::env::var("REDIS_URL") {
        Ok(redis_url) => {
            match RealtimeBroker::connect(&redis_url, app_state.ws_registry()).await {
                Ok(broker) => {
                    println!("✅ Realtime broker connected");
                    app_state.with_realtime(broker)
                }
                Err(e) => {
                    eprintln!("❌ Failed to connect realtime broker: {e}");
                    std::process::exit(1);
                }
            }
        }
        Err(_) => app_state,
    };

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        let auth_rate_limiter = RateLimiter::builder(
            InMemoryBackend::builder().build(),
            auth_rate_limit_config().build(),
        )
        .add_headers()
        .build();

        App::new()
            .wrap(JwtExtract)
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .service(
                web::scope("/api/auth")
                    .wrap(auth_rate_limiter)
                    .configure(routes::auth::configure_routes),
            )
            .configure(routes::configure_api)
            .service(web::scope("/health").configure(routes::health::configure_routes))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
