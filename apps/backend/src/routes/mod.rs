use actix_web::web;

pub mod auth;
pub mod events;
pub mod health;
pub mod matches;
pub mod players;
pub mod realtime;
pub mod scoreboard;
pub mod standings;
pub mod stats;
pub mod teams;

/// Register every non-auth API route (full paths).
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(players::configure_routes);
    cfg.configure(teams::configure_routes);
    cfg.configure(matches::configure_routes);
    cfg.configure(standings::configure_routes);
    cfg.configure(scoreboard::configure_routes);
    cfg.configure(stats::configure_routes);
    cfg.configure(events::configure_routes);
    cfg.configure(realtime::configure_routes);
}

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires the same paths with the auth scope
/// wrapped in a rate limiter. Tests register them without that wrapper so
/// endpoint behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Club data + realtime routes: /api/**
    cfg.configure(configure_api);
}
