pub mod admin;
pub mod auth_token;
pub mod current_user;
pub mod match_id;
