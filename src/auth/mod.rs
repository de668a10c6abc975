use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod guard;
pub mod handlers;
pub mod jwt;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
