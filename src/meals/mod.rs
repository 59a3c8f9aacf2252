use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod summary;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
