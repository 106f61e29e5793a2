use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/addhouse",
            get(handlers::list_houses).post(handlers::create_house),
        )
        .route(
            "/addhouse/:id",
            get(handlers::get_house)
                .patch(handlers::update_house)
                .delete(handlers::delete_house),
        )
        .route(
            "/renthouse",
            get(handlers::list_rent_houses).post(handlers::create_rent_house),
        )
}
