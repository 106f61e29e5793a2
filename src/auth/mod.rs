use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/currentuser", get(handlers::current_user))
        .route("/owner/:email", get(handlers::owner_check))
        .route("/protected", get(handlers::protected))
}
