use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

use super::{dto::HouseInput, repo::House};

#[instrument(skip(state))]
pub async fn list_houses(State(state): State<AppState>) -> Result<Json<Vec<House>>, AppError> {
    let houses = House::list(&state.db).await?;
    Ok(Json(houses))
}

#[instrument(skip(state))]
pub async fn get_house(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<House>, AppError> {
    let house = House::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("House not found"))?;
    Ok(Json(house))
}

#[instrument(skip(state, payload))]
pub async fn create_house(
    State(state): State<AppState>,
    Json(payload): Json<HouseInput>,
) -> Result<(StatusCode, Json<House>), AppError> {
    let house = House::create(&state.db, &payload).await?;
    info!(house_id = %house.id, "house created");
    Ok((StatusCode::CREATED, Json(house)))
}

#[instrument(skip(state, payload))]
pub async fn update_house(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<HouseInput>,
) -> Result<Json<House>, AppError> {
    let house = House::update(&state.db, id, &payload)
        .await?
        .ok_or(AppError::NotFound("House not found"))?;
    info!(house_id = %house.id, "house updated");
    Ok(Json(house))
}

#[instrument(skip(state))]
pub async fn delete_house(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<House>, AppError> {
    let house = House::delete(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("House not found"))?;
    info!(house_id = %house.id, "house deleted");
    Ok(Json(house))
}

#[instrument(skip(state))]
pub async fn list_rent_houses(
    State(state): State<AppState>,
) -> Result<Json<Vec<House>>, AppError> {
    let houses = House::list_rentals(&state.db).await?;
    Ok(Json(houses))
}

#[instrument(skip(state, payload))]
pub async fn create_rent_house(
    State(state): State<AppState>,
    Json(payload): Json<HouseInput>,
) -> Result<(StatusCode, Json<House>), AppError> {
    let house = House::create_rental(&state.db, &payload).await?;
    info!(house_id = %house.id, "rent house created");
    Ok((StatusCode::CREATED, Json(house)))
}
