use crate::errors::AppError;
use crate::models::{Selection, UiSnapshot};
use crate::render::{render_category, render_single};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ui = state.ui.lock().await;
    Html(render_index(&ui))
}

pub async fn get_state(State(state): State<AppState>) -> Json<UiSnapshot> {
    Json(state.ui.lock().await.snapshot())
}

pub async fn random(State(state): State<AppState>) -> Redirect {
    load_random(&state).await;
    Redirect::to("/")
}

pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Redirect, AppError> {
    load_category(&state, &category).await?;
    Ok(Redirect::to("/"))
}

pub async fn retry(State(state): State<AppState>) -> Redirect {
    reset(&state).await;
    Redirect::to("/")
}

pub async fn api_random(State(state): State<AppState>) -> Json<UiSnapshot> {
    Json(load_random(&state).await)
}

pub async fn api_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<UiSnapshot>, AppError> {
    Ok(Json(load_category(&state, &category).await?))
}

pub async fn api_retry(State(state): State<AppState>) -> Json<UiSnapshot> {
    Json(reset(&state).await)
}

pub async fn healthz() -> &'static str {
    "ok"
}

async fn load_random(state: &AppState) -> UiSnapshot {
    let generation = {
        let mut ui = state.ui.lock().await;
        ui.clear_category();
        ui.begin_fetch()
    };

    let outcome = state
        .fetcher
        .fetch_random()
        .await
        .map(|activity| render_single(&activity));

    let mut ui = state.ui.lock().await;
    ui.finish(generation, outcome);
    ui.snapshot()
}

async fn load_category(state: &AppState, category: &str) -> Result<UiSnapshot, AppError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(AppError::bad_request("category must not be empty"));
    }

    let generation = {
        let mut ui = state.ui.lock().await;
        match ui.toggle_category(category) {
            Selection::Selected(selected) => info!(category = %selected, "category selected"),
            Selection::Cleared => info!(category, "category deselected"),
        }
        ui.begin_fetch()
    };

    let outcome = state
        .fetcher
        .fetch_by_category(category, state.response_mode)
        .await
        .map(|result| render_category(&result, category));

    let mut ui = state.ui.lock().await;
    ui.finish(generation, outcome);
    Ok(ui.snapshot())
}

async fn reset(state: &AppState) -> UiSnapshot {
    let mut ui = state.ui.lock().await;
    ui.reset();
    info!("widget reset");
    ui.snapshot()
}
