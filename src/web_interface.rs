use crate::{
    dto::AircraftRecord,
    export::{render_workbook, XLSX_CONTENT_TYPE},
    fetcher::StateSource,
    filter::filter_gulf_aircraft,
    gulf::{AircraftQuery, Selection},
    util::{static_file::StaticFile, ApiError},
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn StateSource>,
    pub export_file_name: String,
}

async fn index() -> impl IntoResponse {
    StaticFile("index.html")
}

async fn fetch_and_filter(
    source: &dyn StateSource,
    selection: &Selection,
) -> Vec<AircraftRecord> {
    let states = source.fetch_states().await;
    filter_gulf_aircraft(&states, selection.country(), selection.location)
}

async fn aircraft(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let selection = Selection::try_from(AircraftQuery::from_pairs(pairs))?;
    let records = fetch_and_filter(state.source.as_ref(), &selection).await;

    if records.is_empty() {
        let message = format!(
            "No aircraft found for {} in {}",
            selection.describe_country(),
            selection.describe_location()
        );
        return Ok(Json(json!({ "message": message, "data": [] })).into_response());
    }

    Ok(Json(records).into_response())
}

async fn download(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let selection = Selection::try_from(AircraftQuery::from_pairs(pairs))?;
    let records = fetch_and_filter(state.source.as_ref(), &selection).await;

    let workbook = render_workbook(&records).map_err(|err| {
        error!("Error saving Excel: {}", err);
        ApiError::from(err)
    })?;

    let disposition = format!("attachment; filename=\"{}\"", state.export_file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        workbook,
    )
        .into_response())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/aircraft", get(aircraft))
        .route("/api/download", get(download))
        .route("/static/*file", get(static_handler))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState, http_addr: String) -> anyhow::Result<()> {
    info!("Starting web server @ {}", http_addr);

    let app = router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("Listening on {}", &http_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');
    StaticFile(path.strip_prefix("static/").unwrap_or(path).to_string())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<h1>404</h1><p>Not Found</p>"))
}
