use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use box_packer::catalog;
use box_packer::solver::Packer;
use box_packer::types::{Dims, PackResult, deserialize_u32_from_number};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PackRequest {
    container: ContainerRequest,
    /// Raw pre-rounding dimension triples; each is ceiling-rounded to
    /// integer units before packing.
    items: Vec<[f64; 3]>,
}

#[derive(Deserialize, Serialize)]
struct ContainerRequest {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    dx: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    dy: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    dz: u32,
}

async fn pack(
    Json(req): Json<PackRequest>,
) -> Result<Json<PackResult>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    let container = Dims::new(req.container.dx, req.container.dy, req.container.dz);

    let items = catalog::items_from_raw(&req.items)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let packer = Packer::new(container, items)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(packer.pack()))
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
