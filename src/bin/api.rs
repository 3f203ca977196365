use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use log::info;
use serde_json::json;

use cropsense::{ArtifactStore, CropInput, Recommender, RecommenderError};

#[derive(Parser)]
#[command(author, version, about = "JSON API serving crop recommendations", long_about = None)]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, env = "CROPSENSE_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Directory holding crop_model.onnx and label_codec.json
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cropsense::init_logger();
    let args = Args::parse();

    let store = match &args.models_dir {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::from_env(),
    };

    // Missing artifacts are a deployment error; abort before binding.
    let recommender = Arc::new(store.load()?);
    let bundle = recommender.info();
    info!(
        "Loaded model from {} ({} states, {} crops)",
        bundle.model_path, bundle.num_states, bundle.num_crops
    );

    let app = Router::new()
        .route("/", get(index))
        .route("/get-recommendation", post(recommend))
        .with_state(recommender);

    info!("Listening on {}", args.addr);
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn recommend(
    State(recommender): State<Arc<Recommender>>,
    Json(input): Json<CropInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let crop = recommender.recommend(&input)?;
    Ok(Json(json!({ "recommended_crop": crop })))
}

/// Maps request-path errors to the API's error contract: invalid input is
/// the client's fault, anything the predictor does wrong is ours.
struct ApiError(RecommenderError);

impl From<RecommenderError> for ApiError {
    fn from(err: RecommenderError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RecommenderError::InvalidRegion(_) => StatusCode::BAD_REQUEST,
            RecommenderError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

const INDEX_PAGE: &str = r#"<!doctype html>
<html>
<head><title>cropsense API</title></head>
<body>
<h1>cropsense API</h1>
<p>POST a JSON body to <code>/get-recommendation</code> with the fields
<code>N_SOIL</code>, <code>P_SOIL</code>, <code>K_SOIL</code>,
<code>TEMPERATURE</code>, <code>HUMIDITY</code>, <code>ph</code>,
<code>RAINFALL</code> and <code>STATE</code> to receive
<code>{"recommended_crop": "..."}</code>.</p>
</body>
</html>
"#;
