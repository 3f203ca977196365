use std::fmt::Write as _;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;

use cropsense::{ArtifactStore, CropInput, Recommender};

#[derive(Parser)]
#[command(author, version, about = "Interactive crop recommendation page", long_about = None)]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, env = "CROPSENSE_ADDR", default_value = "127.0.0.1:8501")]
    addr: SocketAddr,

    /// Directory holding crop_model.onnx and label_codec.json
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

/// Loaded once at startup. When the artifacts are absent the page still
/// serves, with the prediction form replaced by an error banner.
struct AppState {
    recommender: Option<Recommender>,
    load_error: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cropsense::init_logger();
    let args = Args::parse();

    let store = match &args.models_dir {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::from_env(),
    };

    let state = match store.load() {
        Ok(recommender) => {
            let bundle = recommender.info();
            info!(
                "Loaded model from {} ({} states, {} crops)",
                bundle.model_path, bundle.num_states, bundle.num_crops
            );
            AppState {
                recommender: Some(recommender),
                load_error: None,
            }
        }
        Err(e) => {
            warn!("Model artifacts unavailable, inference disabled: {}", e);
            AppState {
                recommender: None,
                load_error: Some(e.to_string()),
            }
        }
    };

    let app = Router::new()
        .route("/", get(panel))
        .route("/recommend", post(recommend))
        .with_state(Arc::new(state));

    info!("Listening on {}", args.addr);
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Deserialize)]
struct PanelQuery {
    panel: Option<String>,
}

async fn panel(State(state): State<Arc<AppState>>, Query(query): Query<PanelQuery>) -> Html<String> {
    let body = match query.panel.as_deref() {
        Some("about") => about_panel(),
        Some("data") => data_panel(),
        _ => home_panel(&state, None, None),
    };
    Html(page(&body))
}

async fn recommend(
    State(state): State<Arc<AppState>>,
    Form(input): Form<CropInput>,
) -> Html<String> {
    let body = match &state.recommender {
        None => home_panel(&state, None, None),
        Some(recommender) => match recommender.recommend(&input) {
            Ok(crop) => home_panel(&state, Some((&input, crop)), None),
            // Gateway and inference errors stay inside the page; the
            // session continues.
            Err(e) => home_panel(&state, None, Some(e.to_string())),
        },
    };
    Html(page(&body))
}

/// The seven numeric inputs with their documented dataset ranges. The bounds
/// end up as widget constraints only; the gateway does not enforce them.
const NUMERIC_FIELDS: [(&str, &str, f32, f32, f32); 7] = [
    ("N_SOIL", "Nitrogen (N) in soil", 0.0, 140.0, 90.0),
    ("P_SOIL", "Phosphorus (P) in soil", 5.0, 145.0, 42.0),
    ("K_SOIL", "Potassium (K) in soil", 5.0, 205.0, 43.0),
    ("TEMPERATURE", "Temperature (°C)", 8.0, 44.0, 20.8),
    ("HUMIDITY", "Relative humidity (%)", 14.0, 100.0, 82.0),
    ("ph", "Soil pH", 3.5, 10.0, 6.5),
    ("RAINFALL", "Rainfall (mm)", 20.0, 300.0, 202.9),
];

fn home_panel(
    state: &AppState,
    result: Option<(&CropInput, String)>,
    error: Option<String>,
) -> String {
    let mut body = String::from("<h2>Crop Recommendation</h2>\n");

    let recommender = match &state.recommender {
        Some(r) => r,
        None => {
            let reason = state.load_error.as_deref().unwrap_or("unknown error");
            let _ = write!(
                body,
                "<p class=\"error\">Model artifacts are not available ({}). \
                 Predictions are disabled.</p>\n",
                escape_html(reason)
            );
            return body;
        }
    };

    if let Some(message) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>\n", escape_html(&message));
    }

    if let Some((input, crop)) = result {
        let state_name = input.state.as_deref().unwrap_or("");
        let _ = write!(
            body,
            "<div class=\"result\">\n\
             <h3>Recommended crop: {}</h3>\n\
             <p>For N={}, P={}, K={}, temperature={}, humidity={}, pH={}, \
             rainfall={} in {}.</p>\n</div>\n",
            escape_html(&crop),
            input.n_soil,
            input.p_soil,
            input.k_soil,
            input.temperature,
            input.humidity,
            input.ph,
            input.rainfall,
            escape_html(state_name)
        );
    }

    body.push_str("<form method=\"post\" action=\"/recommend\">\n");
    body.push_str("<label>State\n<select name=\"STATE\">\n");
    for state_name in recommender.states() {
        let _ = write!(
            body,
            "<option value=\"{0}\">{0}</option>\n",
            escape_html(state_name)
        );
    }
    body.push_str("</select>\n</label>\n");

    for (name, label, min, max, default) in NUMERIC_FIELDS {
        let _ = write!(
            body,
            "<label>{}\n<input type=\"number\" name=\"{}\" min=\"{}\" max=\"{}\" \
             step=\"0.1\" value=\"{}\" required>\n</label>\n",
            label, name, min, max, default
        );
    }

    body.push_str("<button type=\"submit\">Get Recommendation</button>\n</form>\n");
    body
}

fn about_panel() -> String {
    String::from(
        "<h2>About</h2>\n\
         <p>This app recommends a crop to grow from soil nutrients, local \
         climate measurements and the state the field is in. The prediction \
         comes from a decision-tree classifier trained on an agricultural \
         dataset covering 22 crops across the Indian states.</p>\n\
         <p>The model is loaded once at startup and never updated while the \
         app is running.</p>\n",
    )
}

fn data_panel() -> String {
    let mut body = String::from(
        "<h2>Data Info</h2>\n\
         <p>The model expects eight features per prediction, in this order:</p>\n\
         <table>\n<tr><th>Feature</th><th>Range</th></tr>\n",
    );
    for (name, label, min, max, _) in NUMERIC_FIELDS {
        let _ = write!(
            body,
            "<tr><td>{} ({})</td><td>{} – {}</td></tr>\n",
            label, name, min, max
        );
    }
    body.push_str(
        "<tr><td>State (STATE)</td><td>one of the recognized Indian states</td></tr>\n\
         </table>\n\
         <p>The state name is label-encoded to an integer before inference; \
         names outside the vocabulary are rejected.</p>\n",
    );
    body
}

fn page(body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<title>cropsense</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}\n\
         nav a {{ margin-right: 1rem; }}\n\
         label {{ display: block; margin: 0.5rem 0; }}\n\
         .error {{ color: #b00020; }}\n\
         .result {{ border: 1px solid #ccc; padding: 0.5rem 1rem; }}\n\
         table, th, td {{ border: 1px solid #ccc; border-collapse: collapse; padding: 0.3rem; }}\n\
         </style>\n</head>\n<body>\n\
         <nav><a href=\"/?panel=home\">Home</a><a href=\"/?panel=about\">About</a>\
         <a href=\"/?panel=data\">Data Info</a></nav>\n\
         {}\
         </body>\n</html>\n",
        body
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_field_order_matches_model() {
        let names: Vec<&str> = NUMERIC_FIELDS.iter().map(|f| f.0).collect();
        assert_eq!(
            names,
            ["N_SOIL", "P_SOIL", "K_SOIL", "TEMPERATURE", "HUMIDITY", "ph", "RAINFALL"]
        );
    }
}
