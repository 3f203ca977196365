//! One-off utility that copies the two model artifacts to a remote storage
//! location. Not part of the request-serving path; run it locally before
//! deployment. Credentials come from the environment, never from the source.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use cropsense::ArtifactStore;

#[derive(Parser)]
#[command(author, version, about = "Uploads the model artifacts to remote storage", long_about = None)]
struct Args {
    /// Base URL of the storage location, e.g. https://storage.example.com/cropsense
    #[arg(long, env = "CROPSENSE_STORAGE_URL")]
    endpoint: String,

    /// Bearer token for the storage endpoint
    #[arg(long, env = "CROPSENSE_STORAGE_TOKEN", hide_env_values = true)]
    token: String,

    /// Directory holding the artifacts
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    cropsense::init_logger();
    let args = Args::parse();

    let store = match &args.models_dir {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::from_env(),
    };

    let client = reqwest::Client::new();
    for path in [store.model_path(), store.codec_path()] {
        upload_file(&client, &args, &store, &path).await?;
    }

    info!("Upload complete");
    Ok(())
}

async fn upload_file(
    client: &reqwest::Client,
    args: &Args,
    store: &ArtifactStore,
    path: &Path,
) -> Result<()> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("artifact path has no file name")?;

    // Digest first: this also fails early when the file is absent.
    let digest = store
        .digest(path)
        .with_context(|| format!("cannot read artifact {:?}", path))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read artifact {:?}", path))?;

    info!("Uploading {} ({} bytes, sha256 {})", name, bytes.len(), digest);

    let url = format!("{}/{}", args.endpoint.trim_end_matches('/'), name);
    let response = client
        .put(&url)
        .bearer_auth(&args.token)
        .header("x-content-sha256", &digest)
        .body(bytes)
        .send()
        .await
        .with_context(|| format!("upload request for {} failed", name))?;

    if !response.status().is_success() {
        bail!("upload of {} failed with status {}", name, response.status());
    }

    info!("Uploaded {}", name);
    Ok(())
}
