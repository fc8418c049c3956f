use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use vin_client::FilePart;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct ImagesResponse {
    id: i64,
    uploaded: Option<String>,
    images: Vec<String>,
}

pub async fn run(
    id: i64,
    upload: &[PathBuf],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading images");

    let uploaded = if upload.is_empty() {
        None
    } else {
        spinner.set_message(&format!("uploading {} file(s)", upload.len()));
        let mut parts = Vec::with_capacity(upload.len());
        for path in upload {
            parts.push(read_part(path).await?);
        }
        let message = ctx.client.upload_images(id, parts).await;
        if message.is_err() {
            spinner.finish_err("upload failed");
        }
        Some(message?.message)
    };

    spinner.set_message("loading images");
    let images = spinner
        .track("image lookup failed", ctx.client.component_images(id))
        .await?;

    output(
        &ImagesResponse {
            id,
            uploaded,
            images,
        },
        flags.format,
    )
}

async fn read_part(path: &Path) -> anyhow::Result<FilePart> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid image file name {}", path.display()))?;
    Ok(FilePart::image(file_name, bytes))
}
