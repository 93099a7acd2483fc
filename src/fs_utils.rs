use std::path::{Path, PathBuf};
use std::time::Duration;

use llmapi::utils::encode_image_to_base64;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tokio::fs;

use crate::constants::EXECUTION_TIME_FILE;
use crate::error::LabelError;
use crate::models::{EligibleSite, EncodedImages};

pub async fn ensure_output_dir(dir: &Path) -> Result<(), LabelError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|err| LabelError::io(dir, err))
}

pub async fn encode_site_images(site: &EligibleSite) -> Result<EncodedImages, LabelError> {
    Ok(EncodedImages {
        satellite: encode(&site.satellite).await?,
        street_ft: encode(&site.street_ft).await?,
        street_tf: encode(&site.street_tf).await?,
    })
}

async fn encode(path: &Path) -> Result<String, LabelError> {
    encode_image_to_base64(path)
        .await
        .map_err(LabelError::Encode)
}

pub fn response_file_name(site_id: &str) -> String {
    format!("response_{site_id}.json")
}

/// Four-space indented JSON, keys in the order they were received.
pub fn to_pretty_json(value: &Value) -> Result<Vec<u8>, LabelError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(buf)
}

pub async fn write_response_json(
    output_dir: &Path,
    site_id: &str,
    response: &Value,
) -> Result<PathBuf, LabelError> {
    ensure_output_dir(output_dir).await?;
    let path = output_dir.join(response_file_name(site_id));
    let bytes = to_pretty_json(response)?;
    fs::write(&path, bytes)
        .await
        .map_err(|err| LabelError::io(&path, err))?;
    Ok(path)
}

/// Seconds always carry a fractional part, so zero reads `0.0`.
pub fn format_execution_time(elapsed: Duration) -> String {
    format!("Execution Time: {:?} seconds", elapsed.as_secs_f64())
}

pub async fn write_execution_time(
    output_dir: &Path,
    elapsed: Duration,
) -> Result<PathBuf, LabelError> {
    ensure_output_dir(output_dir).await?;
    let path = output_dir.join(EXECUTION_TIME_FILE);
    fs::write(&path, format_execution_time(elapsed))
        .await
        .map_err(|err| LabelError::io(&path, err))?;
    Ok(path)
}
