use anyhow::{Context, Result};
use base64::Engine as _;
use std::path::Path;
use tokio::fs;

pub async fn encode_image_to_base64<P: AsRef<Path>>(img_path: P) -> Result<String> {
    let img_path = img_path.as_ref();
    let bytes = fs::read(img_path)
        .await
        .with_context(|| format!("Failed to read image file: {}", img_path.display()))?;
    Ok(encode_byte_to_base64(bytes))
}

pub fn encode_byte_to_base64(bytes: Vec<u8>) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn to_data_url(mime_type: &str, data_b64: &str) -> String {
    format!("data:{mime_type};base64,{data_b64}")
}
