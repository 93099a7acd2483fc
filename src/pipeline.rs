use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use llmapi::providers::openai::ChatCompletionResponse;
use llmapi::{build_chat_payload, ChatRequest, LLMMessage, LLMMessageType, RawChatFn};
use tracing::{debug, info};

use crate::config::LabelConfig;
use crate::error::LabelError;
use crate::fs_utils::{encode_site_images, write_execution_time, write_response_json};
use crate::models::{EligibleSite, EncodedImages, RunSummary};
use crate::sites::{check_eligible, list_sites, resolve_site_images};

/// System instruction followed by one user message holding the satellite,
/// FT and TF images, in that order.
pub fn build_label_request(config: &LabelConfig, images: EncodedImages) -> ChatRequest {
    let user_content = vec![
        LLMMessageType::image_b64(images.satellite, &config.image_mime),
        LLMMessageType::image_b64(images.street_ft, &config.image_mime),
        LLMMessageType::image_b64(images.street_tf, &config.image_mime),
    ];

    ChatRequest {
        model: config.model.clone(),
        messages: vec![
            LLMMessage::system(config.instruction.clone()),
            LLMMessage::new("user", user_content),
        ],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        seed: config.seed,
    }
}

/// Encodes, sends and stores one site, then reports the written path on
/// `console`. Returns the written response path.
pub async fn label_site<W: Write>(
    config: &LabelConfig,
    chat: &RawChatFn,
    site: &EligibleSite,
    console: &mut W,
) -> Result<PathBuf, LabelError> {
    let images = encode_site_images(site).await?;
    let payload = build_chat_payload(&build_label_request(config, images));

    let response = chat(payload)
        .await
        .map_err(|reason| LabelError::Request {
            site_id: site.site_id.clone(),
            reason,
        })?;

    if let Some(label) =
        ChatCompletionResponse::from_value(&response).and_then(|parsed| parsed.first_text())
    {
        info!(site_id = %site.site_id, %label, "label received");
    }

    let path = write_response_json(&config.output_dir, &site.site_id, &response).await?;
    writeln!(console, "Response for {} saved to {}", site.site_id, path.display())
        .map_err(LabelError::Console)?;
    Ok(path)
}

/// Labels every eligible site under `config.root_dir`, one after another, then
/// records the elapsed time.
///
/// One confirmation line per written response goes to `console`.
/// Any fault aborts the run immediately; files already written stay in place
/// and the execution time file is not written.
pub async fn run_batch<W: Write>(
    config: &LabelConfig,
    chat: RawChatFn,
    console: &mut W,
) -> Result<RunSummary, LabelError> {
    let start = Instant::now();
    let mut summary = RunSummary::default();

    for site in list_sites(&config.root_dir).await? {
        let images = resolve_site_images(&site).await?;
        let Some(eligible) = check_eligible(images).await else {
            debug!(site_id = %site.site_id, "skipping site with missing images");
            summary.skipped.push(site.site_id);
            continue;
        };

        label_site(config, &chat, &eligible, console).await?;
        summary.labeled.push(eligible.site_id);
    }

    summary.elapsed = start.elapsed();
    write_execution_time(&config.output_dir, summary.elapsed).await?;

    info!(
        labeled = summary.labeled.len(),
        skipped = summary.skipped.len(),
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "batch finished"
    );
    Ok(summary)
}
