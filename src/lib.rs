mod config;
mod constants;
mod error;
mod fs_utils;
mod models;
mod pipeline;
mod prompt;
mod sites;

pub use config::LabelConfig;
pub use constants::{
    API_KEY_ENV, DEFAULT_IMAGE_MIME, DEFAULT_LABEL_MODEL, DEFAULT_MAX_TOKENS,
    DEFAULT_OPENAI_ENDPOINT, DEFAULT_ROOT_DIR, DEFAULT_SEED, DEFAULT_TEMPERATURE,
    EXECUTION_TIME_FILE, OUTPUT_DIR_NAME,
};
pub use error::LabelError;
pub use fs_utils::{format_execution_time, response_file_name};
pub use models::{EligibleSite, EncodedImages, RunSummary, Site, SiteImages};
pub use pipeline::{build_label_request, label_site, run_batch};
pub use prompt::{build_instruction, default_instruction, FEATURE_CATEGORIES};
pub use sites::{check_eligible, list_sites, resolve_site_images, satellite_pattern};
