use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_IMAGE_MIME, DEFAULT_LABEL_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_ROOT_DIR, DEFAULT_SEED,
    DEFAULT_TEMPERATURE, OUTPUT_DIR_NAME,
};
use crate::prompt::default_instruction;

/// Everything a batch run needs besides the network capability.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelConfig {
    pub root_dir: PathBuf,
    pub output_dir: PathBuf,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub seed: i64,
    pub image_mime: String,
    pub instruction: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self::for_root(DEFAULT_ROOT_DIR)
    }
}

impl LabelConfig {
    /// Defaults with the output directory placed under `root_dir`.
    pub fn for_root(root_dir: impl AsRef<Path>) -> Self {
        let root_dir = root_dir.as_ref().to_path_buf();
        Self {
            output_dir: root_dir.join(OUTPUT_DIR_NAME),
            root_dir,
            model: DEFAULT_LABEL_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            seed: DEFAULT_SEED,
            image_mime: DEFAULT_IMAGE_MIME.to_string(),
            instruction: default_instruction(),
        }
    }
}
