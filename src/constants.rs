pub const DEFAULT_ROOT_DIR: &str = "Documents/sample_directory";
pub const DEFAULT_LABEL_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
pub const DEFAULT_MAX_TOKENS: u32 = 40;
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_SEED: i64 = 123;
pub const OUTPUT_DIR_NAME: &str = "output";
pub const EXECUTION_TIME_FILE: &str = "execution_time.txt";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const STREET_FT_SUFFIX: &str = "_FT.png";
pub const STREET_TF_SUFFIX: &str = "_TF.png";
