use std::path::PathBuf;
use std::time::Duration;

/// One subdirectory of the root, keyed by its directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub site_id: String,
    pub path: PathBuf,
}

/// Image paths looked up for a site. The street-level paths are derived from
/// the site id, so only the satellite image can be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteImages {
    pub site_id: String,
    pub satellite: Option<PathBuf>,
    pub street_ft: PathBuf,
    pub street_tf: PathBuf,
}

/// A site whose three images all exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleSite {
    pub site_id: String,
    pub satellite: PathBuf,
    pub street_ft: PathBuf,
    pub street_tf: PathBuf,
}

impl EligibleSite {
    /// Paths in request order.
    pub fn image_paths(&self) -> [&PathBuf; 3] {
        [&self.satellite, &self.street_ft, &self.street_tf]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImages {
    pub satellite: String,
    pub street_ft: String,
    pub street_tf: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub labeled: Vec<String>,
    pub skipped: Vec<String>,
    pub elapsed: Duration,
}
