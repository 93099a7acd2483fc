use std::path::Path;

use regex::Regex;
use tokio::fs;
use tokio::fs::try_exists;
use tracing::{debug, warn};

use crate::constants::{STREET_FT_SUFFIX, STREET_TF_SUFFIX};
use crate::error::LabelError;
use crate::models::{EligibleSite, Site, SiteImages};

/// Directories directly under `root`, in directory-listing order.
pub async fn list_sites(root: &Path) -> Result<Vec<Site>, LabelError> {
    let mut sites = Vec::new();
    let mut entries = fs::read_dir(root)
        .await
        .map_err(|err| LabelError::io(root, err))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| LabelError::io(root, err))?
    {
        let path = entry.path();
        // Follows symlinks, so a linked site directory still counts. A link
        // whose target is gone is not a directory.
        let is_dir = match fs::metadata(&path).await {
            Ok(metadata) => metadata.is_dir(),
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping unreadable root entry");
                false
            }
        };
        if !is_dir {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(site_id) => sites.push(Site { site_id, path }),
            Err(name) => warn!(?name, "skipping site directory with non UTF-8 name"),
        }
    }

    Ok(sites)
}

/// `<site_id>_<digits>.png`, with the site id matched literally.
///
/// The whole file name must match: `A100_12.png.bak` or `A100_12.pngx` are
/// not satellite images, even though a prefix-only match would accept them.
pub fn satellite_pattern(site_id: &str) -> Result<Regex, LabelError> {
    Ok(Regex::new(&format!(r"^{}_[0-9]+\.png$", regex::escape(site_id)))?)
}

/// Looks up the three images of a site.
///
/// The satellite image is the first entry matching [`satellite_pattern`] in
/// directory-listing order. Listing order is platform dependent, so a site
/// holding several matching files may send a different one across machines.
pub async fn resolve_site_images(site: &Site) -> Result<SiteImages, LabelError> {
    let pattern = satellite_pattern(&site.site_id)?;

    let mut satellite = None;
    let mut entries = fs::read_dir(&site.path)
        .await
        .map_err(|err| LabelError::io(&site.path, err))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| LabelError::io(&site.path, err))?
    {
        let file_name = entry.file_name();
        if file_name.to_str().is_some_and(|name| pattern.is_match(name)) {
            satellite = Some(entry.path());
            break;
        }
    }

    Ok(SiteImages {
        site_id: site.site_id.clone(),
        satellite,
        street_ft: site
            .path
            .join(format!("{}{}", site.site_id, STREET_FT_SUFFIX)),
        street_tf: site
            .path
            .join(format!("{}{}", site.site_id, STREET_TF_SUFFIX)),
    })
}

/// `Some` when all three images exist. A missing satellite path, or a path
/// whose existence cannot be checked, counts as a file that does not exist.
pub async fn check_eligible(images: SiteImages) -> Option<EligibleSite> {
    let satellite = images.satellite?;

    for path in [&satellite, &images.street_ft, &images.street_tf] {
        let exists = match try_exists(path).await {
            Ok(exists) => exists,
            Err(err) => {
                debug!(path = %path.display(), %err, "treating unverifiable image as missing");
                false
            }
        };
        if !exists {
            return None;
        }
    }

    Some(EligibleSite {
        site_id: images.site_id,
        satellite,
        street_ft: images.street_ft,
        street_tf: images.street_tf,
    })
}
