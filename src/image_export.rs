//! Writing generated chart images to disk.

use crate::results::{ChartResult, GraphOutcome, ImageSource};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Image is a URL, not embedded in the response.
    Remote(String),
    /// The server reported a failure for this graph.
    Failed,
    Unrecognized,
    /// Inline payload that could not be decoded.
    Undecodable(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    /// 1-based result position and why it was not written.
    pub skipped: Vec<(usize, SkipReason)>,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Saved {} image(s)", self.written.len())?;
        if !self.skipped.is_empty() {
            write!(f, ", skipped {}", self.skipped.len())?;
        }
        if let Some(dir) = self.written.first().and_then(|p| p.parent()) {
            write!(f, " to {}", dir.display())?;
        }
        Ok(())
    }
}

/// Lowercase ASCII slug of a chart title; `chart` if nothing survives.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "chart".to_string()
    } else {
        slug.to_string()
    }
}

/// `NN-<slug>.<ext>` for the chart at 1-based `position`.
pub fn file_name_for(position: usize, result: &ChartResult, image: &ImageSource) -> String {
    let mut stem = slugify(&result.chart_kind);
    let x = slugify(&result.columns.x_axis);
    if !result.columns.x_axis.is_empty() {
        stem.push('-');
        stem.push_str(&x);
    }
    if let Some(y) = result.columns.y_axis.as_deref().filter(|y| !y.is_empty()) {
        stem.push('-');
        stem.push_str(&slugify(y));
    }
    format!("{:02}-{}.{}", position, stem, image.extension())
}

fn decode_inline(base64: bool, data: &str) -> Result<Vec<u8>> {
    if base64 {
        // Some servers wrap long payloads
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact)
            .map_err(|e| eyre!("invalid base64 image data: {}", e))
    } else {
        Ok(data.as_bytes().to_vec())
    }
}

/// Decode every inline chart image in `results` into `dir`, creating it if needed.
pub fn save_images(results: &[GraphOutcome], dir: &Path) -> Result<ExportSummary> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("could not create {}", dir.display()))?;

    let mut summary = ExportSummary::default();
    for (i, outcome) in results.iter().enumerate() {
        let position = i + 1;
        let result = match outcome {
            GraphOutcome::Chart(result) => result,
            GraphOutcome::Failed { .. } => {
                summary.skipped.push((position, SkipReason::Failed));
                continue;
            }
            GraphOutcome::Unrecognized(_) => {
                summary.skipped.push((position, SkipReason::Unrecognized));
                continue;
            }
        };
        let image = ImageSource::parse(&result.image_reference);
        match &image {
            ImageSource::Remote(url) => {
                warn!(position, url = %url, "remote image not downloaded");
                summary
                    .skipped
                    .push((position, SkipReason::Remote(url.clone())));
            }
            ImageSource::Inline { base64, data, .. } => {
                let bytes = match decode_inline(*base64, data) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(
                            position,
                            chart = %result.chart_kind,
                            error = %e,
                            "image not decodable"
                        );
                        summary
                            .skipped
                            .push((position, SkipReason::Undecodable(e.to_string())));
                        continue;
                    }
                };
                let path = dir.join(file_name_for(position, result, &image));
                std::fs::write(&path, bytes)
                    .wrap_err_with(|| format!("could not write {}", path.display()))?;
                summary.written.push(path);
            }
        }
    }
    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        dir = %dir.display(),
        "images exported"
    );
    Ok(summary)
}
