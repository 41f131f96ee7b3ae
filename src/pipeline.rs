//! Batch loop: scan a folder of screenshots and write one mockup per input.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::ImageFormat;

use crate::catalog::{self, DeviceKey, DeviceProfile};
use crate::compose;
use crate::error::{FrameryError, FrameryResult};
use crate::frame;
use crate::overlay::{OverlaySpec, StorySettings};
use crate::trim::{self, TrimOptions};

/// Input extensions the scanner accepts, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Knobs for a batch run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub device: DeviceKey,
    /// Trim white/light borders off each source before fitting.
    pub auto_trim: bool,
    /// Leave already-existing outputs untouched instead of re-rendering.
    pub skip_existing: bool,
    pub trim: TrimOptions,
    /// Replaces the profile's story settings; ignored for profiles without
    /// an overlay.
    pub overlay_override: Option<StorySettings>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            device: DeviceKey::Iphone14,
            auto_trim: true,
            skip_existing: true,
            trim: TrimOptions::default(),
            overlay_override: None,
        }
    }
}

/// Per-input outcome recorded in the summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    Produced { trimmed: bool },
    SkippedExisting,
    Failed(String),
}

/// Aggregate counts plus the per-input record of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub produced: usize,
    pub trimmed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub items: Vec<(PathBuf, ItemStatus)>,
}

impl RunSummary {
    fn record(&mut self, path: PathBuf, status: ItemStatus) {
        match &status {
            ItemStatus::Produced { trimmed } => {
                self.produced += 1;
                if *trimmed {
                    self.trimmed += 1;
                }
            }
            ItemStatus::SkippedExisting => self.skipped += 1,
            ItemStatus::Failed(_) => self.failed += 1,
        }
        self.items.push((path, status));
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}

fn scan_inputs(input_dir: &Path) -> FrameryResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("reading input directory {}", input_dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_supported(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Render one mockup per supported file in `input_dir` into `output_dir`.
///
/// Failures on individual inputs are recorded and the batch continues; only
/// environment-level problems (unreadable input dir, no inputs at all,
/// uncreatable output dir) abort the run.
pub fn run(input_dir: &Path, output_dir: &Path, opts: &RunOptions) -> FrameryResult<RunSummary> {
    let mut profile = catalog::profile(opts.device).clone();
    if let Some(settings) = &opts.overlay_override {
        if profile.overlay.is_some() {
            profile.overlay = Some(OverlaySpec::Story(settings.clone()));
        } else {
            tracing::warn!(device = %profile.key, "overlay settings ignored for this device");
        }
    }

    let inputs = scan_inputs(input_dir)?;
    if inputs.is_empty() {
        return Err(FrameryError::no_input(format!(
            "no supported images in {} (looking for: {})",
            input_dir.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let template = frame::build(&profile)?;
    tracing::info!(
        device = %profile.key,
        inputs = inputs.len(),
        "starting batch run"
    );

    let mut summary = RunSummary::default();
    for input in inputs {
        let status = match process_one(&input, output_dir, &profile, &template, opts) {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(input = %input.display(), error = %err, "input failed");
                ItemStatus::Failed(err.to_string())
            }
        };
        summary.record(input, status);
    }

    tracing::info!(
        produced = summary.produced,
        trimmed = summary.trimmed,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch run finished"
    );
    Ok(summary)
}

fn process_one(
    input: &Path,
    output_dir: &Path,
    profile: &DeviceProfile,
    template: &frame::FrameTemplate,
    opts: &RunOptions,
) -> FrameryResult<ItemStatus> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| FrameryError::decode(format!("unusable file name: {}", input.display())))?;
    let output = output_dir.join(format!("{stem}_{}_mockup.png", profile.key));

    if opts.skip_existing && output.exists() {
        tracing::info!(output = %output.display(), "exists, skipping");
        return Ok(ItemStatus::SkippedExisting);
    }

    let decoded = image::open(input)
        .map_err(|e| FrameryError::decode(format!("{}: {e}", input.display())))?;
    let mut screenshot = decoded.to_rgba8();

    let mut trimmed = false;
    if opts.auto_trim {
        let outcome = trim::auto_trim(screenshot, opts.trim);
        screenshot = outcome.image;
        trimmed = outcome.trimmed;
    }

    let mockup = compose::composite(template, &screenshot, profile)?;
    mockup
        .save_with_format(&output, ImageFormat::Png)
        .map_err(|e| FrameryError::render(format!("writing {}: {e}", output.display())))?;
    tracing::info!(output = %output.display(), trimmed, "mockup written");
    Ok(ItemStatus::Produced { trimmed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_supported(Path::new("a/shot.PNG")));
        assert!(is_supported(Path::new("a/shot.JpEg")));
        assert!(is_supported(Path::new("a/shot.webp")));
        assert!(!is_supported(Path::new("a/shot.gif")));
        assert!(!is_supported(Path::new("a/noext")));
    }

    #[test]
    fn summary_counts_follow_recorded_statuses() {
        let mut s = RunSummary::default();
        s.record("a.png".into(), ItemStatus::Produced { trimmed: true });
        s.record("b.png".into(), ItemStatus::Produced { trimmed: false });
        s.record("c.png".into(), ItemStatus::SkippedExisting);
        s.record("d.png".into(), ItemStatus::Failed("boom".into()));
        assert_eq!(s.produced, 2);
        assert_eq!(s.trimmed, 1);
        assert_eq!(s.skipped, 1);
        assert_eq!(s.failed, 1);
        assert_eq!(s.items.len(), 4);
    }

    #[test]
    fn default_options_target_the_phone_profile() {
        let opts = RunOptions::default();
        assert_eq!(opts.device, DeviceKey::Iphone14);
        assert!(opts.auto_trim);
        assert!(opts.skip_existing);
    }
}
