//! Visual regression testing with screenshot comparison
//!
//! Used for the logo verification shots and dashboard smoke screenshots:
//! an element screenshot taken during a run is compared against a
//! checked-in baseline PNG. SHA-256 equality short-circuits the pixel walk;
//! otherwise pixels are compared with a small per-channel tolerance so
//! anti-aliasing differences between render hosts do not fail runs.

use std::path::{Path, PathBuf};

use image::{GenericImageView, Pixel, RgbaImage};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};

/// Per-channel difference below which two pixels count as equal.
const CHANNEL_TOLERANCE: i32 = 5;

/// Result of a visual comparison
#[derive(Debug, Clone)]
pub struct VisualDiff {
    /// Whether the images match (within threshold)
    pub matches: bool,

    /// Percentage of pixels that differ
    pub diff_percent: f64,

    /// Number of differing pixels
    pub diff_pixels: u64,

    /// Total pixels compared
    pub total_pixels: u64,

    /// Path to the diff image (if generated)
    pub diff_image_path: Option<PathBuf>,

    /// Hash of the actual screenshot
    pub actual_hash: String,

    /// Hash of the baseline screenshot
    pub baseline_hash: String,
}

/// Configuration for visual testing
#[derive(Debug, Clone)]
pub struct VisualConfig {
    pub baseline_dir: PathBuf,
    pub actual_dir: PathBuf,
    pub diff_dir: PathBuf,
    pub threshold: f64,
    pub auto_update: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            baseline_dir: PathBuf::from("test-results/baselines"),
            actual_dir: PathBuf::from("test-results/screenshots"),
            diff_dir: PathBuf::from("test-results/diffs"),
            threshold: 0.5,
            auto_update: false,
        }
    }
}

/// Screenshot baseline comparison
pub struct VisualTester {
    baseline_dir: PathBuf,
    actual_dir: PathBuf,
    diff_dir: PathBuf,
    threshold: f64,
    auto_update: bool,
}

impl VisualTester {
    pub fn new(config: VisualConfig) -> E2eResult<Self> {
        std::fs::create_dir_all(&config.baseline_dir)?;
        std::fs::create_dir_all(&config.actual_dir)?;
        std::fs::create_dir_all(&config.diff_dir)?;

        Ok(Self {
            baseline_dir: config.baseline_dir,
            actual_dir: config.actual_dir,
            diff_dir: config.diff_dir,
            threshold: config.threshold,
            auto_update: config.auto_update,
        })
    }

    /// Directory screenshots must land in to be comparable.
    pub fn actual_dir(&self) -> &Path {
        &self.actual_dir
    }

    /// Compare a screenshot against its baseline by name.
    pub fn compare(&self, name: &str, threshold: Option<f64>) -> E2eResult<VisualDiff> {
        let threshold = threshold.unwrap_or(self.threshold);

        let actual_path = self.actual_dir.join(format!("{name}.png"));
        let baseline_path = self.baseline_dir.join(format!("{name}.png"));

        if !actual_path.exists() {
            return Err(E2eError::VisualRegression(format!(
                "actual screenshot not found: {}",
                actual_path.display()
            )));
        }

        if !baseline_path.exists() {
            if self.auto_update {
                info!("Creating baseline for '{}' (auto-update enabled)", name);
                std::fs::copy(&actual_path, &baseline_path)?;

                let actual_hash = hash_file(&actual_path)?;
                return Ok(VisualDiff {
                    matches: true,
                    diff_percent: 0.0,
                    diff_pixels: 0,
                    total_pixels: 0,
                    diff_image_path: None,
                    actual_hash: actual_hash.clone(),
                    baseline_hash: actual_hash,
                });
            }
            return Err(E2eError::BaselineNotFound(
                baseline_path.to_string_lossy().to_string(),
            ));
        }

        let actual_hash = hash_file(&actual_path)?;
        let baseline_hash = hash_file(&baseline_path)?;

        let actual_img = image::open(&actual_path)?;
        let baseline_img = image::open(&baseline_path)?;

        // Byte-identical PNGs need no pixel walk.
        if actual_hash == baseline_hash {
            debug!("Screenshots for '{}' match exactly (same hash)", name);
            return Ok(VisualDiff {
                matches: true,
                diff_percent: 0.0,
                diff_pixels: 0,
                total_pixels: u64::from(actual_img.width()) * u64::from(actual_img.height()),
                diff_image_path: None,
                actual_hash,
                baseline_hash,
            });
        }

        if actual_img.dimensions() != baseline_img.dimensions() {
            warn!(
                "Screenshot dimensions differ for '{}': actual {:?} vs baseline {:?}",
                name,
                actual_img.dimensions(),
                baseline_img.dimensions()
            );
            // The overlapping region is still compared; the rest counts as diff.
        }

        let (width, height) = actual_img.dimensions();
        let actual_rgba = actual_img.to_rgba8();
        let baseline_rgba = baseline_img.to_rgba8();

        let mut diff_img = RgbaImage::new(width, height);
        let mut diff_pixels = 0u64;
        let total_pixels = u64::from(width) * u64::from(height);

        let cmp_width = width.min(baseline_img.width());
        let cmp_height = height.min(baseline_img.height());

        for y in 0..height {
            for x in 0..width {
                let outside = x >= cmp_width || y >= cmp_height;
                let differs = outside || {
                    let a = actual_rgba.get_pixel(x, y);
                    let b = baseline_rgba.get_pixel(x, y);
                    pixels_differ(a, b)
                };

                if differs {
                    diff_pixels += 1;
                    diff_img.put_pixel(x, y, image::Rgba([255, 0, 0, 255]));
                } else {
                    // Dim matching pixels so the diff regions pop.
                    let channels = actual_rgba.get_pixel(x, y).channels();
                    diff_img.put_pixel(
                        x,
                        y,
                        image::Rgba([channels[0] / 2, channels[1] / 2, channels[2] / 2, 128]),
                    );
                }
            }
        }

        let diff_percent = (diff_pixels as f64 / total_pixels as f64) * 100.0;
        let matches = diff_percent <= threshold;

        let diff_image_path = if diff_pixels > 0 {
            let path = self.diff_dir.join(format!("{name}-diff.png"));
            diff_img.save(&path)?;
            Some(path)
        } else {
            None
        };

        if !matches {
            warn!(
                "Visual regression in '{}': {:.2}% pixels differ (threshold: {:.2}%)",
                name, diff_percent, threshold
            );
        }

        Ok(VisualDiff {
            matches,
            diff_percent,
            diff_pixels,
            total_pixels,
            diff_image_path,
            actual_hash,
            baseline_hash,
        })
    }

    /// Promote the actual screenshot to be the new baseline.
    pub fn update_baseline(&self, name: &str) -> E2eResult<()> {
        let actual_path = self.actual_dir.join(format!("{name}.png"));
        let baseline_path = self.baseline_dir.join(format!("{name}.png"));

        if !actual_path.exists() {
            return Err(E2eError::VisualRegression(format!(
                "cannot update baseline: actual screenshot not found: {}",
                actual_path.display()
            )));
        }

        std::fs::copy(&actual_path, &baseline_path)?;
        info!("Updated baseline for '{}'", name);
        Ok(())
    }

    /// Names of all checked-in baselines.
    pub fn list_baselines(&self) -> E2eResult<Vec<String>> {
        let mut baselines = Vec::new();

        for entry in std::fs::read_dir(&self.baseline_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "png").unwrap_or(false) {
                if let Some(name) = path.file_stem() {
                    baselines.push(name.to_string_lossy().to_string());
                }
            }
        }

        baselines.sort();
        Ok(baselines)
    }

    /// Remove diff artifacts from earlier runs.
    pub fn clean_diffs(&self) -> E2eResult<()> {
        for entry in std::fs::read_dir(&self.diff_dir)? {
            let entry = entry?;
            std::fs::remove_file(entry.path())?;
        }
        Ok(())
    }
}

fn pixels_differ(a: &image::Rgba<u8>, b: &image::Rgba<u8>) -> bool {
    let a_channels = a.channels();
    let b_channels = b.channels();

    for i in 0..4 {
        let diff = (i32::from(a_channels[i]) - i32::from(b_channels[i])).abs();
        if diff > CHANNEL_TOLERANCE {
            return true;
        }
    }
    false
}

fn hash_file(path: &Path) -> E2eResult<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tester(dir: &Path, auto_update: bool) -> VisualTester {
        VisualTester::new(VisualConfig {
            baseline_dir: dir.join("baselines"),
            actual_dir: dir.join("actual"),
            diff_dir: dir.join("diffs"),
            threshold: 0.5,
            auto_update,
        })
        .unwrap()
    }

    fn write_png(path: &Path, color: [u8; 4]) {
        let mut img = RgbaImage::new(8, 8);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba(color);
        }
        img.save(path).unwrap();
    }

    #[test]
    fn identical_screenshots_match() {
        let dir = tempfile::tempdir().unwrap();
        let t = tester(dir.path(), false);
        write_png(&t.actual_dir.join("logo.png"), [10, 20, 30, 255]);
        write_png(&t.baseline_dir.join("logo.png"), [10, 20, 30, 255]);

        let diff = t.compare("logo", None).unwrap();
        assert!(diff.matches);
        assert_eq!(diff.diff_pixels, 0);
    }

    #[test]
    fn different_screenshots_fail_and_emit_diff_image() {
        let dir = tempfile::tempdir().unwrap();
        let t = tester(dir.path(), false);
        write_png(&t.actual_dir.join("logo.png"), [255, 0, 0, 255]);
        write_png(&t.baseline_dir.join("logo.png"), [0, 255, 0, 255]);

        let diff = t.compare("logo", None).unwrap();
        assert!(!diff.matches);
        assert_eq!(diff.diff_pixels, 64);
        assert!(diff.diff_image_path.unwrap().exists());
    }

    #[test]
    fn missing_baseline_errors_without_auto_update() {
        let dir = tempfile::tempdir().unwrap();
        let t = tester(dir.path(), false);
        write_png(&t.actual_dir.join("logo.png"), [1, 2, 3, 255]);

        let err = t.compare("logo", None).unwrap_err();
        assert!(matches!(err, E2eError::BaselineNotFound(_)));
    }

    #[test]
    fn missing_baseline_is_created_with_auto_update() {
        let dir = tempfile::tempdir().unwrap();
        let t = tester(dir.path(), true);
        write_png(&t.actual_dir.join("logo.png"), [1, 2, 3, 255]);

        let diff = t.compare("logo", None).unwrap();
        assert!(diff.matches);
        assert_eq!(t.list_baselines().unwrap(), vec!["logo".to_string()]);
    }

    #[test]
    fn tolerance_absorbs_antialiasing_noise() {
        let dir = tempfile::tempdir().unwrap();
        let t = tester(dir.path(), false);
        write_png(&t.actual_dir.join("logo.png"), [100, 100, 100, 255]);
        write_png(&t.baseline_dir.join("logo.png"), [103, 98, 102, 255]);

        let diff = t.compare("logo", None).unwrap();
        assert!(diff.matches, "within-tolerance pixels should not count");
    }
}
