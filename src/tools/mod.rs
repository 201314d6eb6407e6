use crate::detector::{DetectionStages, GradientMorphologyStrategy};
use crate::models::{BinaryMask, Raster, ScalarField};
use crate::{DecodeOutcome, Result, Scanner, SymbolDecoder};
use image::GenericImageView;
use rayon::prelude::*;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn max_dim_from_env() -> Option<u32> {
    match env::var("PDF417_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image file as a raster, downscaling when `PDF417_MAX_DIM` is set.
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let img = image::open(path)?;
    let img = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => {
            img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
        }
        _ => img,
    };
    Raster::from_dynamic_image(&img)
}

/// Summary statistics for a scalar field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Minimum value.
    pub min: u8,
    /// Maximum value.
    pub max: u8,
    /// Average value.
    pub avg: u8,
}

/// Summary statistics for a binary mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStats {
    /// Count of foreground pixels.
    pub foreground_pixels: usize,
    /// Total pixels in the mask.
    pub total_pixels: usize,
    /// Ratio of foreground pixels to total pixels.
    pub foreground_ratio: f64,
}

/// Compute min/max/avg of a field.
pub fn field_stats(field: &ScalarField) -> FieldStats {
    let values = field.as_slice();
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    if values.is_empty() {
        return FieldStats {
            min: 0,
            max: 0,
            avg: 0,
        };
    }
    FieldStats {
        min,
        max,
        avg: (sum / values.len() as u64) as u8,
    }
}

/// Compute foreground stats for a mask.
pub fn mask_stats(mask: &BinaryMask) -> MaskStats {
    let foreground = mask.count_foreground();
    let total = mask.width() * mask.height();
    let ratio = if total == 0 {
        0.0
    } else {
        foreground as f64 / total as f64
    };
    MaskStats {
        foreground_pixels: foreground,
        total_pixels: total,
        foreground_ratio: ratio,
    }
}

/// Run the gradient strategy's stages on a raster's luminance.
pub fn inspect_stages(raster: &Raster, strategy: &GradientMorphologyStrategy) -> DetectionStages {
    strategy.stages(&raster.as_luma())
}

/// Decode every path in parallel; results keep the input order.
pub fn scan_paths<D>(scanner: &Scanner<D>, paths: &[PathBuf]) -> Vec<(PathBuf, Result<DecodeOutcome>)>
where
    D: SymbolDecoder + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let outcome = load_raster(path).map(|raster| scanner.decode(&raster));
            (path.clone(), outcome)
        })
        .collect()
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("PDF417_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Default bench limit from environment variables.
///
/// Returns `None` (full dataset) when `PDF417_BENCH_LIMIT` is unset or `0`.
pub fn bench_limit_from_env() -> Option<usize> {
    match env::var("PDF417_BENCH_LIMIT") {
        Ok(value) => value
            .parse::<usize>()
            .ok()
            .and_then(|v| if v == 0 { None } else { Some(v) }),
        Err(_) => None,
    }
}

/// Iterate dataset image paths (sorted) with an optional limit.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tif" | "tiff") {
                    images.push(path);
                }
            }
        }
    }

    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channels, RasterView};
    use crate::ScanConfig;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = env::temp_dir().join(format!("pdf417_scan_tools_{nanos}_{sequence}"));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        dir
    }

    struct DarkCenter;

    impl SymbolDecoder for DarkCenter {
        fn decode(&self, raster: &RasterView<'_>) -> DecodeOutcome {
            let v = raster.luma(raster.width() / 2, raster.height() / 2);
            DecodeOutcome::from_text((v < 100).then(|| format!("luma {v}")))
        }
    }

    #[test]
    fn dataset_iter_finds_images_recursively() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.png"), b"").unwrap();
        fs::write(dir.join("nested").join("a.JPG"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();

        let found: Vec<_> = dataset_iter(&dir, None).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(dataset_iter(&dir, Some(1)).count(), 1);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn scan_paths_keeps_order_and_reports_errors() {
        let dir = temp_dir();
        let dark = dir.join("dark.png");
        let light = dir.join("light.png");
        image::GrayImage::from_pixel(16, 16, image::Luma([10u8])).save(&dark).unwrap();
        image::GrayImage::from_pixel(16, 16, image::Luma([250u8])).save(&light).unwrap();
        let missing = dir.join("missing.png");

        let scanner = Scanner::with_config(DarkCenter, ScanConfig::default());
        let results = scan_paths(&scanner, &[dark.clone(), light.clone(), missing.clone()]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, dark);
        assert_eq!(
            results[0].1.as_ref().ok(),
            Some(&DecodeOutcome::Success("luma 10".to_string()))
        );
        assert_eq!(results[1].1.as_ref().ok(), Some(&DecodeOutcome::NotFound));
        assert!(results[2].1.is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn stats_summarise_stages() {
        let raster = Raster::filled(20, 10, Channels::Gray, 50).unwrap();
        let stages = inspect_stages(&raster, &GradientMorphologyStrategy::default());
        assert_eq!(
            field_stats(&stages.gradient),
            FieldStats {
                min: 0,
                max: 0,
                avg: 0
            }
        );
        let stats = mask_stats(&stages.shaped);
        assert_eq!(stats.foreground_pixels, 0);
        assert_eq!(stats.total_pixels, 200);
    }
}
