//! Scan settings with environment overrides

use std::sync::OnceLock;

use crate::decoder::{DecodeHints, Symbology};
use crate::detector::{Orientation, SelectionParams};
use crate::utils::morphology::StructuringElement;

/// Aspect range applied when the aspect filter is switched on
pub const PDF417_ASPECT_RANGE: (f32, f32) = (2.0, 6.0);

/// Every tuned constant of a scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Regions kept after ranking
    pub max_candidates: usize,
    /// Side scale of each kept region
    pub expansion_factor: f32,
    /// Structuring element width
    pub kernel_width: usize,
    /// Structuring element height
    pub kernel_height: usize,
    /// Erosions (and dilations) after the close
    pub morph_iterations: usize,
    /// Open width / height interval a region must fall in
    pub aspect_filter: Option<(f32, f32)>,
    /// Orientations tried per candidate, in order
    pub orientations: Vec<Orientation>,
    /// Hints forwarded to the symbol decoder
    pub hints: DecodeHints,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_candidates: 3,
            expansion_factor: 5.0,
            kernel_width: 7,
            kernel_height: 21,
            morph_iterations: 4,
            aspect_filter: None,
            orientations: Orientation::DEFAULT.to_vec(),
            hints: DecodeHints::default(),
        }
    }
}

fn parse_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_f32(value: Option<String>, default: f32) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES") => true,
        Some("0") | Some("false") | Some("FALSE") | Some("no") | Some("NO") => false,
        _ => default,
    }
}

impl ScanConfig {
    /// Defaults overridden by `PDF417_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup.
    ///
    /// Unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let aspect_filter = parse_bool(lookup("PDF417_ASPECT_FILTER"), false)
            .then_some(PDF417_ASPECT_RANGE);
        let orientations = if parse_bool(lookup("PDF417_EXHAUSTIVE_ROTATION"), false) {
            Orientation::ALL.to_vec()
        } else {
            defaults.orientations.clone()
        };
        let symbology = lookup("PDF417_SYMBOLOGY")
            .and_then(|v| Symbology::parse(&v))
            .unwrap_or(defaults.hints.symbology);

        Self {
            max_candidates: parse_usize(lookup("PDF417_MAX_CANDIDATES"), defaults.max_candidates)
                .max(1),
            expansion_factor: parse_f32(
                lookup("PDF417_EXPANSION_FACTOR"),
                defaults.expansion_factor,
            )
            .max(1.0),
            morph_iterations: parse_usize(
                lookup("PDF417_MORPH_ITERATIONS"),
                defaults.morph_iterations,
            ),
            aspect_filter,
            orientations,
            hints: DecodeHints {
                symbology,
                ..defaults.hints
            },
            ..defaults
        }
    }

    /// Process-wide settings, read from the environment on first use
    pub fn global() -> &'static ScanConfig {
        static GLOBAL: OnceLock<ScanConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::from_env)
    }

    /// Morphology kernel
    pub fn kernel(&self) -> StructuringElement {
        StructuringElement::rect(self.kernel_width, self.kernel_height)
    }

    /// Ranking and expansion parameters
    pub fn selection(&self) -> SelectionParams {
        SelectionParams {
            max_candidates: self.max_candidates,
            expansion_factor: self.expansion_factor.max(1.0),
            aspect_filter: self.aspect_filter,
        }
    }

    /// Only accept PDF417 symbols
    pub fn pdf417_only(mut self) -> Self {
        self.hints.symbology = Symbology::Pdf417Only;
        self
    }

    /// Skip regions outside the typical PDF417 aspect range
    pub fn with_aspect_filter(mut self) -> Self {
        self.aspect_filter = Some(PDF417_ASPECT_RANGE);
        self
    }

    /// Try all four quarter turns per candidate
    pub fn exhaustive_rotation(mut self) -> Self {
        self.orientations = Orientation::ALL.to_vec();
        self
    }
}
