//! Decode-until-success search over the whole image and its candidates

use std::fmt;

use tracing::debug;

use crate::decoder::SymbolDecoder;
use crate::detector::{Orientation, RegionExtractionStrategy};
use crate::models::{DecodeOutcome, Raster};

/// Driver states; `Success` and `Exhausted` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Decoding the unmodified input
    WholeImage,
    /// Walking candidates and their orientations
    CandidateSearch,
    /// A payload was decoded
    Success,
    /// Every attempt failed, or there was nothing to try
    Exhausted,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::WholeImage => "WHOLE_IMAGE",
            DriverState::CandidateSearch => "CANDIDATE_SEARCH",
            DriverState::Success => "SUCCESS",
            DriverState::Exhausted => "EXHAUSTED",
        };
        f.write_str(name)
    }
}

/// Where a decode attempt got its pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptSource {
    /// The full input raster
    WholeImage,
    /// Candidate `index` (selector order) in `orientation`
    Candidate {
        /// Position in the candidate list
        index: usize,
        /// Orientation applied to the crop
        orientation: Orientation,
    },
}

/// Counters collected while driving one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptTelemetry {
    /// Calls made to the symbol decoder
    pub decode_attempts: usize,
    /// Whether region extraction ran at all
    pub extraction_ran: bool,
    /// Candidates produced by extraction
    pub candidates: usize,
    /// Terminal state
    pub final_state: DriverState,
    /// Attempt that produced the payload
    pub winner: Option<AttemptSource>,
}

impl Default for AttemptTelemetry {
    fn default() -> Self {
        Self {
            decode_attempts: 0,
            extraction_ran: false,
            candidates: 0,
            final_state: DriverState::WholeImage,
            winner: None,
        }
    }
}

/// Result of one scan plus how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Decoded payload or `NotFound`
    pub outcome: DecodeOutcome,
    /// Attempt counters
    pub telemetry: AttemptTelemetry,
}

impl DecodeReport {
    fn finish(
        outcome: DecodeOutcome,
        mut telemetry: AttemptTelemetry,
        winner: Option<AttemptSource>,
    ) -> Self {
        telemetry.final_state = if outcome.is_success() {
            DriverState::Success
        } else {
            DriverState::Exhausted
        };
        telemetry.winner = winner;
        debug!(
            state = %telemetry.final_state,
            attempts = telemetry.decode_attempts,
            candidates = telemetry.candidates,
            "scan finished"
        );
        Self { outcome, telemetry }
    }
}

/// Runs the WHOLE_IMAGE → CANDIDATE_SEARCH → SUCCESS | EXHAUSTED machine.
///
/// Each (candidate, orientation) pair gets exactly one decode call; the only
/// retry dimension is moving on to the next pair. Extraction runs only when
/// the whole image fails, and every buffer it allocates is dropped before
/// [`run`](Self::run) returns.
pub struct DecodeAttemptDriver<'a, D: SymbolDecoder + ?Sized> {
    decoder: &'a D,
    strategy: &'a dyn RegionExtractionStrategy,
    orientations: &'a [Orientation],
}

impl<'a, D: SymbolDecoder + ?Sized> DecodeAttemptDriver<'a, D> {
    /// Driver over `decoder` and `strategy`, trying `orientations` per candidate
    pub fn new(
        decoder: &'a D,
        strategy: &'a dyn RegionExtractionStrategy,
        orientations: &'a [Orientation],
    ) -> Self {
        Self {
            decoder,
            strategy,
            orientations,
        }
    }

    /// Scan one raster
    pub fn run(&self, raster: &Raster) -> DecodeReport {
        let mut telemetry = AttemptTelemetry::default();

        debug!(
            state = %DriverState::WholeImage,
            width = raster.width(),
            height = raster.height(),
            "decoding whole image"
        );
        telemetry.decode_attempts += 1;
        let outcome = self.decoder.decode(&raster.view());
        if outcome.is_success() {
            return DecodeReport::finish(outcome, telemetry, Some(AttemptSource::WholeImage));
        }

        telemetry.final_state = DriverState::CandidateSearch;
        telemetry.extraction_ran = true;
        let gray = raster.as_luma();
        let candidates = self.strategy.extract(&gray);
        telemetry.candidates = candidates.len();
        debug!(
            state = %DriverState::CandidateSearch,
            strategy = self.strategy.name(),
            candidates = candidates.len(),
            "searching candidates"
        );

        if candidates.is_empty() {
            debug!("no barcode region detected");
            return DecodeReport::finish(DecodeOutcome::NotFound, telemetry, None);
        }

        for (index, candidate) in candidates.iter().enumerate() {
            for &orientation in self.orientations {
                let Some(variant) = orientation.apply(candidate.view) else {
                    continue;
                };
                telemetry.decode_attempts += 1;
                let outcome = self.decoder.decode(&variant.view());
                debug!(
                    index,
                    orientation = orientation.label(),
                    x = candidate.bbox.x,
                    y = candidate.bbox.y,
                    width = candidate.bbox.width,
                    height = candidate.bbox.height,
                    success = outcome.is_success(),
                    "candidate attempt"
                );
                if outcome.is_success() {
                    let winner = AttemptSource::Candidate { index, orientation };
                    return DecodeReport::finish(outcome, telemetry, Some(winner));
                }
            }
        }

        DecodeReport::finish(DecodeOutcome::NotFound, telemetry, None)
    }
}
