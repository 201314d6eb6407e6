use rxing::{BarcodeFormat, DecodeHintType, DecodeHintValue, DecodingHintDictionary};
use tracing::trace;

use super::{DecodeHints, SymbolDecoder, Symbology};
use crate::models::{DecodeOutcome, RasterView};

/// [`SymbolDecoder`] backed by rxing's multi-format reader
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingDecoder {
    hints: DecodeHints,
}

impl RxingDecoder {
    /// Decoder using `hints`
    pub fn new(hints: DecodeHints) -> Self {
        Self { hints }
    }

    /// Hints in use
    pub fn hints(&self) -> DecodeHints {
        self.hints
    }

    fn hint_dictionary(&self) -> DecodingHintDictionary {
        let mut hints = DecodingHintDictionary::new();
        if self.hints.try_harder {
            hints.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        }
        hints
    }
}

impl SymbolDecoder for RxingDecoder {
    fn decode(&self, raster: &RasterView<'_>) -> DecodeOutcome {
        if raster.is_empty() {
            return DecodeOutcome::NotFound;
        }
        let format = match self.hints.symbology {
            Symbology::Any => None,
            Symbology::Pdf417Only => Some(BarcodeFormat::PDF_417),
        };
        let mut hints = self.hint_dictionary();

        match rxing::helpers::detect_in_luma_with_hints(
            raster.to_luma_vec(),
            raster.width() as u32,
            raster.height() as u32,
            format,
            &mut hints,
        ) {
            Ok(result) => DecodeOutcome::from_text(Some(result.getText().to_string())),
            Err(err) => {
                trace!(width = raster.width(), height = raster.height(), %err, "rxing found nothing");
                DecodeOutcome::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channels, Raster};

    #[test]
    fn test_blank_raster_is_not_found() {
        let raster = Raster::filled(120, 80, Channels::Gray, 255).unwrap();
        let decoder = RxingDecoder::default();
        assert_eq!(decoder.decode(&raster.view()), DecodeOutcome::NotFound);
    }

    #[test]
    fn test_try_harder_hint() {
        let decoder = RxingDecoder::new(DecodeHints {
            symbology: Symbology::Pdf417Only,
            try_harder: false,
        });
        assert!(decoder.hint_dictionary().is_empty());
        assert_eq!(RxingDecoder::default().hint_dictionary().len(), 1);
    }
}
