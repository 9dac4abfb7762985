// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text recognition adapter.
//
// Two engines behind one trait: the system tesseract binary as the primary,
// and the pure-Rust `ocrs` engine as the fallback. The chain is an explicit
// two-step strategy — try the primary, on failure construct and try the
// fallback, and on a second failure return a tagged `RecognitionFailure`
// carrying both diagnoses. The fallback is never constructed while the
// primary succeeds, because its model loading is the expensive step.

use std::path::PathBuf;

use lichtsatz_core::AppConfig;
use lichtsatz_core::error::{EngineFailure, RecognitionFailure};
use tracing::{debug, info, instrument, warn};

use crate::photo::UploadedPhoto;

pub mod tesseract;

#[cfg(feature = "ocr")]
pub mod fallback;

pub use tesseract::TesseractCli;

#[cfg(feature = "ocr")]
pub use fallback::{OcrModelPaths, OcrsFallback};

/// A single text-recognition engine.
///
/// Implementations report their own failure kind: `Unavailable` when the
/// engine's runtime dependency is missing, `Crashed` when the engine is
/// present but failed on this input.
pub trait TextRecognizer {
    /// Engine identifier (e.g. "tesseract", "ocrs").
    fn name(&self) -> &'static str;

    /// Extract text from the photo.
    fn recognize(&self, photo: &UploadedPhoto) -> Result<String, EngineFailure>;
}

/// Primary-with-fallback recognition over a fixed language.
///
/// Holds only configuration; engines are created per call. The tesseract
/// invocation is cheap to set up, and the ocrs fallback is deliberately not
/// kept around — it is loaded on demand and dropped with the call.
pub struct RecognitionAdapter {
    language: String,
    model_dir: Option<PathBuf>,
}

impl RecognitionAdapter {
    /// Create an adapter for the given recognition language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            model_dir: None,
        }
    }

    /// Override the fallback engine's model directory.
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Build an adapter from application settings.
    pub fn from_config(config: &AppConfig) -> Self {
        let adapter = Self::new(config.ocr_language.clone());
        match &config.ocr_model_dir {
            Some(dir) => adapter.with_model_dir(dir),
            None => adapter,
        }
    }

    /// Extract text from the photo, trying the primary engine first.
    ///
    /// Returns the extracted text, or a `RecognitionFailure` naming what went
    /// wrong with each engine. Never returns placeholder text.
    #[instrument(skip_all, fields(width = photo.width(), height = photo.height()))]
    pub fn recognize(&self, photo: &UploadedPhoto) -> Result<String, RecognitionFailure> {
        let primary = TesseractCli::new(&self.language);
        run_engines(photo, &primary, || self.load_fallback())
    }

    #[cfg(feature = "ocr")]
    fn load_fallback(&self) -> Result<Box<dyn TextRecognizer>, EngineFailure> {
        let paths = match &self.model_dir {
            Some(dir) => OcrModelPaths::from_dir(dir),
            None => OcrModelPaths::default(),
        };
        Ok(Box::new(OcrsFallback::load(&paths)?))
    }

    #[cfg(not(feature = "ocr"))]
    fn load_fallback(&self) -> Result<Box<dyn TextRecognizer>, EngineFailure> {
        Err(EngineFailure::Unavailable(
            "built without the \"ocr\" feature; no fallback engine".into(),
        ))
    }
}

/// The two-step engine chain.
///
/// `load_fallback` runs only after the primary has failed — model loading
/// must never happen eagerly, and a successful primary pass must not pay for
/// it.
fn run_engines<F>(
    photo: &UploadedPhoto,
    primary: &dyn TextRecognizer,
    load_fallback: F,
) -> Result<String, RecognitionFailure>
where
    F: FnOnce() -> Result<Box<dyn TextRecognizer>, EngineFailure>,
{
    let primary_failure = match primary.recognize(photo) {
        Ok(text) => {
            debug!(
                engine = primary.name(),
                chars = text.len(),
                "primary recognition succeeded"
            );
            return Ok(text);
        }
        Err(failure) => {
            warn!(engine = primary.name(), %failure, "primary recognition engine failed");
            failure
        }
    };

    let engine = match load_fallback() {
        Ok(engine) => engine,
        Err(fallback_failure) => {
            return Err(RecognitionFailure {
                primary: primary_failure,
                fallback: fallback_failure,
            });
        }
    };

    match engine.recognize(photo) {
        Ok(text) => {
            info!(
                engine = engine.name(),
                chars = text.len(),
                "fallback recognition succeeded"
            );
            Ok(text)
        }
        Err(fallback_failure) => Err(RecognitionFailure {
            primary: primary_failure,
            fallback: fallback_failure,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::cell::Cell;

    struct StubEngine {
        name: &'static str,
        result: Result<String, EngineFailure>,
    }

    impl TextRecognizer for StubEngine {
        fn name(&self) -> &'static str {
            self.name
        }

        fn recognize(&self, _photo: &UploadedPhoto) -> Result<String, EngineFailure> {
            self.result.clone()
        }
    }

    fn test_photo() -> UploadedPhoto {
        UploadedPhoto::from_rgb(RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])))
    }

    #[test]
    fn primary_success_never_constructs_fallback() {
        let photo = test_photo();
        let primary = StubEngine {
            name: "primary",
            result: Ok("recognised text".into()),
        };
        let fallback_loaded = Cell::new(false);

        let text = run_engines(&photo, &primary, || {
            fallback_loaded.set(true);
            Ok(Box::new(StubEngine {
                name: "fallback",
                result: Ok("should not be used".into()),
            }) as Box<dyn TextRecognizer>)
        })
        .unwrap();

        assert_eq!(text, "recognised text");
        assert!(
            !fallback_loaded.get(),
            "fallback must not be constructed when the primary succeeds"
        );
    }

    #[test]
    fn primary_failure_falls_back() {
        let photo = test_photo();
        let primary = StubEngine {
            name: "primary",
            result: Err(EngineFailure::Unavailable("not installed".into())),
        };

        let text = run_engines(&photo, &primary, || {
            Ok(Box::new(StubEngine {
                name: "fallback",
                result: Ok("from the fallback".into()),
            }) as Box<dyn TextRecognizer>)
        })
        .unwrap();

        assert_eq!(text, "from the fallback");
    }

    #[test]
    fn both_failures_are_reported_together() {
        let photo = test_photo();
        let primary = StubEngine {
            name: "primary",
            result: Err(EngineFailure::Crashed("exit code 1".into())),
        };

        let failure = run_engines(&photo, &primary, || {
            Ok(Box::new(StubEngine {
                name: "fallback",
                result: Err(EngineFailure::Crashed("inference error".into())),
            }) as Box<dyn TextRecognizer>)
        })
        .unwrap_err();

        assert_eq!(failure.primary, EngineFailure::Crashed("exit code 1".into()));
        assert_eq!(
            failure.fallback,
            EngineFailure::Crashed("inference error".into())
        );
    }

    #[test]
    fn unloadable_fallback_is_reported_as_unavailable() {
        let photo = test_photo();
        let primary = StubEngine {
            name: "primary",
            result: Err(EngineFailure::Unavailable("no binary".into())),
        };

        let failure = run_engines(&photo, &primary, || {
            Err(EngineFailure::Unavailable("models missing".into()))
        })
        .unwrap_err();

        assert!(failure.nothing_installed());
    }
}
