// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fallback recognition engine: `ocrs`, a pure-Rust OCR engine backed by
// neural network models executed via `rten` on the CPU.
//
// Model loading is the expensive step, so the adapter constructs this engine
// only after the primary has already failed. The engine requires two model
// files:
//
// - `text-detection.rten` — locates text regions in the image.
// - `text-recognition.rten` — decodes characters from detected regions.
//
// Models can be obtained by running the `ocrs-cli` tool once
// (`cargo install ocrs-cli; ocrs some-image.png`), which downloads them to
// `$XDG_CACHE_HOME/ocrs` (typically `~/.cache/ocrs`).

use std::path::{Path, PathBuf};

use lichtsatz_core::error::EngineFailure;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use super::TextRecognizer;
use crate::photo::UploadedPhoto;

/// Default directory for cached OCR model files.
///
/// Follows the XDG Base Directory specification: `$XDG_CACHE_HOME/ocrs`,
/// falling back to `~/.cache/ocrs` when `XDG_CACHE_HOME` is unset.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        // Last resort — current directory.
        PathBuf::from("ocrs-models")
    }
}

/// Well-known filenames for the detection and recognition models.
const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Locations of the two model files the fallback engine needs.
#[derive(Debug, Clone)]
pub struct OcrModelPaths {
    /// Path to the text-detection model file (`.rten`).
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file (`.rten`).
    pub recognition_model_path: PathBuf,
}

impl Default for OcrModelPaths {
    /// Returns paths pointing at the default model cache directory.
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrModelPaths {
    /// Point at a directory expected to contain `text-detection.rten` and
    /// `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Point at two specific model files.
    pub fn from_paths(
        detection_model: impl Into<PathBuf>,
        recognition_model: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detection_model_path: detection_model.into(),
            recognition_model_path: recognition_model.into(),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<(), EngineFailure> {
        if !self.detection_model_path.exists() {
            return Err(EngineFailure::Unavailable(format!(
                "detection model not found at {}; run `ocrs-cli` once to download models",
                self.detection_model_path.display()
            )));
        }
        if !self.recognition_model_path.exists() {
            return Err(EngineFailure::Unavailable(format!(
                "recognition model not found at {}; run `ocrs-cli` once to download models",
                self.recognition_model_path.display()
            )));
        }
        Ok(())
    }
}

/// The loaded fallback engine.
///
/// Construction loads both models into memory; keep the instance around only
/// for the duration of one recognition call.
pub struct OcrsFallback {
    engine: OcrEngine,
}

impl OcrsFallback {
    /// Load the engine from the given model paths.
    ///
    /// Missing or unloadable models are `Unavailable` — the engine cannot run
    /// at all without them, which is a setup problem rather than an input
    /// problem.
    ///
    /// The `ocrs` and `rten` crates must be compiled in release mode; debug
    /// builds are 10-100x slower.
    #[instrument(skip_all, fields(
        detection = %paths.detection_model_path.display(),
        recognition = %paths.recognition_model_path.display(),
    ))]
    pub fn load(paths: &OcrModelPaths) -> Result<Self, EngineFailure> {
        paths.validate()?;

        info!("Loading OCR detection model");
        let detection_model = Model::load_file(&paths.detection_model_path).map_err(|err| {
            EngineFailure::Unavailable(format!(
                "failed to load detection model from {}: {}",
                paths.detection_model_path.display(),
                err
            ))
        })?;

        info!("Loading OCR recognition model");
        let recognition_model =
            Model::load_file(&paths.recognition_model_path).map_err(|err| {
                EngineFailure::Unavailable(format!(
                    "failed to load recognition model from {}: {}",
                    paths.recognition_model_path.display(),
                    err
                ))
            })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| {
            EngineFailure::Unavailable(format!("failed to initialise ocrs engine: {err}"))
        })?;

        info!("Fallback OCR engine initialised");
        Ok(Self { engine })
    }
}

impl TextRecognizer for OcrsFallback {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    /// Recognize per-region text and concatenate the regions with newlines,
    /// in the order the engine returns them. That order is engine-defined and
    /// is not re-sorted into reading order.
    #[instrument(skip_all, fields(width = photo.width(), height = photo.height()))]
    fn recognize(&self, photo: &UploadedPhoto) -> Result<String, EngineFailure> {
        let rgb = photo.as_rgb();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            EngineFailure::Crashed(format!(
                "failed to create image source ({width}x{height}): {err}"
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| EngineFailure::Crashed(format!("OCR preprocessing failed: {err}")))?;

        let word_rects = self
            .engine
            .detect_words(&input)
            .map_err(|err| EngineFailure::Crashed(format!("word detection failed: {err}")))?;
        debug!(word_count = word_rects.len(), "Words detected");

        let line_rects = self.engine.find_text_lines(&input, &word_rects);
        debug!(line_count = line_rects.len(), "Text lines found");

        let line_texts = self
            .engine
            .recognize_text(&input, &line_rects)
            .map_err(|err| EngineFailure::Crashed(format!("line recognition failed: {err}")))?;

        let mut regions = Vec::with_capacity(line_texts.len());
        for line in line_texts.iter().flatten() {
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }
            regions.push(text);
        }

        debug!(recognized_lines = regions.len(), "Fallback recognition complete");
        Ok(regions.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_well_known_filenames() {
        let paths = OcrModelPaths::default();
        let detection = paths.detection_model_path.to_string_lossy();
        assert!(
            detection.ends_with(DETECTION_MODEL_FILENAME),
            "detection model path should end with {DETECTION_MODEL_FILENAME}, got {detection}"
        );
        let recognition = paths.recognition_model_path.to_string_lossy();
        assert!(
            recognition.ends_with(RECOGNITION_MODEL_FILENAME),
            "recognition model path should end with {RECOGNITION_MODEL_FILENAME}, got {recognition}"
        );
    }

    #[test]
    fn paths_from_dir() {
        let paths = OcrModelPaths::from_dir("/tmp/my-models");
        assert_eq!(
            paths.detection_model_path,
            PathBuf::from("/tmp/my-models/text-detection.rten")
        );
        assert_eq!(
            paths.recognition_model_path,
            PathBuf::from("/tmp/my-models/text-recognition.rten")
        );
    }

    #[test]
    fn paths_from_explicit_files() {
        let paths = OcrModelPaths::from_paths("/a/detect.rten", "/b/recog.rten");
        assert_eq!(paths.detection_model_path, PathBuf::from("/a/detect.rten"));
        assert_eq!(paths.recognition_model_path, PathBuf::from("/b/recog.rten"));
    }

    #[test]
    fn missing_models_are_unavailable() {
        let paths = OcrModelPaths::from_dir("/nonexistent/path/ocr-models");
        let failure = paths.validate().unwrap_err();
        assert!(
            matches!(failure, EngineFailure::Unavailable(_)),
            "missing models are a setup problem, got {failure:?}"
        );
    }

    #[test]
    fn loading_without_models_fails_as_unavailable() {
        let paths = OcrModelPaths::from_dir("/nonexistent/path/ocr-models");
        let result = OcrsFallback::load(&paths);
        assert!(matches!(result, Err(EngineFailure::Unavailable(_))));
    }
}
