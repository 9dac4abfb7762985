// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Primary recognition engine: the system `tesseract` binary.
//
// The photo is written to a temporary PNG and tesseract is invoked in stdout
// mode with a fixed language. A missing binary is an `Unavailable` failure
// (the runtime dependency is not installed); anything that goes wrong after
// the binary was found is `Crashed`.

use std::io::Write;
use std::process::Command;

use lichtsatz_core::error::EngineFailure;
use tracing::{debug, instrument};

use super::TextRecognizer;
use crate::photo::UploadedPhoto;

/// Text recognition via the system tesseract installation.
pub struct TesseractCli {
    language: String,
}

impl TesseractCli {
    /// Create an engine for the given tesseract language code (e.g. "eng").
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl TextRecognizer for TesseractCli {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    #[instrument(skip_all, fields(language = %self.language))]
    fn recognize(&self, photo: &UploadedPhoto) -> Result<String, EngineFailure> {
        // Tesseract reads from a file, so the in-memory photo goes through a
        // temporary PNG. The guard removes the file when it drops.
        let mut tmp = tempfile::Builder::new()
            .prefix("lichtsatz-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|err| EngineFailure::Crashed(format!("failed to create temp image: {err}")))?;

        let png = photo
            .to_png_bytes()
            .map_err(|err| EngineFailure::Crashed(format!("failed to encode photo: {err}")))?;
        tmp.write_all(&png)
            .map_err(|err| EngineFailure::Crashed(format!("failed to write temp image: {err}")))?;
        tmp.flush().ok();

        let output = match Command::new("tesseract")
            .arg(tmp.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
        {
            Ok(output) => output,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineFailure::Unavailable(
                    "tesseract binary not found on PATH".into(),
                ));
            }
            Err(err) => {
                return Err(EngineFailure::Crashed(format!(
                    "failed to run tesseract: {err}"
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineFailure::Crashed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = clean_output(&String::from_utf8_lossy(&output.stdout));
        debug!(chars = text.len(), "tesseract recognition complete");
        Ok(text)
    }
}

/// Strip the trailing newline and form-feed page separator tesseract appends
/// to its stdout text output.
fn clean_output(raw: &str) -> String {
    raw.trim_end_matches(['\n', '\u{c}']).to_string()
}
