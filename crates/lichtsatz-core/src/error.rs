// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Lichtsatz.

use thiserror::Error;

/// How a single recognition engine failed.
///
/// The two kinds are deliberately distinct: a missing tesseract binary or an
/// empty model cache is a setup problem, while a crash on a particular photo
/// is an input problem. Callers and user-facing messages treat them
/// differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFailure {
    /// The engine's runtime dependency is not installed (binary not on PATH,
    /// model files not downloaded, feature compiled out).
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// The engine is present but failed while processing this input.
    #[error("engine crashed: {0}")]
    Crashed(String),
}

/// Both recognition engines failed for one photo.
///
/// Returned by the recognition adapter after the primary engine and the
/// fallback engine have both been attempted. Carries the diagnosis from each
/// so the caller can tell "nothing is installed" apart from "this photo broke
/// both engines".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("text recognition failed (primary: {primary}; fallback: {fallback})")]
pub struct RecognitionFailure {
    /// What went wrong with the primary (tesseract) engine.
    pub primary: EngineFailure,
    /// What went wrong with the fallback (ocrs) engine.
    pub fallback: EngineFailure,
}

impl RecognitionFailure {
    /// True when neither engine was even runnable — nothing is installed.
    pub fn nothing_installed(&self) -> bool {
        matches!(self.primary, EngineFailure::Unavailable(_))
            && matches!(self.fallback, EngineFailure::Unavailable(_))
    }
}

/// Top-level error type for all Lichtsatz operations.
#[derive(Debug, Error)]
pub enum LichtsatzError {
    // -- Document errors --
    #[error("image processing failed: {0}")]
    Image(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Recognition(#[from] RecognitionFailure),

    // -- Configuration --
    #[error("unknown page size: {0:?} (expected \"a4\" or \"letter\")")]
    UnknownPageSize(String),

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LichtsatzError>;
