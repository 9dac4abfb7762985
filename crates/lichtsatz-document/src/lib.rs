// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lichtsatz-document — Document processing for the Lichtsatz composer.
//
// Provides photo decoding (normalized to RGB8), a text-recognition adapter
// (tesseract with a pure-Rust ocrs fallback), single-page PDF assembly, and
// the one-call pipeline that strings them together.

pub mod assemble;
pub mod photo;
pub mod pipeline;
pub mod recognize;

// Re-export the primary structs so callers can use `lichtsatz_document::DocumentAssembler` etc.
pub use assemble::composer::DocumentAssembler;
pub use photo::UploadedPhoto;
pub use pipeline::{DocumentOutcome, create_document};
pub use recognize::RecognitionAdapter;
