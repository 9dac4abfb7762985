// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Lichtsatz photo-to-PDF composer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::LichtsatzError;

/// Unique identifier for one create-document request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported output page sizes.
///
/// The selection is exhaustive: anything other than A4 or Letter is rejected
/// at the configuration boundary, before a request reaches the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Page dimensions in PostScript points (width, height).
    ///
    /// A4 is 210x297mm expressed in points; Letter is 8.5x11in.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.2756, 841.8898),
            Self::Letter => (612.0, 792.0),
        }
    }

    /// Page width in points.
    pub fn width_pt(&self) -> f32 {
        self.dimensions_pt().0
    }

    /// Page height in points.
    pub fn height_pt(&self) -> f32 {
        self.dimensions_pt().1
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A4 => f.write_str("a4"),
            Self::Letter => f.write_str("letter"),
        }
    }
}

impl FromStr for PageSize {
    type Err = LichtsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::Letter),
            other => Err(LichtsatzError::UnknownPageSize(other.to_string())),
        }
    }
}

/// Request-scoped options for one create-document call.
///
/// These replace the original application's UI-held globals: every call to
/// the pipeline receives its own copy and no process-wide state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOptions {
    /// Output page dimensions.
    pub page_size: PageSize,
    /// Place the uploaded photo on the page.
    pub include_photo: bool,
    /// Run text recognition on the photo.
    pub extract_text: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            include_photo: true,
            extract_text: true,
        }
    }
}

/// Fixed download filename for finished documents.
pub const DOCUMENT_FILENAME: &str = "text-photo.pdf";

/// A finished single-page document, ready for download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishedDocument {
    /// The request that produced this document.
    pub id: RequestId,
    /// The complete PDF byte buffer.
    pub bytes: Vec<u8>,
    /// SHA-256 hash of `bytes`, hex-encoded.
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

impl FinishedDocument {
    pub fn new(id: RequestId, bytes: Vec<u8>, sha256: String) -> Self {
        Self {
            id,
            bytes,
            sha256,
            created_at: Utc::now(),
        }
    }

    /// Download filename — fixed, one document per request.
    pub fn filename(&self) -> &'static str {
        DOCUMENT_FILENAME
    }

    /// MIME type for download responses.
    pub fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
