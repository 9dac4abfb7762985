// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The one-call pipeline: optional recognition, then assembly.
//
// Recognition failure is non-fatal — the document is still created, with
// empty text, and the failure travels in the outcome for the caller to
// surface. Assembly failure is fatal for the create action and propagates.

use lichtsatz_core::error::{RecognitionFailure, Result};
use lichtsatz_core::{DocumentOptions, FinishedDocument, RequestId};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::assemble::DocumentAssembler;
use crate::photo::UploadedPhoto;
use crate::recognize::RecognitionAdapter;

/// Everything one create-document request produced.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// The finished single-page document.
    pub document: FinishedDocument,
    /// Text extracted by recognition; empty when recognition was disabled,
    /// skipped (no photo), or failed.
    pub extracted_text: String,
    /// Set when recognition was attempted and both engines failed.
    pub recognition_failure: Option<RecognitionFailure>,
}

/// Create one document from an optional photo and request-scoped options.
///
/// Each call is independently schedulable work: a fresh request id, no shared
/// state, no resource retained past the return.
pub fn create_document(
    photo: Option<&UploadedPhoto>,
    options: &DocumentOptions,
    adapter: &RecognitionAdapter,
) -> Result<DocumentOutcome> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("create_document", request = %request_id);
    let _guard = span.enter();

    let mut recognition_failure = None;
    let extracted_text = match (options.extract_text, photo) {
        (true, Some(photo)) => match adapter.recognize(photo) {
            Ok(text) => text,
            Err(failure) => {
                warn!(%failure, "text recognition failed; continuing with empty text");
                recognition_failure = Some(failure);
                String::new()
            }
        },
        _ => String::new(),
    };

    let assembler = DocumentAssembler::new(options.page_size);
    let bytes = assembler.assemble(photo, &extracted_text, options.include_photo)?;

    let sha256 = hex::encode(Sha256::digest(&bytes));
    info!(
        bytes = bytes.len(),
        sha256 = &sha256[..12],
        "Document created"
    );

    Ok(DocumentOutcome {
        document: FinishedDocument::new(request_id, bytes, sha256),
        extracted_text,
        recognition_failure,
    })
}
