// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly — single-page layout computation and PDF rendering.

pub mod composer;
pub mod layout;

pub use composer::DocumentAssembler;
pub use layout::{PageLayout, PlacedImage, PlacedLine, compute_layout};
