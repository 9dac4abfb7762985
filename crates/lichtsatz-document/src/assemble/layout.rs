// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-page layout policy, kept separate from rendering so it can be tested
// without touching the PDF library.
//
// A vertical cursor starts at the top margin and moves down as content is
// placed: first the photo (scaled so its rendered width fills the page width
// minus the side margins), then one text line per input line. There is no
// pagination — content that runs past the bottom edge is clipped by the
// single page.

use lichtsatz_core::PageSize;

/// Offset from each page edge used for content placement, in points.
pub const PAGE_MARGIN_PT: f32 = 50.0;

/// Vertical gap between the photo and the first text line, in points.
pub const IMAGE_TEXT_GAP_PT: f32 = 40.0;

/// Body font size in points.
pub const BODY_FONT_SIZE_PT: f32 = 11.0;

/// Baseline-to-baseline distance: default single spacing (1.2em) at 11pt.
pub const LINE_HEIGHT_PT: f32 = 13.2;

/// A photo placed on the page.
///
/// `x`/`y` are the left and bottom edges in page coordinates (origin at the
/// bottom-left, as in PDF). `scale` maps photo pixels to points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

/// One text line placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub baseline_y: f32,
}

/// The computed content of the single output page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub image: Option<PlacedImage>,
    pub lines: Vec<PlacedLine>,
}

/// Compute the page layout for an optional photo followed by text.
///
/// `photo_px` is the photo's pixel dimensions, or `None` when no photo is to
/// be placed. The photo's rendered width is always `page_width - 2 * margin`;
/// the height follows from the same scale factor with no clamping, so a tall
/// photo can push every following baseline (or its own bottom edge) off the
/// page.
///
/// Text is split strictly on `\n` — no word-wrap, no re-flow. A long line
/// runs off the right page edge; empty input text places no lines at all.
pub fn compute_layout(
    page_size: PageSize,
    photo_px: Option<(u32, u32)>,
    text: &str,
) -> PageLayout {
    let (page_width, page_height) = page_size.dimensions_pt();
    let mut cursor_y = page_height - PAGE_MARGIN_PT;

    let image = photo_px.map(|(px_width, px_height)| {
        let scale = (page_width - 2.0 * PAGE_MARGIN_PT) / px_width as f32;
        let width = px_width as f32 * scale;
        let height = px_height as f32 * scale;
        let placed = PlacedImage {
            x: PAGE_MARGIN_PT,
            y: cursor_y - height,
            width,
            height,
            scale,
        };
        cursor_y -= height + IMAGE_TEXT_GAP_PT;
        placed
    });

    let mut lines = Vec::new();
    if !text.is_empty() {
        for (index, line) in text.split('\n').enumerate() {
            lines.push(PlacedLine {
                text: line.to_string(),
                x: PAGE_MARGIN_PT,
                baseline_y: cursor_y - index as f32 * LINE_HEIGHT_PT,
            });
        }
    }

    PageLayout {
        page_width,
        page_height,
        image,
        lines,
    }
}
