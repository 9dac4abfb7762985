// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document composer — renders a computed `PageLayout` into PDF bytes using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use lichtsatz_core::PageSize;
use lichtsatz_core::error::Result;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument};

use super::layout::{BODY_FONT_SIZE_PT, PageLayout, compute_layout};
use crate::photo::UploadedPhoto;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Composes a photo and/or text into exactly one PDF page.
///
/// Each call to [`assemble`](Self::assemble) is a pure function of its inputs
/// with respect to document content; nothing is cached between calls.
pub struct DocumentAssembler {
    /// Output page dimensions.
    page_size: PageSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl DocumentAssembler {
    /// Create an assembler targeting the given page size.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            title: None,
        }
    }

    /// Create an assembler defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PageSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Assemble the single-page document.
    ///
    /// The photo is placed only when `include_photo` is set *and* a photo was
    /// supplied — a requested photo that is absent is "nothing to place", not
    /// an error. Empty text likewise places nothing. The output is always
    /// exactly one page, even when both inputs are absent.
    #[instrument(skip(self, photo, text), fields(text_len = text.len(), include_photo))]
    pub fn assemble(
        &self,
        photo: Option<&UploadedPhoto>,
        text: &str,
        include_photo: bool,
    ) -> Result<Vec<u8>> {
        let title = self.title.as_deref().unwrap_or("Lichtsatz Document");
        let placed_photo = if include_photo { photo } else { None };

        let layout = compute_layout(
            self.page_size,
            placed_photo.map(|p| p.dimensions()),
            text,
        );
        info!(
            page = %self.page_size,
            has_image = layout.image.is_some(),
            lines = layout.lines.len(),
            "Assembling document"
        );

        let mut doc = PdfDocument::new(title);
        let image_id = placed_photo.map(|p| doc.add_image(&raw_image_from(p)));
        let ops = page_ops(&layout, image_id);

        let page = PdfPage::new(
            Mm(layout.page_width * PT_TO_MM),
            Mm(layout.page_height * PT_TO_MM),
            ops,
        );
        doc.with_pages(vec![page]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(
            bytes = bytes.len(),
            warnings = warnings.len(),
            "Document serialised"
        );

        Ok(bytes)
    }
}

/// Wrap the photo's RGB8 buffer for embedding.
fn raw_image_from(photo: &UploadedPhoto) -> RawImage {
    RawImage {
        pixels: RawImageData::U8(photo.as_rgb().clone().into_raw()),
        width: photo.width() as usize,
        height: photo.height() as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

/// Build the operation list for the single page.
///
/// At 72 DPI the image's native render size equals its pixel size in points,
/// so the layout's scale factor applies directly to the transform.
fn page_ops(layout: &PageLayout, image_id: Option<XObjectId>) -> Vec<Op> {
    let mut ops = Vec::new();

    if let (Some(placed), Some(id)) = (layout.image.as_ref(), image_id) {
        ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(placed.x)),
                translate_y: Some(Pt(placed.y)),
                scale_x: Some(placed.scale),
                scale_y: Some(placed.scale),
                dpi: Some(72.0),
                rotate: None,
            },
        });
    }

    for line in &layout.lines {
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(line.x),
                y: Pt(line.baseline_y),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(BODY_FONT_SIZE_PT),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line.text.clone())],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::EndTextSection);
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn test_photo(width: u32, height: u32) -> UploadedPhoto {
        UploadedPhoto::from_rgb(RgbImage::from_pixel(width, height, Rgb([180, 120, 60])))
    }

    fn written_texts(ops: &[Op]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                Op::WriteTextBuiltinFont { items, .. } => items.iter().next().map(|item| {
                    match item {
                        TextItem::Text(text) => text.clone(),
                        other => panic!("unexpected text item {other:?}"),
                    }
                }),
                _ => None,
            })
            .collect()
    }

    fn image_op_count(ops: &[Op]) -> usize {
        ops.iter()
            .filter(|op| matches!(op, Op::UseXobject { .. }))
            .count()
    }

    #[test]
    fn image_only_page_has_one_image_op_and_no_text_ops() {
        let photo = test_photo(10, 20);
        let mut doc = PdfDocument::new("test");
        let id = doc.add_image(&raw_image_from(&photo));

        let layout = compute_layout(PageSize::A4, Some(photo.dimensions()), "");
        let ops = page_ops(&layout, Some(id));

        assert_eq!(image_op_count(&ops), 1);
        assert!(written_texts(&ops).is_empty());
    }

    #[test]
    fn text_only_page_writes_lines_in_order() {
        let layout = compute_layout(PageSize::Letter, None, "hello\nworld");
        let ops = page_ops(&layout, None);

        assert_eq!(image_op_count(&ops), 0);
        assert_eq!(written_texts(&ops), vec!["hello", "world"]);
    }

    #[test]
    fn empty_layout_produces_no_ops() {
        let layout = compute_layout(PageSize::A4, None, "");
        let ops = page_ops(&layout, None);
        assert!(ops.is_empty());
    }

    #[test]
    fn empty_page_is_still_a_valid_document() {
        let assembler = DocumentAssembler::new(PageSize::A4);
        let bytes = assembler.assemble(None, "", false).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output should be a PDF");
    }

    #[test]
    fn photo_and_text_assemble_to_a_pdf() {
        let photo = test_photo(40, 30);
        let assembler = DocumentAssembler::new(PageSize::Letter);
        let bytes = assembler
            .assemble(Some(&photo), "first line\nsecond line", true)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn include_photo_without_photo_is_skipped_silently() {
        let assembler = DocumentAssembler::new(PageSize::A4);
        // include_photo requested, but no photo supplied — not an error.
        let bytes = assembler.assemble(None, "just text", true).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn photo_excluded_when_not_requested() {
        let photo = test_photo(64, 48);
        let assembler = DocumentAssembler::new(PageSize::A4);
        let with_photo = assembler.assemble(Some(&photo), "", true).unwrap();
        let without_photo = assembler.assemble(Some(&photo), "", false).unwrap();
        // With include_photo off the photo is never embedded, so the document
        // must come out smaller.
        assert!(with_photo.len() > without_photo.len());
    }
}
