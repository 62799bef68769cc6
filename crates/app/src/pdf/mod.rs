//! Invoice PDFs

mod layout;

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use thiserror::Error;
use tracing::debug;

use crate::domain::{invoices::InvoiceStatement, settings::InvoicePresentation};

use layout::{Align, Element, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, Page, Weight, estimate_width};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to load builtin font: {0}")]
    Font(String),

    #[error("failed to write PDF document: {0}")]
    Write(String),

    #[error("failed to flush PDF buffer")]
    Buffer(#[source] std::io::Error),
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, PdfError> {
        Ok(Self {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|error| PdfError::Font(error.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|error| PdfError::Font(error.to_string()))?,
        })
    }

    fn get(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

/// Render an invoice statement to PDF bytes.
///
/// # Errors
///
/// Returns an error when the document cannot be assembled or serialized.
#[tracing::instrument(
    name = "pdf.render_invoice",
    skip(statement, presentation),
    fields(invoice_id = %statement.invoice.id),
    err
)]
pub fn render_invoice_pdf(
    statement: &InvoiceStatement,
    presentation: &InvoicePresentation,
) -> Result<Vec<u8>, PdfError> {
    let pages = layout::layout_invoice(statement, presentation);

    let title = format!("{} {}", presentation.invoice_title, statement.invoice.id);
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let fonts = Fonts::load(&doc)?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        draw(&layer, &fonts, page);
    }

    let mut writer = BufWriter::new(Vec::new());

    doc.save(&mut writer)
        .map_err(|error| PdfError::Write(error.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|error| PdfError::Buffer(error.into_error()))?;

    debug!(pages = pages.len(), bytes = bytes.len(), "rendered invoice");

    Ok(bytes)
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, page: &Page) {
    layer.set_outline_thickness(0.5);

    for element in page {
        match element {
            Element::Text {
                x,
                y,
                size,
                weight,
                align,
                text,
            } => {
                let x = match align {
                    Align::Left => *x,
                    Align::Right => (*x - estimate_width(text, *size)).max(0.0),
                };

                layer.use_text(text.as_str(), *size, Mm(x), Mm(*y), fonts.get(*weight));
            }
            Element::Rule { y } => {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(MARGIN), Mm(*y)), false),
                        (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(*y)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}
