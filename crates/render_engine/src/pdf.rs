//! PDF output
//!
//! Documents are laid out on A4 in two passes. The first pass writes the
//! content and breaks pages as the item table grows; the second pass stamps
//! every collected page with the watermark and the "Page X of Y" / version
//! footer, which cannot be written earlier because the page count is not
//! known until layout finishes.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point,
};

use domain_documents::DocumentType;

use crate::error::RenderError;
use crate::model::{format_amount, DocumentData, ItemRow, TotalKind};
use crate::options::RenderOptions;
use crate::qr;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const RIGHT_EDGE: f32 = 195.0;
/// Content never descends into this strip; the footer pass owns it
const FOOTER_ZONE: f32 = 25.0;
const ROW_HEIGHT: f32 = 5.5;

pub(crate) fn render(
    data: &DocumentData,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), RenderError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(data.title.clone(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let pages = {
        let mut writer = PageWriter {
            doc: &doc,
            pages: vec![(first_page, first_layer)],
            layer: doc.get_page(first_page).get_layer(first_layer),
            y: PAGE_HEIGHT - MARGIN,
            font: font.clone(),
            bold: bold.clone(),
        };

        draw_header(&mut writer, data)?;
        draw_party(&mut writer, data);
        draw_items(&mut writer, data);
        draw_totals(&mut writer, data);
        draw_summary(&mut writer, data);
        draw_bank(&mut writer, data);
        draw_terms(&mut writer, data);
        if options.signature_placeholder {
            draw_signature(&mut writer, data);
        }
        writer.pages
    };

    stamp_pages(&doc, &pages, data, options, &font, &bold);

    let file = File::create(path)?;
    let mut buf = BufWriter::new(file);
    doc.save(&mut buf).map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(())
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    layer: PdfLayerReference,
    y: f32,
    font: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter<'_> {
    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn down(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn rule(&self, x1: f32, x2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.y)), false),
                (Point::new(Mm(x2), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    /// Breaks the page if `needed` millimetres would cross the footer zone;
    /// returns true when a break happened
    fn ensure(&mut self, needed: f32) -> bool {
        if self.y - needed < FOOTER_ZONE {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.pages.push((page, layer));
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
            true
        } else {
            false
        }
    }
}

fn draw_header(w: &mut PageWriter<'_>, data: &DocumentData) -> Result<(), RenderError> {
    w.y = 282.0;
    w.text(&data.company.name, 13.0, MARGIN, true);
    w.down(6.0);
    for line in &data.company.address_lines {
        w.text(line, 9.0, MARGIN, false);
        w.down(4.5);
    }
    w.text(
        &format!("GSTIN: {}  IEC: {}", data.company.gstin, data.company.iec),
        9.0,
        MARGIN,
        false,
    );
    w.down(4.5);
    if let Some(email) = &data.company.email {
        w.text(email, 9.0, MARGIN, false);
        w.down(4.5);
    }

    // title block, fixed position on the right
    w.layer.use_text(data.title.clone(), 14.0, Mm(118.0), Mm(282.0), &w.bold);
    w.layer.use_text(data.number.clone(), 11.0, Mm(118.0), Mm(274.5), &w.bold);
    w.layer.use_text(
        format!("Date: {}", data.date.format("%d %b %Y")),
        9.5,
        Mm(118.0),
        Mm(268.5),
        &w.font,
    );
    w.layer.use_text(
        format!("Currency: {}", data.currency.code()),
        9.5,
        Mm(118.0),
        Mm(263.5),
        &w.font,
    );

    let payload = serde_json::json!({
        "documentNumber": data.number,
        "date": data.date.format("%Y-%m-%d").to_string(),
        "amount": format!("{:.2}", data.headline_amount.amount()),
        "currency": data.currency.code(),
    })
    .to_string();
    qr::draw(&w.layer, &payload, 172.0, 238.0, 22.0)?;

    w.y = 258.0;
    w.rule(MARGIN, 168.0);
    w.down(8.0);
    Ok(())
}

fn draw_party(w: &mut PageWriter<'_>, data: &DocumentData) {
    let Some(party) = &data.party else {
        w.down(2.0);
        return;
    };
    w.ensure(30.0);
    w.text(&data.party_label, 11.0, MARGIN, true);
    w.down(6.0);
    w.text(&party.name, 10.0, MARGIN, false);
    w.down(5.0);
    for line in &party.address_lines {
        w.text(line, 9.0, MARGIN, false);
        w.down(4.5);
    }
    w.text(&party.country, 9.0, MARGIN, false);
    w.down(4.5);
    if let Some(contact) = &party.contact {
        w.text(contact, 9.0, MARGIN, false);
        w.down(4.5);
    }
    w.down(4.0);
}

fn draw_table_header(w: &mut PageWriter<'_>, packing: bool) {
    w.text("#", 9.0, 16.0, true);
    w.text("Description", 9.0, 24.0, true);
    if packing {
        w.text("Batch", 9.0, 92.0, true);
        w.text("Qty", 9.0, 118.0, true);
        w.text("Pkgs", 9.0, 138.0, true);
        w.text("Net kg", 9.0, 155.0, true);
        w.text("Gross kg", 9.0, 175.0, true);
    } else {
        w.text("HSN", 9.0, 96.0, true);
        w.text("Batch", 9.0, 114.0, true);
        w.text("Qty", 9.0, 140.0, true);
        w.text("Unit Price", 9.0, 156.0, true);
        w.text("Amount", 9.0, 178.0, true);
    }
    w.down(2.0);
    w.rule(MARGIN, RIGHT_EDGE);
    w.down(5.0);
}

fn draw_items(w: &mut PageWriter<'_>, data: &DocumentData) {
    if data.items.is_empty() {
        return;
    }
    let packing = data.document_type == DocumentType::PackingList;
    w.ensure(25.0);
    draw_table_header(w, packing);

    for (index, item) in data.items.iter().enumerate() {
        if w.ensure(ROW_HEIGHT + 2.0) {
            draw_table_header(w, packing);
        }
        w.text(&(index + 1).to_string(), 9.0, 16.0, false);
        w.text(&truncate(&item.description, 40), 9.0, 24.0, false);
        if packing {
            w.text(&batch_label(item), 9.0, 92.0, false);
            w.text(&item.quantity.to_string(), 9.0, 118.0, false);
            if let Some(packages) = item.packages {
                w.text(&packages.to_string(), 9.0, 138.0, false);
            }
            if let Some(net) = item.net_weight_kg {
                w.text(&net.to_string(), 9.0, 155.0, false);
            }
            if let Some(gross) = item.gross_weight_kg {
                w.text(&gross.to_string(), 9.0, 175.0, false);
            }
        } else {
            w.text(item.hsn_code.as_deref().unwrap_or("-"), 9.0, 96.0, false);
            w.text(&batch_label(item), 9.0, 114.0, false);
            w.text(&item.quantity.to_string(), 9.0, 140.0, false);
            if let Some(price) = item.unit_price {
                w.text(&price.to_string(), 9.0, 156.0, false);
            }
            if let Some(amount) = item.amount {
                w.text(&format!("{amount:.2}"), 9.0, 178.0, false);
            }
        }
        w.down(ROW_HEIGHT);
    }
    w.down(1.0);
    w.rule(MARGIN, RIGHT_EDGE);
    w.down(6.0);
}

fn draw_totals(w: &mut PageWriter<'_>, data: &DocumentData) {
    if data.totals.is_empty() {
        return;
    }
    w.ensure(data.totals.len() as f32 * 5.5 + 8.0);
    for line in &data.totals {
        let grand = matches!(line.kind, TotalKind::GrandTotal);
        if grand {
            w.rule(126.0, RIGHT_EDGE);
            w.down(4.5);
        }
        let label = match line.kind {
            TotalKind::Credit { .. } => format!("Less: {}", line.label),
            _ => line.label.clone(),
        };
        let amount = format_amount(data.currency, line.amount.amount());
        w.text(&label, 10.0, 126.0, grand);
        w.text(&amount, 10.0, 166.0, grand);
        w.down(5.5);
    }
    w.down(4.0);
}

fn draw_summary(w: &mut PageWriter<'_>, data: &DocumentData) {
    if data.summary.is_empty() {
        return;
    }
    w.ensure(data.summary.len() as f32 * 5.5 + 6.0);
    for (label, value) in &data.summary {
        w.text(label, 10.0, MARGIN, true);
        w.text(value, 10.0, 70.0, false);
        w.down(5.5);
    }
    w.down(4.0);
}

fn draw_bank(w: &mut PageWriter<'_>, data: &DocumentData) {
    let Some(bank) = &data.bank else { return };
    w.ensure(32.0);
    w.text("Bank Details", 11.0, MARGIN, true);
    w.down(5.5);
    w.text(&bank.bank_name, 9.0, MARGIN, false);
    w.down(4.5);
    w.text(&format!("A/C: {}", bank.account_number), 9.0, MARGIN, false);
    w.down(4.5);
    w.text(
        &format!("SWIFT: {}  IFSC: {}", bank.swift_code, bank.ifsc_code),
        9.0,
        MARGIN,
        false,
    );
    w.down(4.5);
    if let Some(branch) = &bank.branch {
        w.text(branch, 9.0, MARGIN, false);
        w.down(4.5);
    }
    w.down(4.0);
}

fn draw_terms(w: &mut PageWriter<'_>, data: &DocumentData) {
    let Some(terms) = &data.terms else { return };
    let lines = wrap(terms, 95);
    w.ensure(lines.len() as f32 * 4.5 + 12.0);
    w.text("Terms", 11.0, MARGIN, true);
    w.down(5.5);
    for line in lines {
        w.text(&line, 9.0, MARGIN, false);
        w.down(4.5);
    }
    w.down(4.0);
}

fn draw_signature(w: &mut PageWriter<'_>, data: &DocumentData) {
    w.ensure(36.0);
    w.down(8.0);
    w.text(&format!("For {}", data.company.name), 10.0, 126.0, true);
    w.down(16.0);
    w.rule(126.0, RIGHT_EDGE);
    w.down(5.0);
    w.text("Authorised Signatory", 9.0, 126.0, false);
    w.down(6.0);
    w.text(
        &format!("Generated on {}", Utc::now().format("%d %b %Y %H:%M UTC")),
        7.5,
        MARGIN,
        false,
    );
}

fn stamp_pages(
    doc: &PdfDocumentReference,
    pages: &[(PdfPageIndex, PdfLayerIndex)],
    data: &DocumentData,
    options: &RenderOptions,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let total = pages.len();
    let watermark = options
        .watermark
        .clone()
        .unwrap_or_else(|| data.default_watermark.clone());

    for (index, (page, layer_index)) in pages.iter().enumerate() {
        let layer = doc.get_page(*page).get_layer(*layer_index);

        if !watermark.is_empty() {
            // sized so longer labels still fit the page diagonal-ish band
            let size = (420.0 / watermark.chars().count().max(6) as f32).min(58.0);
            layer.set_fill_color(Color::Greyscale(Greyscale::new(0.88, None)));
            layer.use_text(watermark.clone(), size, Mm(35.0), Mm(150.0), bold);
            layer.set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
        }

        let mut footer = Vec::new();
        if options.include_page_numbers {
            footer.push(format!("Page {} of {}", index + 1, total));
        }
        if options.include_version {
            footer.push(format!("Version {}", options.version));
        }
        if !footer.is_empty() {
            layer.use_text(footer.join("  |  "), 8.0, Mm(MARGIN), Mm(10.0), font);
        }
        layer.use_text(data.number.clone(), 8.0, Mm(168.0), Mm(10.0), font);
    }
}

fn batch_label(item: &ItemRow) -> String {
    match (&item.batch_number, item.expiry_date) {
        (Some(batch), Some(expiry)) => format!("{batch} ({})", expiry.format("%m/%Y")),
        (Some(batch), None) => batch.clone(),
        _ => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source in text.lines() {
        let mut current = String::new();
        for word in source.split_whitespace() {
            if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}
