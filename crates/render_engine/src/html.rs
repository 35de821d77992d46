//! HTML output
//!
//! Self-contained single file with inline CSS, suitable for emailing or a
//! browser print preview. All entity-sourced text is escaped. Page numbers
//! are a print concern and are left to the browser; the watermark is a CSS
//! overlay.

use std::fmt::Write as _;
use std::path::Path;

use domain_documents::DocumentType;

use crate::error::RenderError;
use crate::model::{format_amount, DocumentData, TotalKind};
use crate::options::RenderOptions;

pub(crate) fn render(
    data: &DocumentData,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), RenderError> {
    std::fs::write(path, build(data, options))?;
    Ok(())
}

fn build(data: &DocumentData, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let title = esc(&data.title);
    let number = esc(&data.number);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title} {number}</title>");
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");

    let watermark = options
        .watermark
        .clone()
        .unwrap_or_else(|| data.default_watermark.clone());
    if !watermark.is_empty() {
        let _ = writeln!(out, "<div class=\"watermark\">{}</div>", esc(&watermark));
    }

    out.push_str("<header>\n<div class=\"company\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", esc(&data.company.name));
    for line in &data.company.address_lines {
        let _ = writeln!(out, "<div>{}</div>", esc(line));
    }
    let _ = writeln!(
        out,
        "<div>GSTIN: {}&ensp;IEC: {}</div>",
        esc(&data.company.gstin),
        esc(&data.company.iec)
    );
    out.push_str("</div>\n<div class=\"doc-meta\">\n");
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(out, "<div class=\"number\">{number}</div>");
    let _ = writeln!(out, "<div>Date: {}</div>", data.date.format("%d %b %Y"));
    let _ = writeln!(out, "<div>Currency: {}</div>", data.currency.code());
    out.push_str("</div>\n</header>\n");

    if let Some(party) = &data.party {
        out.push_str("<section class=\"party\">\n");
        let _ = writeln!(out, "<h3>{}</h3>", esc(&data.party_label));
        let _ = writeln!(out, "<div><strong>{}</strong></div>", esc(&party.name));
        for line in &party.address_lines {
            let _ = writeln!(out, "<div>{}</div>", esc(line));
        }
        let _ = writeln!(out, "<div>{}</div>", esc(&party.country));
        out.push_str("</section>\n");
    }

    if !data.items.is_empty() {
        if data.document_type == DocumentType::PackingList {
            write_packing_table(&mut out, data);
        } else {
            write_priced_table(&mut out, data);
        }
    }

    if !data.totals.is_empty() {
        out.push_str("<table class=\"totals\">\n");
        for line in &data.totals {
            let grand = matches!(line.kind, TotalKind::GrandTotal);
            let label = match line.kind {
                TotalKind::Credit { .. } => format!("Less: {}", line.label),
                _ => line.label.clone(),
            };
            let _ = writeln!(
                out,
                "<tr{}><td>{}</td><td class=\"num\">{}</td></tr>",
                if grand { " class=\"grand\"" } else { "" },
                esc(&label),
                format_amount(data.currency, line.amount.amount())
            );
        }
        out.push_str("</table>\n");
    }

    if !data.summary.is_empty() {
        out.push_str("<table class=\"summary\">\n");
        for (label, value) in &data.summary {
            let _ = writeln!(
                out,
                "<tr><th>{}</th><td>{}</td></tr>",
                esc(label),
                esc(value)
            );
        }
        out.push_str("</table>\n");
    }

    if let Some(bank) = &data.bank {
        out.push_str("<section class=\"bank\">\n<h3>Bank Details</h3>\n");
        let _ = writeln!(out, "<div>{}</div>", esc(&bank.bank_name));
        let _ = writeln!(out, "<div>A/C: {}</div>", esc(&bank.account_number));
        let _ = writeln!(
            out,
            "<div>SWIFT: {}&ensp;IFSC: {}</div>",
            esc(&bank.swift_code),
            esc(&bank.ifsc_code)
        );
        if let Some(branch) = &bank.branch {
            let _ = writeln!(out, "<div>{}</div>", esc(branch));
        }
        out.push_str("</section>\n");
    }

    if let Some(terms) = &data.terms {
        out.push_str("<section class=\"terms\">\n<h3>Terms</h3>\n");
        let _ = writeln!(out, "<p>{}</p>", esc(terms));
        out.push_str("</section>\n");
    }

    if options.signature_placeholder {
        out.push_str("<div class=\"signature\">\n");
        let _ = writeln!(out, "<div>For {}</div>", esc(&data.company.name));
        out.push_str("<div class=\"sign-line\"></div>\n<div>Authorised Signatory</div>\n</div>\n");
    }

    out.push_str("<footer>");
    if options.include_version {
        let _ = write!(out, "Version {} &middot; ", options.version);
    }
    let _ = write!(out, "{number}");
    out.push_str("</footer>\n</body>\n</html>\n");
    out
}

fn write_priced_table(out: &mut String, data: &DocumentData) {
    out.push_str(
        "<table class=\"items\">\n<tr><th>#</th><th>Description</th><th>HSN</th>\
         <th>Batch</th><th class=\"num\">Qty</th><th class=\"num\">Unit Price</th>\
         <th class=\"num\">Amount</th></tr>\n",
    );
    for (index, item) in data.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            index + 1,
            esc(&item.description),
            esc(item.hsn_code.as_deref().unwrap_or("-")),
            esc(item.batch_number.as_deref().unwrap_or("-")),
            item.quantity,
            item.unit_price.map(|p| p.to_string()).unwrap_or_default(),
            item.amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
        );
    }
    out.push_str("</table>\n");
}

fn write_packing_table(out: &mut String, data: &DocumentData) {
    out.push_str(
        "<table class=\"items\">\n<tr><th>#</th><th>Description</th><th>Batch</th>\
         <th class=\"num\">Qty</th><th class=\"num\">Packages</th>\
         <th class=\"num\">Net kg</th><th class=\"num\">Gross kg</th></tr>\n",
    );
    for (index, item) in data.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            index + 1,
            esc(&item.description),
            esc(item.batch_number.as_deref().unwrap_or("-")),
            item.quantity,
            item.packages.unwrap_or(0),
            item.net_weight_kg.unwrap_or_default(),
            item.gross_weight_kg.unwrap_or_default(),
        );
    }
    out.push_str("</table>\n");
}

fn esc(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = "<style>\n\
body { font-family: Helvetica, Arial, sans-serif; font-size: 13px; color: #222; \
max-width: 820px; margin: 2em auto; position: relative; }\n\
header { display: flex; justify-content: space-between; border-bottom: 2px solid #333; \
padding-bottom: 1em; }\n\
h1 { font-size: 20px; margin: 0; } h2 { margin: 0 0 0.3em 0; } h3 { margin: 1.2em 0 0.4em 0; }\n\
.doc-meta { text-align: right; } .doc-meta .number { font-weight: bold; }\n\
table { border-collapse: collapse; margin-top: 1em; }\n\
.items { width: 100%; } .items th, .items td { border: 1px solid #999; padding: 4px 6px; \
text-align: left; }\n\
.num { text-align: right !important; }\n\
.totals { margin-left: auto; min-width: 280px; } .totals td { padding: 3px 6px; }\n\
.totals .grand td { font-weight: bold; border-top: 1px solid #333; }\n\
.summary th { text-align: left; padding-right: 1em; }\n\
.watermark { position: fixed; top: 40%; left: 0; right: 0; text-align: center; \
font-size: 90px; color: rgba(0,0,0,0.07); transform: rotate(-24deg); \
pointer-events: none; z-index: 0; }\n\
.signature { margin-top: 3em; margin-left: auto; width: 240px; text-align: center; }\n\
.sign-line { border-bottom: 1px solid #333; height: 3em; margin-bottom: 0.4em; }\n\
footer { margin-top: 2em; font-size: 11px; color: #777; border-top: 1px solid #ccc; \
padding-top: 0.5em; }\n\
</style>\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping() {
        assert_eq!(esc("A & B <Pharma>"), "A &amp; B &lt;Pharma&gt;");
        assert_eq!(esc("plain"), "plain");
    }
}
