//! Excel output
//!
//! Unlike the PDF, which is a frozen snapshot, the worksheet is live: line
//! amounts are `=E{row}*F{row}` formulas and the totals section recomputes
//! from them, so quantity or price edits flow through in the spreadsheet.
//! The authoritative figures remain the ones stored on the entity.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Formula, Workbook};

use domain_documents::DocumentType;

use crate::error::RenderError;
use crate::model::{DocumentData, TotalKind};
use crate::options::RenderOptions;

pub(crate) fn render(
    data: &DocumentData,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), RenderError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(data.document_type))?;

    sheet.set_column_width(0, 4)?;
    sheet.set_column_width(1, 42)?;
    sheet.set_column_width(2, 12)?;
    sheet.set_column_width(3, 16)?;
    sheet.set_column_width(4, 10)?;
    sheet.set_column_width(5, 12)?;
    sheet.set_column_width(6, 14)?;

    let mut row: u32 = 0;
    sheet.write_string_with_format(row, 0, &data.company.name, &bold)?;
    row += 1;
    for line in &data.company.address_lines {
        sheet.write_string(row, 0, line)?;
        row += 1;
    }
    sheet.write_string(
        row,
        0,
        &format!("GSTIN: {}  IEC: {}", data.company.gstin, data.company.iec),
    )?;
    row += 2;

    sheet.write_string_with_format(row, 0, &data.title, &bold)?;
    sheet.write_string_with_format(row, 1, &data.number, &bold)?;
    row += 1;
    sheet.write_string(row, 0, "Date")?;
    sheet.write_string(row, 1, &data.date.format("%Y-%m-%d").to_string())?;
    row += 1;
    sheet.write_string(row, 0, "Currency")?;
    sheet.write_string(row, 1, data.currency.code())?;
    row += 2;

    if let Some(party) = &data.party {
        sheet.write_string_with_format(row, 0, &data.party_label, &bold)?;
        row += 1;
        sheet.write_string(row, 0, &party.name)?;
        row += 1;
        for line in &party.address_lines {
            sheet.write_string(row, 0, line)?;
            row += 1;
        }
        sheet.write_string(row, 0, &party.country)?;
        row += 2;
    }

    let packing = data.document_type == DocumentType::PackingList;
    row = if packing {
        write_packing_items(sheet, data, &bold, row)?
    } else {
        write_priced_items(sheet, data, &bold, row)?
    };
    row += 1;

    if let Some(bank) = &data.bank {
        sheet.write_string_with_format(row, 0, "Bank Details", &bold)?;
        row += 1;
        sheet.write_string(row, 0, &bank.bank_name)?;
        row += 1;
        sheet.write_string(row, 0, &format!("A/C: {}", bank.account_number))?;
        row += 1;
        sheet.write_string(
            row,
            0,
            &format!("SWIFT: {}  IFSC: {}", bank.swift_code, bank.ifsc_code),
        )?;
        row += 2;
    }

    if let Some(terms) = &data.terms {
        sheet.write_string_with_format(row, 0, "Terms", &bold)?;
        sheet.write_string(row, 1, terms)?;
        row += 2;
    }

    if options.include_version {
        sheet.write_string(row, 0, &format!("Version {}", options.version))?;
    }

    workbook.save(path)?;
    Ok(())
}

fn sheet_name(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Invoice => "Invoice",
        DocumentType::PackingList => "Packing List",
        DocumentType::PurchaseOrder => "Purchase Order",
    }
}

/// Items plus the formula-based totals section; returns the next free row
fn write_priced_items(
    sheet: &mut rust_xlsxwriter::Worksheet,
    data: &DocumentData,
    bold: &Format,
    mut row: u32,
) -> Result<u32, RenderError> {
    for (col, header) in ["#", "Description", "HSN", "Batch", "Qty", "Unit Price", "Amount"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(row, col as u16, *header, bold)?;
    }
    row += 1;

    let first_item_row = row;
    for (index, item) in data.items.iter().enumerate() {
        sheet.write_number(row, 0, (index + 1) as f64)?;
        sheet.write_string(row, 1, &item.description)?;
        if let Some(hsn) = &item.hsn_code {
            sheet.write_string(row, 2, hsn)?;
        }
        if let Some(batch) = &item.batch_number {
            sheet.write_string(row, 3, batch)?;
        }
        sheet.write_number(row, 4, item.quantity.to_f64().unwrap_or(0.0))?;
        if let Some(price) = item.unit_price {
            sheet.write_number(row, 5, price.to_f64().unwrap_or(0.0))?;
        }
        // excel rows are 1-based in formulas
        let cell_row = row + 1;
        sheet.write_formula(row, 6, Formula::new(format!("=E{cell_row}*F{cell_row}")))?;
        row += 1;
    }
    let last_item_row = row;
    row += 1;

    let mut subtotal_cell: Option<u32> = None;
    let mut charge_cells: Vec<u32> = Vec::new();
    let mut credit_cells: Vec<u32> = Vec::new();

    for line in &data.totals {
        let cell_row = row + 1;
        let grand = matches!(line.kind, TotalKind::GrandTotal);
        let label = match line.kind {
            TotalKind::Credit { .. } => format!("Less: {}", line.label),
            _ => line.label.clone(),
        };
        if grand {
            sheet.write_string_with_format(row, 5, &label, bold)?;
        } else {
            sheet.write_string(row, 5, &label)?;
        }

        match line.kind {
            TotalKind::Subtotal => {
                if data.items.is_empty() {
                    sheet.write_number(row, 6, line.amount.amount().to_f64().unwrap_or(0.0))?;
                } else {
                    sheet.write_formula(
                        row,
                        6,
                        Formula::new(format!("=SUM(G{}:G{})", first_item_row + 1, last_item_row)),
                    )?;
                }
                subtotal_cell = Some(cell_row);
            }
            TotalKind::Charge { rate } | TotalKind::Credit { rate } => {
                match (subtotal_cell, rate) {
                    (Some(sub), Some(rate)) => {
                        sheet.write_formula(
                            row,
                            6,
                            Formula::new(format!("=ROUND(G{sub}*{rate},2)")),
                        )?;
                    }
                    _ => {
                        sheet.write_number(
                            row,
                            6,
                            line.amount.amount().to_f64().unwrap_or(0.0),
                        )?;
                    }
                }
                if matches!(line.kind, TotalKind::Charge { .. }) {
                    charge_cells.push(cell_row);
                } else {
                    credit_cells.push(cell_row);
                }
            }
            TotalKind::GrandTotal => match subtotal_cell {
                Some(sub) => {
                    let mut formula = format!("=G{sub}");
                    for cell in &charge_cells {
                        formula.push_str(&format!("+G{cell}"));
                    }
                    for cell in &credit_cells {
                        formula.push_str(&format!("-G{cell}"));
                    }
                    sheet.write_formula(row, 6, Formula::new(formula))?;
                }
                None => {
                    sheet.write_number(row, 6, line.amount.amount().to_f64().unwrap_or(0.0))?;
                }
            },
        }
        row += 1;
    }
    Ok(row)
}

/// Packing table with SUM totals for packages and weights
fn write_packing_items(
    sheet: &mut rust_xlsxwriter::Worksheet,
    data: &DocumentData,
    bold: &Format,
    mut row: u32,
) -> Result<u32, RenderError> {
    for (col, header) in ["#", "Description", "Batch", "Qty", "Packages", "Net kg", "Gross kg"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(row, col as u16, *header, bold)?;
    }
    row += 1;

    let first_item_row = row;
    for (index, item) in data.items.iter().enumerate() {
        sheet.write_number(row, 0, (index + 1) as f64)?;
        sheet.write_string(row, 1, &item.description)?;
        if let Some(batch) = &item.batch_number {
            sheet.write_string(row, 2, batch)?;
        }
        sheet.write_number(row, 3, item.quantity.to_f64().unwrap_or(0.0))?;
        sheet.write_number(row, 4, f64::from(item.packages.unwrap_or(0)))?;
        sheet.write_number(
            row,
            5,
            item.net_weight_kg.and_then(|w| w.to_f64()).unwrap_or(0.0),
        )?;
        sheet.write_number(
            row,
            6,
            item.gross_weight_kg.and_then(|w| w.to_f64()).unwrap_or(0.0),
        )?;
        row += 1;
    }

    if !data.items.is_empty() {
        let last_item_row = row;
        sheet.write_string_with_format(row, 1, "Total", bold)?;
        for col in [4u16, 5, 6] {
            let letter = (b'A' + col as u8) as char;
            sheet.write_formula(
                row,
                col,
                Formula::new(format!(
                    "=SUM({letter}{}:{letter}{})",
                    first_item_row + 1,
                    last_item_row
                )),
            )?;
        }
        row += 1;
    }

    for (label, value) in &data.summary {
        // package and weight totals are already live SUM cells above
        if label.starts_with("Total ") {
            continue;
        }
        sheet.write_string(row, 0, label)?;
        sheet.write_string(row, 1, value)?;
        row += 1;
    }
    Ok(row)
}
