//! `.xlsx` rendering via `rust_xlsxwriter`.

use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet, XlsxError};

use super::{Cell, Table};

const HEADER_ROW: u32 = 2;
const MIN_COLUMN_WIDTH: usize = 8;
const MAX_COLUMN_WIDTH: usize = 60;

/// Render each table onto its own worksheet and return the workbook bytes.
pub fn render(tables: &[Table]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14);
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    let text_format = Format::new().set_border(FormatBorder::Thin);
    let number_format = Format::new()
        .set_num_format("#,##0.00")
        .set_border(FormatBorder::Thin);

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.sheet_name)?;
        worksheet.write_with_format(0, 0, table.title.as_str(), &title_format)?;

        let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_with_format(HEADER_ROW, col as u16, *header, &header_format)?;
        }
        worksheet.set_freeze_panes(HEADER_ROW + 1, 0)?;

        for (i, row) in table.rows.iter().enumerate() {
            let row_index = HEADER_ROW + 1 + i as u32;
            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_index, col as u16, cell, &text_format, &number_format)?;
                if let Some(width) = widths.get_mut(col) {
                    *width = (*width).max(cell.display().chars().count());
                }
            }
        }

        for (col, width) in widths.iter().enumerate() {
            let width = (*width).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
            worksheet.set_column_width(col as u16, width as f64 + 2.0)?;
        }
    }

    workbook.save_to_buffer()
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    text_format: &Format,
    number_format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(s) => {
            worksheet.write_with_format(row, col, s.as_str(), text_format)?;
        }
        Cell::Number(_) | Cell::Money(_) => {
            let value = cell.as_f64().unwrap_or_default();
            worksheet.write_with_format(row, col, value, number_format)?;
        }
        Cell::Empty => {
            worksheet.write_blank(row, col, text_format)?;
        }
    }
    Ok(())
}
