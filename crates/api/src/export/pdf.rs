//! Paginated table rendering via `pdf-writer`, using the built-in Helvetica
//! Type1 font so no font files are embedded.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::Table;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 18.0;
const FONT_SIZE: f32 = 9.0;
const TITLE_FONT_SIZE: f32 = 14.0;
/// Rough Helvetica advance width as a fraction of the font size.
const CHAR_WIDTH: f32 = 0.52;
const FONT: Name<'static> = Name(b"F1");

/// Builds a single-font PDF page by page.
struct Document {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    next_id: i32,
    page_refs: Vec<Ref>,
}

impl Document {
    fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            next_id: 4,
            page_refs: Vec::new(),
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn add_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
                .contents(content_id);
            page.resources().fonts().pair(FONT, self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_refs.iter().copied())
            .count(count);
        self.pdf.finish()
    }
}

/// Encode text for a WinAnsi Type1 font. Characters outside Latin-1 become `?`.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Cut `text` so it fits in `width` points at `size`.
fn fit(text: &str, width: f32, size: f32) -> String {
    let max_chars = ((width - 6.0) / (size * CHAR_WIDTH)).floor().max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    cut.push_str("..");
    cut
}

fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
    content.begin_text();
    content.set_font(FONT, size);
    content.next_line(x, y);
    content.show(Str(&encode(text)));
    content.end_text();
}

fn draw_row(content: &mut Content, y: f32, widths: &[f32], cells: &[String], shade: Option<f32>) {
    let total: f32 = widths.iter().sum();
    if let Some(gray) = shade {
        content.save_state();
        content.set_fill_gray(gray);
        content.rect(MARGIN, y, total, ROW_HEIGHT);
        content.fill_nonzero();
        content.restore_state();
    }

    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(widths) {
        draw_text(content, x + 3.0, y + 5.0, FONT_SIZE, &fit(cell, *width, FONT_SIZE));
        content.save_state();
        content.set_stroke_gray(0.65);
        content.rect(x, y, *width, ROW_HEIGHT);
        content.stroke();
        content.restore_state();
        x += width;
    }
}

/// Column widths proportional to content, scaled down to the printable width.
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
    let mut widths: Vec<f32> = headers
        .iter()
        .map(|h| h.chars().count() as f32 * FONT_SIZE * CHAR_WIDTH + 8.0)
        .collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = width.max(cell.chars().count() as f32 * FONT_SIZE * CHAR_WIDTH + 8.0);
        }
    }

    let available = PAGE_WIDTH - 2.0 * MARGIN;
    let total: f32 = widths.iter().sum();
    if total > available {
        let scale = available / total;
        widths.iter_mut().for_each(|w| *w *= scale);
    }
    widths
}

/// Render `table` as a PDF, repeating the header row on every page.
///
/// `footer` lines (totals, balance) are printed after the last row.
pub fn render(table: &Table, footer: &[String]) -> Vec<u8> {
    layout(table, footer).finish()
}

fn layout(table: &Table, footer: &[String]) -> Document {
    let headers: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.display()).collect())
        .collect();
    let widths = column_widths(&headers, &rows);

    let mut doc = Document::new();
    let mut remaining: &[Vec<String>] = &rows;
    let mut page_number = 1;

    loop {
        let mut content = Content::new();
        draw_text(
            &mut content,
            MARGIN,
            PAGE_HEIGHT - MARGIN,
            TITLE_FONT_SIZE,
            &table.title,
        );
        draw_text(
            &mut content,
            PAGE_WIDTH - MARGIN - 50.0,
            MARGIN / 2.0,
            FONT_SIZE,
            &format!("Page {page_number}"),
        );

        let mut y = PAGE_HEIGHT - MARGIN - 30.0;
        draw_row(&mut content, y, &widths, &headers, Some(0.85));
        y -= ROW_HEIGHT;

        let mut consumed = 0;
        for (i, row) in remaining.iter().enumerate() {
            if y < MARGIN {
                break;
            }
            let shade = (i % 2 == 1).then_some(0.96);
            draw_row(&mut content, y, &widths, row, shade);
            y -= ROW_HEIGHT;
            consumed += 1;
        }
        remaining = &remaining[consumed..];

        let footer_height = footer.len() as f32 * ROW_HEIGHT;
        if remaining.is_empty() && (footer.is_empty() || y - footer_height >= MARGIN) {
            for line in footer {
                y -= 4.0;
                draw_text(&mut content, MARGIN, y, FONT_SIZE + 1.0, line);
                y -= ROW_HEIGHT - 4.0;
            }
            doc.add_page(content);
            break;
        }

        doc.add_page(content);
        page_number += 1;
        if remaining.is_empty() {
            // Footer did not fit; it gets a page of its own.
            let mut content = Content::new();
            let mut y = PAGE_HEIGHT - MARGIN;
            for line in footer {
                draw_text(&mut content, MARGIN, y, FONT_SIZE + 1.0, line);
                y -= ROW_HEIGHT;
            }
            doc.add_page(content);
            break;
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Cell;

    fn table(rows: usize) -> Table {
        let mut table = Table::new("Lines", "Cuenta corriente", vec!["Date", "Concept", "Amount"]);
        for i in 0..rows {
            table.push(vec![
                Cell::text("2026-03-01"),
                Cell::text(format!("Arriendo línea {i}")),
                Cell::Number(i as f64),
            ]);
        }
        table
    }

    #[test]
    fn produces_a_pdf() {
        let bytes = render(&table(3), &["Balance: 100.00".into()]);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn long_tables_span_several_pages() {
        assert_eq!(layout(&table(5), &[]).page_refs.len(), 1);
        assert!(layout(&table(120), &[]).page_refs.len() >= 3);
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        assert_eq!(encode("Año €"), vec![b'A', 0xF1, b'o', b' ', b'?']);
    }

    #[test]
    fn long_cells_are_shortened() {
        let cut = fit("a very long description of a delivery", 40.0, FONT_SIZE);
        assert!(cut.ends_with(".."));
        assert!(cut.chars().count() < 20);
    }
}
