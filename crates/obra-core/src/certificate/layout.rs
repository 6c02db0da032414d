//! Page layout for progress certificates.
//!
//! Everything is set in Courier, so column widths are counted in characters
//! and a line's horizontal extent is `chars * size * 0.6`.

use crate::certificate::format::{format_currency, format_date, format_number, format_percent};
use crate::certificate::wrap::{chunk_chars, wrap_words, DESCRIPTION_WIDTH, SECTION_WIDTH};
use crate::certificate::{Certificate, CertificateTotals};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 40.0;
const FOOTER_Y: f32 = 24.0;

const TITLE_SIZE: f32 = 14.0;
const HEADING_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
const TABLE_SIZE: f32 = 7.0;
const LINE_SPACING: f32 = 1.3;

const UNIT_WIDTH: usize = 5;
const QUANTITY_WIDTH: usize = 10;
const PRICE_WIDTH: usize = 15;
const PROGRESS_WIDTH: usize = 8;
const SUBTOTAL_WIDTH: usize = 16;
/// Seven columns plus one space between each.
pub const TABLE_WIDTH: usize = SECTION_WIDTH
    + DESCRIPTION_WIDTH
    + UNIT_WIDTH
    + QUANTITY_WIDTH
    + PRICE_WIDTH
    + PROGRESS_WIDTH
    + SUBTOTAL_WIDTH
    + 6;
/// Wrap width for free text in the detail blocks.
const DETAIL_WIDTH: usize = 90;

pub const TITLE: &str = "CERTIFICADO DE AVANCE DE OBRA";

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub pages: Vec<Page>,
}

impl Layout {
    /// All text on a page, top to bottom, for inspection.
    pub fn page_text(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|p| p.runs.iter().map(|r| r.text.as_str()).collect())
            .unwrap_or_default()
    }
}

type Line = (String, f32, bool);

/// Places lines top to bottom, breaking to a new page whenever the next
/// line would cross the bottom margin. Lines set with `repeat_on_break`
/// open every page started after that.
struct PageBuilder {
    pages: Vec<Page>,
    current: Page,
    y: f32,
    repeated: Vec<Line>,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::default(),
            y: PAGE_HEIGHT - MARGIN,
            repeated: Vec::new(),
        }
    }

    fn line(&mut self, text: impl Into<String>, size: f32, bold: bool) {
        if !self.fits(1, size) {
            self.break_page();
        }
        self.place(text.into(), size, bold);
    }

    fn place(&mut self, text: String, size: f32, bold: bool) {
        self.y -= size;
        self.current.runs.push(TextRun {
            x: MARGIN,
            y: self.y,
            size,
            bold,
            text,
        });
        self.y -= size * (LINE_SPACING - 1.0);
    }

    fn gap(&mut self, size: f32) {
        self.y -= size * LINE_SPACING;
    }

    fn fits(&self, lines: usize, size: f32) -> bool {
        self.y - lines as f32 * size * LINE_SPACING >= MARGIN
    }

    /// Lines of `size` a fresh page holds below the repeated lines.
    fn page_capacity(&self, size: f32) -> usize {
        let repeated: f32 = self.repeated.iter().map(|(_, s, _)| s * LINE_SPACING).sum();
        ((PAGE_HEIGHT - 2.0 * MARGIN - repeated) / (size * LINE_SPACING)) as usize
    }

    fn repeat_on_break(&mut self, lines: Vec<Line>) {
        for (text, size, bold) in &lines {
            self.line(text.clone(), *size, *bold);
        }
        self.repeated = lines;
    }

    fn close_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn break_page(&mut self) {
        self.close_page();
        for (text, size, bold) in self.repeated.clone() {
            self.place(text, size, bold);
        }
    }

    /// Close the last page and stamp "Página N de M" on every page.
    fn finish(mut self) -> Layout {
        if !self.current.runs.is_empty() || self.pages.is_empty() {
            self.close_page();
        }
        let total = self.pages.len();
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.runs.push(TextRun {
                x: MARGIN,
                y: FOOTER_Y,
                size: TABLE_SIZE,
                bold: false,
                text: format!("Página {} de {}", i + 1, total),
            });
        }
        Layout { pages: self.pages }
    }
}

fn table_line(cols: [&str; 7]) -> String {
    format!(
        "{:<sw$} {:<dw$} {:<uw$} {:>qw$} {:>pw$} {:>gw$} {:>tw$}",
        cols[0],
        cols[1],
        cols[2],
        cols[3],
        cols[4],
        cols[5],
        cols[6],
        sw = SECTION_WIDTH,
        dw = DESCRIPTION_WIDTH,
        uw = UNIT_WIDTH,
        qw = QUANTITY_WIDTH,
        pw = PRICE_WIDTH,
        gw = PROGRESS_WIDTH,
        tw = SUBTOTAL_WIDTH,
    )
}

fn table_header() -> Vec<Line> {
    vec![
        (
            table_line([
                "Sección",
                "Descripción",
                "Unid.",
                "Cantidad",
                "Precio unit.",
                "Avance",
                "Subtotal",
            ]),
            TABLE_SIZE,
            true,
        ),
        ("-".repeat(TABLE_WIDTH), TABLE_SIZE, false),
    ]
}

fn labeled(builder: &mut PageBuilder, label: &str, value: &str) {
    let lines = wrap_words(value, DETAIL_WIDTH);
    let mut lines = lines.iter();
    builder.line(
        format!("{label}: {}", lines.next().map(String::as_str).unwrap_or("")),
        BODY_SIZE,
        false,
    );
    let indent = " ".repeat(label.chars().count() + 2);
    for rest in lines {
        builder.line(format!("{indent}{rest}"), BODY_SIZE, false);
    }
}

/// Lay out the whole certificate. The table header repeats at the top of
/// each continuation page. A row only splits across pages when it is taller
/// than a whole page.
pub fn layout_certificate(cert: &Certificate, totals: &CertificateTotals) -> Layout {
    let mut b = PageBuilder::new();
    let issued = format_date(&cert.issued_at);

    b.line(TITLE, TITLE_SIZE, true);
    b.line(format!("Fecha: {issued}"), BODY_SIZE, false);
    b.gap(BODY_SIZE);

    b.line("DATOS DEL PROYECTO", HEADING_SIZE, true);
    labeled(&mut b, "Proyecto", &cert.project.name);
    labeled(&mut b, "Nº de proyecto", &cert.project.project_number);
    labeled(&mut b, "Dirección", &cert.project.address);
    labeled(&mut b, "Descripción", &cert.project.description);
    b.gap(BODY_SIZE);

    b.line("DATOS DEL CERTIFICADO", HEADING_SIZE, true);
    labeled(&mut b, "Versión", &cert.version);
    labeled(
        &mut b,
        "Monto del certificado",
        &format_currency(cert.certificate_amount),
    );
    labeled(&mut b, "Fecha de emisión", &issued);
    b.gap(BODY_SIZE);

    // header plus one row
    if !b.fits(3, TABLE_SIZE) {
        b.break_page();
    }
    b.repeat_on_break(table_header());

    for line in &totals.lines {
        let sections = chunk_chars(&line.item.section, SECTION_WIDTH);
        let descriptions = wrap_words(&line.item.description, DESCRIPTION_WIDTH);
        let units = chunk_chars(&line.item.unit, UNIT_WIDTH);
        let height = sections.len().max(descriptions.len()).max(units.len()).max(1);

        if !b.fits(height, TABLE_SIZE) && height <= b.page_capacity(TABLE_SIZE) {
            b.break_page();
        }

        let quantity = format_number(line.item.quantity);
        let price = format_currency(line.item.price);
        let progress = format_percent(line.progress);
        let subtotal = format_currency(line.subtotal);
        for i in 0..height {
            let cell = |v: &[String]| v.get(i).cloned().unwrap_or_default();
            let numbers = if i == 0 {
                [quantity.as_str(), price.as_str(), progress.as_str(), subtotal.as_str()]
            } else {
                ["", "", "", ""]
            };
            b.line(
                table_line([
                    &cell(&sections),
                    &cell(&descriptions),
                    &cell(&units),
                    numbers[0],
                    numbers[1],
                    numbers[2],
                    numbers[3],
                ]),
                TABLE_SIZE,
                false,
            );
        }
    }

    if !b.fits(2, TABLE_SIZE) {
        b.break_page();
    }
    b.line("-".repeat(TABLE_WIDTH), TABLE_SIZE, false);
    b.line(
        format!(
            "{:>width$}",
            format!("TOTAL: {}", format_currency(totals.total)),
            width = TABLE_WIDTH
        ),
        TABLE_SIZE,
        true,
    );

    b.finish()
}
