//! Line planning.
//!
//! Blocks are placed top to bottom on fixed-height lines and split across
//! pages. Body text is wrapped to a column count derived from the text width.

use stroke_risk_core::export::{Block, ReportDocument};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Mean Helvetica advance in em, for sizing wrap columns.
const AVG_GLYPH_EM: f32 = 0.52;

/// Page geometry in millimetres, type size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    /// Text stops this far above the bottom edge
    pub margin_bottom_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
}

impl PageSetup {
    /// A4 portrait, 10mm side and top margins, 20mm bottom margin, 12pt type on 10mm lines.
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_right_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 20.0,
            font_size_pt: 12.0,
            line_height_mm: 10.0,
        }
    }

    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Characters per wrapped line.
    pub fn wrap_columns(&self) -> usize {
        let columns = self.text_width_mm() * PT_PER_MM / (self.font_size_pt * AVG_GLYPH_EM);
        (columns as usize).max(1)
    }

    /// Lines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        ((self.height_mm - self.margin_top_mm - self.margin_bottom_mm) / self.line_height_mm)
            as usize
    }

    /// True when the geometry leaves room for at least one line.
    pub fn is_usable(&self) -> bool {
        let values = [
            self.width_mm,
            self.height_mm,
            self.margin_left_mm,
            self.margin_right_mm,
            self.margin_top_mm,
            self.margin_bottom_mm,
            self.font_size_pt,
            self.line_height_mm,
        ];

        values.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.font_size_pt > 0.0
            && self.line_height_mm > 0.0
            && self.text_width_mm() > 0.0
            && self.lines_per_page() >= 1
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One line of text with its baseline origin, measured from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub weight: Weight,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedPage {
    pub lines: Vec<PlacedLine>,
}

/// Restrict text to printable Latin-1, replacing anything else with `?`.
pub fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Place every block. Always yields at least one page.
pub fn plan(document: &ReportDocument, setup: &PageSetup) -> Vec<PlannedPage> {
    let mut cursor = Cursor::new(setup);

    for block in &document.blocks {
        match block {
            Block::Title(text) | Block::Line(text) => cursor.write(Weight::Regular, text),
            Block::Paragraph(text) => {
                for line in text.split('\n') {
                    cursor.write(Weight::Regular, line);
                }
            }
            Block::Heading(text) => cursor.write(Weight::Bold, text),
            Block::Bullet(text) => cursor.write(Weight::Regular, &format!("- {}", text)),
            Block::Spacer(fraction) => cursor.skip(*fraction),
        }
    }

    cursor.finish()
}

struct Cursor<'a> {
    setup: &'a PageSetup,
    pages: Vec<PlannedPage>,
    current: PlannedPage,
    /// Distance from the page top to the top of the next line
    top_mm: f32,
}

impl<'a> Cursor<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            current: PlannedPage::default(),
            top_mm: setup.margin_top_mm,
        }
    }

    fn write(&mut self, weight: Weight, text: &str) {
        let text = to_latin1(text);
        for line in textwrap::wrap(&text, self.setup.wrap_columns()) {
            self.place(weight, line.into_owned());
        }
    }

    fn place(&mut self, weight: Weight, text: String) {
        let setup = self.setup;
        if self.top_mm + setup.line_height_mm > setup.height_mm - setup.margin_bottom_mm {
            let page = std::mem::take(&mut self.current);
            self.pages.push(page);
            self.top_mm = setup.margin_top_mm;
        }

        // Baseline sits mid-line, lowered by 0.3em.
        let font_size_mm = setup.font_size_pt / PT_PER_MM;
        let baseline_from_top = self.top_mm + setup.line_height_mm / 2.0 + 0.3 * font_size_mm;
        self.current.lines.push(PlacedLine {
            weight,
            x_mm: setup.margin_left_mm,
            baseline_mm: setup.height_mm - baseline_from_top,
            text,
        });
        self.top_mm += setup.line_height_mm;
    }

    fn skip(&mut self, fraction: f32) {
        if fraction.is_finite() && fraction > 0.0 {
            self.top_mm += fraction * self.setup.line_height_mm;
        }
    }

    fn finish(mut self) -> Vec<PlannedPage> {
        self.pages.push(self.current);
        self.pages
    }
}
