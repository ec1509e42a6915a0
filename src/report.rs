//! Layout of the multi-page transaction statement: a title, a header row, one bordered row per
//! transaction and a final row holding the running total.
//!
//! Layout and drawing are kept apart: `layout_table` only does the cursor bookkeeping and decides
//! where the page breaks fall, producing a `TablePlan`, which `render_plan` then draws page by page.

use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::configuration::ServiceConfiguration;
use crate::error::ContextError;
use crate::money::Amount;
use crate::pdf::{AppendMode, DrawingSurface, PageSize, PdfDocument, StandardFont};

pub const REPORT_TITLE: &str = "Extrato de Transações";
pub const REPORT_HEADER: [&str; 3] = ["Data", "Descrição", "Valor (R$)"];
pub const TOTAL_LABEL: &str = "Total";

/// The page geometry of the table, all the lengths are in points.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TableGeometry {
    pub page_size: PageSize,
    /// Both the bottom margin and the distance of the table from the left edge of the page.
    pub margin: f32,
    pub row_height: f32,
    /// Horizontal and vertical distance of the cell text from the cell border.
    pub cell_padding: f32,
    /// Added to the padding to lift the baseline of the cell text.
    pub baseline_offset: f32,
    /// Vertical distance between the title and the header row.
    pub title_gap: f32,
    pub column_widths: [f32; 3],
    pub title_font_size: f32,
    pub cell_font_size: f32,
}

impl Default for TableGeometry {
    fn default() -> Self {
        TableGeometry {
            page_size: PageSize::A4,
            margin: 40.0,
            row_height: 20.0,
            cell_padding: 4.0,
            baseline_offset: 3.0,
            title_gap: 30.0,
            column_widths: [100.0, 300.0, 100.0],
            title_font_size: 14.0,
            cell_font_size: 11.0,
        }
    }
}

impl TableGeometry {
    /// The cursor position at the top of every page.
    pub fn top(&self) -> f32 {
        self.page_size.height - self.margin
    }

    /// The lowest position the bottom border of a row may reach.
    pub fn bottom(&self) -> f32 {
        self.margin
    }

    /// The number of rows that fit on a page whose first row is drawn at the top.
    pub fn rows_per_page(&self) -> usize {
        ((self.top() - self.bottom()) / self.row_height).floor() as usize
    }
}

/// One transaction of the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: String,
    pub description: String,
    pub amount: Amount,
}

impl ReportRow {
    pub fn cells(&self) -> [String; 3] {
        [
            self.date.clone(),
            self.description.clone(),
            self.amount.to_brl_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Header,
    Data,
    Total,
}

impl RowStyle {
    pub fn font(self) -> StandardFont {
        match self {
            RowStyle::Header | RowStyle::Total => StandardFont::HelveticaBold,
            RowStyle::Data => StandardFont::Helvetica,
        }
    }
}

/// A row together with the position of its top border.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub y: f32,
    pub cells: [String; 3],
    pub style: RowStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTitle {
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub title: Option<PlacedTitle>,
    pub rows: Vec<PlacedRow>,
}

/// The outcome of the layout: the rows of every page and the total printed in the last row.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    pub pages: Vec<PagePlan>,
    pub total: Amount,
}

impl TablePlan {
    /// The number of rows across all the pages, header and total included.
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|page| page.rows.len()).sum()
    }
}

/// The vertical cursor walking down the pages.
struct Cursor<'a> {
    geometry: &'a TableGeometry,
    y: f32,
    current_page: PagePlan,
    finished_pages: Vec<PagePlan>,
}

impl<'a> Cursor<'a> {
    fn new(geometry: &'a TableGeometry) -> Self {
        Cursor {
            geometry,
            y: geometry.top(),
            current_page: PagePlan::default(),
            finished_pages: Vec::new(),
        }
    }

    /// Starts a new page when the next row would cross the bottom margin. A row ending exactly on it still fits.
    fn break_page_if_needed(&mut self) {
        if self.y - self.geometry.row_height < self.geometry.bottom() {
            self.finished_pages
                .push(std::mem::take(&mut self.current_page));
            self.y = self.geometry.top();
        }
    }

    fn place_row(&mut self, cells: [String; 3], style: RowStyle) {
        self.current_page.rows.push(PlacedRow {
            y: self.y,
            cells,
            style,
        });
        self.y -= self.geometry.row_height;
    }

    fn finish(mut self) -> Vec<PagePlan> {
        self.finished_pages.push(self.current_page);
        self.finished_pages
    }
}

/// Lays out the title, the header, the rows and the total. The header is only placed on the first page.
pub fn layout_table(
    geometry: &TableGeometry,
    title: &str,
    header: [&str; 3],
    rows: &[ReportRow],
) -> TablePlan {
    let mut cursor = Cursor::new(geometry);

    cursor.current_page.title = Some(PlacedTitle {
        y: cursor.y,
        text: title.into(),
    });
    cursor.y -= geometry.title_gap;
    cursor.place_row(header.map(String::from), RowStyle::Header);

    let mut total = Amount::ZERO;
    for row in rows {
        total += row.amount;
        cursor.break_page_if_needed();
        cursor.place_row(row.cells(), RowStyle::Data);
    }

    cursor.break_page_if_needed();
    cursor.place_row(
        [String::new(), TOTAL_LABEL.into(), total.to_brl_string()],
        RowStyle::Total,
    );

    TablePlan {
        pages: cursor.finish(),
        total,
    }
}

/// Draws the plan, one new page per planned page. Each page is drawn through its own surface,
/// which is finished before the following page is added.
pub fn render_plan(
    pdf_document: &mut PdfDocument,
    geometry: &TableGeometry,
    plan: &TablePlan,
) -> Result<(), ContextError> {
    for page_plan in &plan.pages {
        let page_id = pdf_document.add_page(geometry.page_size)?;
        let mut surface = pdf_document.surface(page_id, AppendMode::Overwrite);

        if let Some(title) = &page_plan.title {
            surface.begin_text();
            surface.set_font(StandardFont::HelveticaBold, geometry.title_font_size);
            surface.new_line_at_offset(geometry.margin, title.y);
            surface.show_text(&title.text);
            surface.end_text();
        }
        for row in &page_plan.rows {
            draw_row(&mut surface, geometry, row);
        }

        surface.finish()?;
    }

    Ok(())
}

/// Each cell is a stroked rectangle with the text left-padded from its border.
fn draw_row(surface: &mut DrawingSurface<'_>, geometry: &TableGeometry, row: &PlacedRow) {
    let cell_bottom = row.y - geometry.row_height;
    let mut cell_x = geometry.margin;

    for (cell, cell_width) in row.cells.iter().zip(geometry.column_widths) {
        surface.set_stroking_color([0.0, 0.0, 0.0]);
        surface.add_rectangle(cell_x, cell_bottom, cell_width, geometry.row_height);
        surface.stroke();

        surface.begin_text();
        surface.set_font(row.style.font(), geometry.cell_font_size);
        surface.new_line_at_offset(
            cell_x + geometry.cell_padding,
            cell_bottom + geometry.cell_padding + geometry.baseline_offset,
        );
        surface.show_text(cell);
        surface.end_text();

        cell_x += cell_width;
    }
}

/// Generates `count` transactions spread over January 2024, with amounts uniformly drawn between 50 and 500.
pub fn synthetic_rows<R: Rng>(count: usize, rng: &mut R) -> Vec<ReportRow> {
    (1..=count)
        .map(|index| ReportRow {
            date: format!("2024-01-{:02}", (index % 30) + 1),
            description: format!("Serviço {index}"),
            amount: Amount::from_decimal(50.0 + rng.gen::<f64>() * 450.0),
        })
        .collect()
}

/// Lays out and draws the statement of the given rows into a new document.
pub fn build_report(
    identifier: &str,
    geometry: &TableGeometry,
    rows: &[ReportRow],
) -> Result<(PdfDocument, TablePlan), ContextError> {
    let plan = layout_table(geometry, REPORT_TITLE, REPORT_HEADER, rows);
    let mut pdf_document = PdfDocument::new(identifier);
    render_plan(&mut pdf_document, geometry, &plan)?;

    Ok((pdf_document, plan))
}

/// Generates the statement of the configured number of synthetic transactions and saves it
/// as `multipage-<n>.pdf`, `n` being random. Colliding names are not checked for.
pub fn generate_report(configuration: &ServiceConfiguration) -> Result<PathBuf, ContextError> {
    let mut rng = rand::thread_rng();
    let rows = synthetic_rows(configuration.report_rows, &mut rng);
    let report_number = rng.gen_range(0..999_999);
    let report_name = format!("multipage-{report_number}");

    let (mut pdf_document, plan) =
        build_report(&report_name, &configuration.report_geometry, &rows)?;
    let output_path = configuration.output_path(&format!("{report_name}.pdf"));
    pdf_document.save(&output_path)?;

    log::info!(
        "Statement of {} transactions (total {}) laid out on {} pages and saved to {:?}",
        rows.len(),
        plan.total.to_brl_string(),
        plan.pages.len(),
        output_path
    );

    Ok(output_path)
}
