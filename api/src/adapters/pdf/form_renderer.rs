//! Enrollment form rendered as a one-page PDF
//!
//! The page is drawn directly with content-stream operators using the two
//! standard Helvetica faces, so no font files are embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::domain::entities::EnrollmentDetails;
use crate::domain::ports::FormRenderer;
use crate::error::DomainError;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const LEFT: f32 = 31.0;
const CONTENT_WIDTH: f32 = 550.0;
const TOP: f32 = 30.0;

const FONT_SIZE: f32 = 10.0;
const ROW_HEIGHT: f32 = 18.0;
const BOX_ROW_HEIGHT: f32 = 25.0;
const SECTION_GAP: f32 = 15.0;
const BLANK_SUBJECT_ROWS: usize = 6;

const TITLE_SHADE: f32 = 0.91;
const HEADER_SHADE: f32 = 0.94;
/// #003366
const HEADER_COLOR: (f32, f32, f32) = (0.0, 0.2, 0.4);

const INSTITUTION: [&str; 7] = [
    "SECRETARÍA DE EDUCACIÓN PÚBLICA",
    "SUBSECRETARÍA DE EDUCACIÓN MEDIA SUPERIOR",
    "DIRECCIÓN GENERAL DE BACHILLERATO",
    "",
    "PREPARATORIA FEDERAL POR COOPERACIÓN",
    "\"VALENTÍN GÓMEZ FARÍAS\"",
    "C.C.T. 17EBH0027O",
];

/// Placeholder for a specialty or workshop the record does not carry
const MISSING: &str = "-";

/// `FormRenderer` producing the printable re-enrollment request
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfFormRenderer;

impl PdfFormRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl FormRenderer for PdfFormRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, details: &EnrollmentDetails) -> Result<Vec<u8>, DomainError> {
        let mut page = Page::new();
        draw_form(&mut page, details);

        let content = Content {
            operations: page.ops,
        }
        .encode()
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        save_document(content)
    }
}

fn draw_form(page: &mut Page, details: &EnrollmentDetails) {
    let student = &details.student;

    page.set_fill(HEADER_COLOR);
    for line in INSTITUTION {
        if !line.is_empty() {
            page.centered_text(LEFT, CONTENT_WIDTH, page.cursor + 10.0, line, Font::Bold);
        }
        page.cursor += 12.0;
    }
    page.set_fill((0.0, 0.0, 0.0));
    page.cursor += SECTION_GAP;

    page.row(
        &[
            (200.0, format!("Número De Control: {}", student.control_number)),
            (350.0, format!("Nombre Completo: {}", student.full_name())),
        ],
        RowStyle::Plain,
    );
    page.cursor += SECTION_GAP;

    page.table(
        "DATOS DE REINSCRIPCIÓN",
        &[183.0, 183.0, 184.0],
        &["SEMESTRE", "ESPECIALIDAD", "TALLER"],
        &[reenrollment_row(details).to_vec()],
    );
    page.cursor += SECTION_GAP;

    page.table(
        "DATOS ULTIMO SEMESTRE CURSADO",
        &[275.0, 275.0],
        &["GRUPO ANTERIOR", "SEMESTRE ANTERIOR"],
        &[vec![
            student.previous_group.clone(),
            student.previous_semester.to_string(),
        ]],
    );
    page.cursor += SECTION_GAP;

    page.table(
        "MATERIAS QUE ADEUDAN EN LOS SEMESTRES ANTERIORES",
        &[250.0, 150.0, 150.0],
        &["MATERIA", "PERIODO", "SEMESTRE"],
        &vec![vec![String::new(); 3]; BLANK_SUBJECT_ROWS],
    );
    page.cursor += SECTION_GAP;

    page.titled_box("OBSERVACIONES", CONTENT_WIDTH, 60.0, None);
    page.cursor += 20.0;

    let requested = details.record.requested_at.format("%d/%m/%Y").to_string();
    page.titled_box(
        "FIRMA DE CONTROL ESCOLAR",
        275.0,
        50.0,
        Some(format!("FECHA DE SOLICITUD: {}", requested)),
    );
}

/// Semester, specialty and workshop cells of the re-enrollment table
fn reenrollment_row(details: &EnrollmentDetails) -> [String; 3] {
    [
        details.record.semester.to_string(),
        details.specialty_name().unwrap_or(MISSING).to_string(),
        details.workshop_name().unwrap_or(MISSING).to_string(),
    ]
}

fn save_document(content: Vec<u8>) -> Result<Vec<u8>, DomainError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(buf)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RowStyle {
    Plain,
    Body,
    Header,
    Title,
    Footer,
}

impl RowStyle {
    fn shade(self) -> Option<f32> {
        match self {
            RowStyle::Title => Some(TITLE_SHADE),
            RowStyle::Header => Some(HEADER_SHADE),
            RowStyle::Plain | RowStyle::Body | RowStyle::Footer => None,
        }
    }

    fn font(self) -> Font {
        match self {
            RowStyle::Title | RowStyle::Header | RowStyle::Footer => Font::Bold,
            RowStyle::Plain | RowStyle::Body => Font::Regular,
        }
    }
}

/// Operators for one page, laid out top-down from `cursor`
struct Page {
    ops: Vec<Operation>,
    cursor: f32,
}

impl Page {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            cursor: TOP,
        }
    }

    fn set_fill(&mut self, (r, g, b): (f32, f32, f32)) {
        self.ops
            .push(Operation::new("rg", vec![real(r), real(g), real(b)]));
    }

    fn text(&mut self, x: f32, baseline: f32, text: &str, font: Font) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![font.resource().into(), real(FONT_SIZE)],
        ));
        self.ops.push(Operation::new(
            "Td",
            vec![real(x), real(PAGE_HEIGHT - baseline)],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn centered_text(&mut self, left: f32, width: f32, baseline: f32, text: &str, font: Font) {
        let x = left + (width - text_width(text, font)) / 2.0;
        self.text(x.max(left), baseline, text, font);
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, gray: f32) {
        let rect = rect_operands(x, top, width, height);
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new("g", vec![real(gray)]));
        self.ops.push(Operation::new("re", rect));
        self.ops.push(Operation::new("f", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32) {
        let rect = rect_operands(x, top, width, height);
        self.ops.push(Operation::new("w", vec![real(1.0)]));
        self.ops.push(Operation::new("re", rect));
        self.ops.push(Operation::new("S", vec![]));
    }

    /// One row of cells. Bordered unless `Plain`; text is centered in
    /// bordered cells and left-aligned otherwise.
    fn row(&mut self, cells: &[(f32, String)], style: RowStyle) {
        self.row_with_height(cells, style, ROW_HEIGHT);
    }

    fn row_with_height(&mut self, cells: &[(f32, String)], style: RowStyle, height: f32) {
        let baseline = self.cursor + height / 2.0 + FONT_SIZE * 0.35;
        let mut x = LEFT;

        for (width, text) in cells {
            if let Some(gray) = style.shade() {
                self.fill_rect(x, self.cursor, *width, height, gray);
            }
            match style {
                RowStyle::Plain => self.text(x + 5.0, baseline, text, style.font()),
                _ => {
                    self.stroke_rect(x, self.cursor, *width, height);
                    self.centered_text(x, *width, baseline, text, style.font());
                }
            }
            x += width;
        }

        self.cursor += height;
    }

    /// Bordered table: a full-width title row, a header row, then the body
    fn table(&mut self, title: &str, widths: &[f32], header: &[&str], rows: &[Vec<String>]) {
        let total: f32 = widths.iter().sum();
        self.row(&[(total, title.to_string())], RowStyle::Title);

        let header: Vec<(f32, String)> = widths
            .iter()
            .zip(header)
            .map(|(w, h)| (*w, h.to_string()))
            .collect();
        self.row(&header, RowStyle::Header);

        for body in rows {
            let cells: Vec<(f32, String)> = widths
                .iter()
                .copied()
                .zip(body.iter().cloned())
                .collect();
            self.row(&cells, RowStyle::Body);
        }
    }

    /// Single-column box: a shaded title over a blank area, with an
    /// optional bold footer row
    fn titled_box(&mut self, title: &str, width: f32, blank: f32, footer: Option<String>) {
        self.row_with_height(&[(width, title.to_string())], RowStyle::Title, BOX_ROW_HEIGHT);

        self.stroke_rect(LEFT, self.cursor, width, blank);
        self.cursor += blank;

        if let Some(footer) = footer {
            self.row_with_height(&[(width, footer)], RowStyle::Footer, BOX_ROW_HEIGHT);
        }
    }
}

/// `re` operands for a box given by its top edge
fn rect_operands(x: f32, top: f32, width: f32, height: f32) -> Vec<Object> {
    vec![
        real(x),
        real(PAGE_HEIGHT - top - height),
        real(width),
        real(height),
    ]
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Encode text for a WinAnsiEncoding font. Characters outside Latin-1
/// become '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Rough Helvetica advance width, used only for centering
fn text_width(text: &str, font: Font) -> f32 {
    let units: f32 = text
        .chars()
        .map(|c| match c {
            ' ' | '.' | ',' | ':' | '"' => 278.0,
            'I' | 'i' | 'l' | 'j' => 278.0,
            'M' | 'W' | 'm' | 'w' => 833.0,
            '0'..='9' => 556.0,
            c if c.is_uppercase() => 700.0,
            _ => 556.0,
        })
        .sum();

    let weight = match font {
        Font::Regular => 1.0,
        Font::Bold => 1.05,
    };
    units * weight * FONT_SIZE / 1000.0
}
