//! # PDF Text Extraction
//!
//! Decodes an uploaded PDF with `lopdf` and flattens it into the plain text that is
//! sent to the model: the text of every page in document order, followed by a
//! `Form Fields:` block listing each form widget as `name: value` when the document
//! carries an interactive form.

use crate::errors::ExtractError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{info, warn};

/// Separates page text from the flattened form-field listing.
pub const FORM_FIELDS_HEADER: &str = "\n\nForm Fields:\n";
/// Stands in for a widget whose field has no name.
pub const UNNAMED_FIELD: &str = "UnnamedField";

// Bounds the walk up a field's `/Parent` chain.
const MAX_FIELD_DEPTH: usize = 32;

// --- Data Structures ---

/// A form widget found in a page's `/Annots` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Widget {
    /// The fully qualified field name (`parent.child`), if any part is named.
    pub field_name: Option<String>,
    /// The field value, inherited from the parent field when the widget has none.
    pub field_value: Option<String>,
}

impl Widget {
    pub fn new(field_name: Option<&str>, field_value: Option<&str>) -> Self {
        Self {
            field_name: field_name.map(String::from),
            field_value: field_value.map(String::from),
        }
    }

    /// Renders the widget as one line of the form-field block.
    ///
    /// An empty name is treated like a missing one. An empty value and a missing
    /// value render identically.
    pub fn to_line(&self) -> String {
        let name = self
            .field_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_FIELD);
        let value = self.field_value.as_deref().unwrap_or_default();
        format!("{name}: {value}\n")
    }
}

/// One page of a decoded PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub text: String,
    pub widgets: Vec<Widget>,
}

/// A decoded PDF, reduced to what the summarizer reads from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfDocument {
    pub pages: Vec<Page>,
    /// True when the catalog's `/AcroForm /Fields` array is non-empty.
    pub has_form_fields: bool,
}

impl PdfDocument {
    /// Decodes a PDF byte buffer.
    pub fn from_bytes(pdf_data: &[u8]) -> Result<Self, ExtractError> {
        let doc = Document::load_mem(pdf_data)?;
        let has_form_fields = has_form_fields(&doc);

        let pages = doc
            .get_pages()
            .into_iter()
            .map(|(page_number, page_id)| Page {
                text: page_text(&doc, page_number),
                widgets: page_widgets(&doc, page_id),
            })
            .collect();

        Ok(Self {
            pages,
            has_form_fields,
        })
    }

    /// Joins page text with line breaks and, for form documents, appends the
    /// form-field block.
    pub fn extracted_text(&self) -> String {
        let mut text = self
            .pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if self.has_form_fields {
            text.push_str(FORM_FIELDS_HEADER);
            for widget in self.pages.iter().flat_map(|page| &page.widgets) {
                text.push_str(&widget.to_line());
            }
        }

        text
    }

    pub fn widget_count(&self) -> usize {
        self.pages.iter().map(|page| page.widgets.len()).sum()
    }
}

// --- Public Entry Points ---

/// Extracts the summarizer input text from a PDF byte buffer.
pub fn extract_text(pdf_data: &[u8]) -> Result<String, ExtractError> {
    Ok(PdfDocument::from_bytes(pdf_data)?.extracted_text())
}

/// Extracts text on the blocking pool, since PDF parsing is CPU-bound.
pub async fn extract_text_from_pdf(pdf_data: Vec<u8>) -> Result<String, ExtractError> {
    info!("Extracting text from PDF ({} bytes)...", pdf_data.len());

    let text = tokio::task::spawn_blocking(move || extract_text(&pdf_data))
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))??;

    info!(
        "Successfully extracted text from PDF. Total length: {} characters.",
        text.chars().count()
    );
    Ok(text)
}

// --- Helper Functions ---

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> lopdf::Result<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id),
        other => Ok(other),
    }
}

/// The page's text without the line breaks `lopdf` appends after each text object.
fn page_text(doc: &Document, page_number: u32) -> String {
    match doc.extract_text(&[page_number]) {
        Ok(text) => text.trim_end_matches(['\n', '\r']).to_string(),
        Err(e) => {
            warn!("Page {} has no decodable text: {}", page_number, e);
            String::new()
        }
    }
}

fn has_form_fields(doc: &Document) -> bool {
    doc.trailer
        .get(b"Root")
        .ok()
        .and_then(|root| resolve(doc, root).ok())
        .and_then(|root| root.as_dict().ok())
        .and_then(|catalog| catalog.get(b"AcroForm").ok())
        .and_then(|form| resolve(doc, form).ok())
        .and_then(|form| form.as_dict().ok())
        .and_then(|form| form.get(b"Fields").ok())
        .and_then(|fields| resolve(doc, fields).ok())
        .and_then(|fields| fields.as_array().ok())
        .is_some_and(|fields| !fields.is_empty())
}

fn page_widgets(doc: &Document, page_id: ObjectId) -> Vec<Widget> {
    let annots = doc
        .get_object(page_id)
        .and_then(|page| page.as_dict())
        .ok()
        .and_then(|page| page.get(b"Annots").ok())
        .and_then(|annots| resolve(doc, annots).ok())
        .and_then(|annots| annots.as_array().ok());

    let Some(annots) = annots else {
        return Vec::new();
    };

    annots
        .iter()
        .filter_map(|entry| resolve(doc, entry).ok()?.as_dict().ok())
        .filter(|annot| is_widget(annot))
        .map(|annot| Widget {
            field_name: qualified_field_name(doc, annot),
            field_value: field_value(doc, annot),
        })
        .collect()
}

fn is_widget(annot: &Dictionary) -> bool {
    annot
        .get(b"Subtype")
        .and_then(|subtype| subtype.as_name())
        .is_ok_and(|subtype| subtype == b"Widget")
}

fn parent<'a>(doc: &'a Document, field: &'a Dictionary) -> Option<&'a Dictionary> {
    field
        .get(b"Parent")
        .ok()
        .and_then(|parent| resolve(doc, parent).ok())
        .and_then(|parent| parent.as_dict().ok())
}

fn qualified_field_name(doc: &Document, widget: &Dictionary) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = Some(widget);

    for _ in 0..MAX_FIELD_DEPTH {
        let Some(field) = current else {
            break;
        };
        let partial_name = field
            .get(b"T")
            .ok()
            .and_then(|name| resolve(doc, name).ok())
            .and_then(|name| name.as_str().ok());
        if let Some(name) = partial_name {
            parts.push(decode_text_string(name));
        }
        current = parent(doc, field);
    }

    if parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join("."))
}

fn field_value(doc: &Document, widget: &Dictionary) -> Option<String> {
    let mut current = Some(widget);

    for _ in 0..MAX_FIELD_DEPTH {
        let field = current?;
        if let Ok(value) = field.get(b"V") {
            return resolve(doc, value)
                .ok()
                .and_then(|value| render_value(doc, value));
        }
        current = parent(doc, field);
    }
    None
}

fn render_value(doc: &Document, value: &Object) -> Option<String> {
    match value {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(number) => Some(number.to_string()),
        Object::Real(number) => Some(number.to_string()),
        Object::Boolean(flag) => Some(flag.to_string()),
        Object::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| resolve(doc, item).ok())
                .filter_map(|item| render_value(doc, item))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

/// Decodes a PDF text string: UTF-16BE with a byte-order mark, UTF-8 with a
/// byte-order mark, or PDFDocEncoding otherwise.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(utf8).into_owned();
    }
    bytes.iter().map(|&byte| pdf_doc_char(byte)).collect()
}

/// PDFDocEncoding for 0x80..=0xA0. 0x9F is undefined.
const PDF_DOC_HIGH: [char; 33] = [
    '\u{2022}', '\u{2020}', '\u{2021}', '\u{2026}', '\u{2014}', '\u{2013}', '\u{0192}', '\u{2044}',
    '\u{2039}', '\u{203A}', '\u{2212}', '\u{2030}', '\u{201E}', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '\u{201A}', '\u{2122}', '\u{FB01}', '\u{FB02}', '\u{0141}', '\u{0152}', '\u{0160}',
    '\u{0178}', '\u{017D}', '\u{0131}', '\u{0142}', '\u{0153}', '\u{0161}', '\u{017E}', '\u{FFFD}',
    '\u{20AC}',
];

/// PDFDocEncoding for 0x18..=0x1F.
const PDF_DOC_ACCENTS: [char; 8] = [
    '\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}',
];

/// Maps one PDFDocEncoding byte; outside the two remapped ranges it agrees with Latin-1.
fn pdf_doc_char(byte: u8) -> char {
    match byte {
        0x18..=0x1F => PDF_DOC_ACCENTS[usize::from(byte - 0x18)],
        0x80..=0xA0 => PDF_DOC_HIGH[usize::from(byte - 0x80)],
        0xAD => '\u{FFFD}',
        _ => char::from(byte),
    }
}
