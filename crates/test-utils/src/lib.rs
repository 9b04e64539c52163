use legalsum::errors::PromptError;
use legalsum::providers::ai::AiProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock that answers every prompt with `response`.
    pub fn with_response(response: &str) -> Self {
        let provider = Self::new();
        *provider.default_response.lock().unwrap() = Some(response.to_string());
        provider
    }

    /// Pre-programs a response for prompts containing `key`.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, PromptError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        if let Some(response) = self.default_response.lock().unwrap().as_ref() {
            return Ok(response.clone());
        }

        Err(PromptError::AiApi(
            "MockAiProvider: No response programmed for prompt.".to_string(),
        ))
    }
}

// --- Test-Specific Helpers ---
pub mod helpers {
    use anyhow::Result;
    use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// One form widget to place on a generated page.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FieldSpec<'a> {
        /// Partial name of a parent field the widget hangs under.
        pub parent: Option<&'a str>,
        pub name: Option<&'a str>,
        pub value: Option<&'a str>,
    }

    impl<'a> FieldSpec<'a> {
        pub fn new(name: Option<&'a str>, value: Option<&'a str>) -> Self {
            Self {
                parent: None,
                name,
                value,
            }
        }
    }

    /// One page of a generated PDF.
    #[derive(Debug, Clone, Default)]
    pub struct PageSpec<'a> {
        pub text: &'a str,
        pub fields: Vec<FieldSpec<'a>>,
    }

    /// Generates a simple, single-page PDF with the given text content.
    pub fn generate_test_pdf(text: &str) -> Result<Vec<u8>> {
        generate_pdf(&[PageSpec {
            text,
            fields: Vec::new(),
        }])
    }

    /// Generates a single-page PDF with text and an interactive form.
    pub fn generate_form_pdf(text: &str, fields: &[FieldSpec<'_>]) -> Result<Vec<u8>> {
        generate_pdf(&[PageSpec {
            text,
            fields: fields.to_vec(),
        }])
    }

    /// Generates a PDF with one page per `PageSpec`, using the built-in Helvetica font.
    ///
    /// An `/AcroForm` entry is written only when at least one page has fields.
    pub fn generate_pdf(pages: &[PageSpec<'_>]) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut page_ids: Vec<Object> = Vec::new();
        let mut root_fields: Vec<Object> = Vec::new();

        for page_spec in pages {
            let page_id = doc.new_object_id();

            let operations = if page_spec.text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                    ),
                    Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                    Operation::new("Tj", vec![Object::string_literal(page_spec.text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

            let mut annots: Vec<Object> = Vec::new();
            for (index, field) in page_spec.fields.iter().enumerate() {
                let bottom = 680 - 30 * index as i64;
                let rect: Vec<Object> = vec![
                    Object::Integer(72),
                    Object::Integer(bottom),
                    Object::Integer(300),
                    Object::Integer(bottom + 20),
                ];
                let mut widget = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Widget",
                    "FT" => "Tx",
                    "Rect" => rect,
                    "P" => page_id,
                };
                if let Some(name) = field.name {
                    widget.set("T", Object::string_literal(name));
                }
                if let Some(value) = field.value {
                    widget.set("V", Object::string_literal(value));
                }

                let widget_id = doc.new_object_id();
                match field.parent {
                    Some(parent_name) => {
                        let parent_id = doc.add_object(dictionary! {
                            "T" => Object::string_literal(parent_name),
                            "Kids" => vec![Object::from(widget_id)],
                        });
                        widget.set("Parent", parent_id);
                        root_fields.push(Object::from(parent_id));
                    }
                    None => root_fields.push(Object::from(widget_id)),
                }
                doc.objects.insert(widget_id, Object::Dictionary(widget));
                annots.push(Object::from(widget_id));
            }

            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            if !annots.is_empty() {
                page.set("Annots", annots);
            }
            doc.objects.insert(page_id, Object::Dictionary(page));
            page_ids.push(Object::from(page_id));
        }

        let count = page_ids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids,
                "Count" => count,
                "MediaBox" => media_box,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if !root_fields.is_empty() {
            catalog.set("AcroForm", dictionary! { "Fields" => root_fields });
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// A paragraph read back from a `.docx` package.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DocxParagraph {
        pub style: Option<String>,
        pub text: String,
    }

    /// Reads the top-level paragraphs of a `.docx` package.
    ///
    /// Breaks read back as `\n` and tabs as `\t`.
    pub fn read_docx_paragraphs(bytes: &[u8]) -> Result<Vec<DocxParagraph>> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| anyhow::anyhow!("docx-rs parse error: {e:?}"))?;

        Ok(docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(DocxParagraph {
                    style: paragraph
                        .property
                        .style
                        .as_ref()
                        .map(|style| style.val.clone()),
                    text: paragraph_text(paragraph),
                }),
                _ => None,
            })
            .collect())
    }

    fn paragraph_text(paragraph: &Paragraph) -> String {
        let mut text = String::new();
        for child in &paragraph.children {
            if let ParagraphChild::Run(run) = child {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Break(_) => text.push('\n'),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }
            }
        }
        text
    }
}
