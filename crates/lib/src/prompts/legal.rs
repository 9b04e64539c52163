//! # Legal Summary Prompt
//!
//! The fixed instruction template wrapped around the extracted document text.
//! Only the interpolated text varies between requests.

/// Upper bound, in characters, on the document text placed into the prompt.
pub const MAX_DOCUMENT_CHARS: usize = 10_000;

/// The seven section headers the model is asked to produce, in order.
pub const SUMMARY_SECTIONS: [&str; 7] = [
    "Parties",
    "Effective Date",
    "Term",
    "Confidential Information",
    "Obligations",
    "Jurisdiction",
    "Risk Flags",
];

/// Rendered for any section whose source information is absent.
pub const NOT_SPECIFIED: &str = "Not specified";

pub const LEGAL_SUMMARY_PROMPT: &str = r#"Summarize the following legal document with detailed sections.
For any section where the information is missing or not clearly stated,
explicitly write: "Not specified".

Sections to include:

1. Parties:
    - All entities and individuals involved.
2. Effective Date:
    - Start date of the agreement
    - End date/expiry (if mentioned)
    - Renewal terms (if applicable)
3. Term:
    - Duration of the agreement.
4. Confidential Information:
    - Definitions
    - Restrictions
5. Obligations:
    - Key duties of each party
    - Payment terms, deliverables, deadlines
6. Jurisdiction:
    - Governing law
    - Venue/courts
7. Risk Flags:
    - Liabilities
    - Termination conditions
    - Indemnities
    - Any unusual or one-sided clauses

Provide the output as structured bullet points with sub-bullets.

Document text and any extracted Form Fields (if present):
{document_text}"#;

/// Returns the first `MAX_DOCUMENT_CHARS` characters of `text`.
///
/// The cut is not sentence-aware. Text at or below the bound is returned whole.
pub fn truncate_document_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_DOCUMENT_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Builds the prompt for one document.
pub fn build_summary_prompt(document_text: &str) -> String {
    LEGAL_SUMMARY_PROMPT.replace("{document_text}", truncate_document_text(document_text))
}
