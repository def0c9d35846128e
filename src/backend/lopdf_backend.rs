//! Primary backend: [`lopdf`], a pure-Rust PDF reader.
//!
//! lopdf parses the whole file into memory on open, so the file handle is
//! closed before the first page is read. Page text comes from walking the
//! page content stream: `Tj`/`TJ` operands are decoded through the page font
//! encodings and consecutive text objects (`BT`..`ET`) are joined by a line
//! break. No break follows the last text object, so a page holding just
//! "Hello" yields `"Hello"`.

use super::{PageSource, TextBackend};
use crate::error::ExtractionError;
use lopdf::content::Content;
use lopdf::{Document, Encoding, Object};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// [`TextBackend`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TextBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageSource + 'a>, ExtractionError> {
        let doc = Document::load(path).map_err(|e| ExtractionError::open(path, e))?;

        // get_pages() is keyed by 1-based page number, already in order.
        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        debug!(
            "lopdf opened {}: {} pages",
            path.display(),
            page_numbers.len()
        );

        Ok(Box::new(LopdfDocument { doc, page_numbers }))
    }
}

/// A document loaded by lopdf.
struct LopdfDocument {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PageSource for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractionError> {
        let number = *self.page_numbers.get(index).ok_or_else(|| {
            ExtractionError::page(
                index,
                format!("out of range (document has {} pages)", self.page_numbers.len()),
            )
        })?;

        read_page(&self.doc, number).map_err(|e| ExtractionError::page(index, e))
    }
}

/// Text of the 1-based page `number`.
///
/// Follows `Document::extract_text`, except that the line break is emitted
/// when the next text object starts rather than at every `ET`.
fn read_page(doc: &Document, number: u32) -> lopdf::Result<String> {
    let page_id = *doc
        .get_pages()
        .get(&number)
        .ok_or(lopdf::Error::PageNumberNotFound(number))?;

    let encodings = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(doc).map(|enc| (name, enc)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut text = String::new();
    let mut current = None;
    let mut ended_object = false;
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => {
                let font = op
                    .operands
                    .first()
                    .ok_or_else(|| lopdf::Error::Syntax("missing font operand".to_string()))?
                    .as_name()?;
                current = encodings.get(font);
            }
            "Tj" | "TJ" => match current {
                Some(encoding) => {
                    if ended_object && !text.is_empty() && !text.ends_with('\n') {
                        text.push('\n');
                    }
                    ended_object = false;
                    collect_text(&mut text, encoding, &op.operands)?;
                }
                None => warn!("page {number}: text shown without a decodable font"),
            },
            "ET" => ended_object = true,
            _ => {}
        }
    }
    Ok(text)
}

/// Append the strings of a `Tj`/`TJ` operand list. Large negative kerning
/// inside a `TJ` array stands for a word gap.
fn collect_text(text: &mut String, encoding: &Encoding, operands: &[Object]) -> lopdf::Result<()> {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(items) => collect_text(text, encoding, items)?,
            Object::Integer(i) if *i < -100 => text.push(' '),
            Object::Real(r) if *r < -100.0 => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}
