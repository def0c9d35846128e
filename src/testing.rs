//! Shared test fixtures: generated PDFs and a scripted in-memory backend.

use crate::backend::{PageSource, TextBackend};
use crate::error::ExtractionError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Write a PDF with one page per entry of `pages`, each showing that text in
/// Helvetica, and return its path. Every `'\n'`-separated line becomes its own
/// text object.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
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

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let mut operations = Vec::new();
        for (i, line) in text.split('\n').enumerate() {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), (720 - 30 * i as i64).into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ]);
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// What a scripted page yields.
#[derive(Debug, Clone)]
pub enum ScriptedPage {
    Text(&'static str),
    Fail(&'static str),
}

/// In-memory [`TextBackend`] that replays a fixed script.
///
/// `opened` and `released` count documents handed out and dropped, which lets
/// tests check that every exit path releases the document.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    pub name: &'static str,
    pub open_error: Option<&'static str>,
    pub pages: Vec<ScriptedPage>,
    pub opened: Cell<usize>,
    pub released: Cell<usize>,
    pub pages_read: Cell<usize>,
}

impl ScriptedBackend {
    pub fn with_pages(name: &'static str, texts: &[&'static str]) -> Self {
        Self {
            name,
            pages: texts.iter().map(|t| ScriptedPage::Text(*t)).collect(),
            ..Self::default()
        }
    }

    pub fn failing_open(name: &'static str, message: &'static str) -> Self {
        Self {
            name,
            open_error: Some(message),
            ..Self::default()
        }
    }
}

impl TextBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageSource + 'a>, ExtractionError> {
        if let Some(message) = self.open_error {
            return Err(ExtractionError::open(path, message));
        }
        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(ScriptedDocument { backend: self }))
    }
}

struct ScriptedDocument<'a> {
    backend: &'a ScriptedBackend,
}

impl PageSource for ScriptedDocument<'_> {
    fn page_count(&self) -> usize {
        self.backend.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractionError> {
        self.backend.pages_read.set(self.backend.pages_read.get() + 1);
        match &self.backend.pages[index] {
            ScriptedPage::Text(t) => Ok((*t).to_string()),
            ScriptedPage::Fail(msg) => Err(ExtractionError::page(index, msg)),
        }
    }
}

impl Drop for ScriptedDocument<'_> {
    fn drop(&mut self) {
        self.backend.released.set(self.backend.released.get() + 1);
    }
}
