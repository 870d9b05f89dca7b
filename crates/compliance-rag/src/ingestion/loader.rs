//! PDF folder loader

use std::path::{Path, PathBuf};

use crate::config::CorpusConfig;
use crate::error::{Error, Result};
use crate::types::Document;

/// Loads every `*.pdf` in a folder into per-page documents
pub struct PdfLoader {
    folder: PathBuf,
    sort_filenames: bool,
}

impl PdfLoader {
    /// Create a loader for a folder
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            sort_filenames: true,
        }
    }

    /// Create a loader from corpus configuration
    pub fn from_config(config: &CorpusConfig) -> Self {
        Self {
            folder: config.pdf_folder.clone(),
            sort_filenames: config.sort_filenames,
        }
    }

    /// Keep directory listing order instead of sorting by file name
    pub fn with_listing_order(mut self) -> Self {
        self.sort_filenames = false;
        self
    }

    /// List PDF files in the folder (non-recursive)
    pub fn pdf_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.folder)? {
            let entry = entry?;
            let path = entry.path();
            let is_pdf = entry.file_name().to_string_lossy().ends_with(".pdf");

            if is_pdf && path.is_file() {
                files.push(path);
            }
        }

        if self.sort_filenames {
            files.sort();
        }

        Ok(files)
    }

    /// Load all pages of all PDFs as a flat list of documents
    ///
    /// Any file that cannot be opened as a PDF aborts the whole load.
    pub fn load(&self) -> Result<Vec<Document>> {
        tracing::info!("Scanning {} for PDF files", self.folder.display());

        let files = self.pdf_files()?;
        let mut documents = Vec::new();

        for path in &files {
            let pages = load_pdf_pages(path)?;
            tracing::info!("Loaded {} ({} pages)", path.display(), pages.len());
            documents.extend(pages.into_iter().map(Document::from));
        }

        tracing::info!(
            "Loaded {} pages from {} PDF files",
            documents.len(),
            files.len()
        );

        Ok(documents)
    }
}

/// Load every page of every PDF in `folder`, files in name order
pub fn load_pdfs_from_folder(folder: impl AsRef<Path>) -> Result<Vec<Document>> {
    PdfLoader::new(folder.as_ref()).load()
}

/// Extract text from each page of a single PDF, in page order
pub fn load_pdf_pages(path: &Path) -> Result<Vec<String>> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let doc = lopdf::Document::load(path)
        .map_err(|e| Error::file_parse(&filename, format!("Failed to load PDF: {}", e)))?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        let text = match doc.extract_text(&[*page_number]) {
            Ok(text) => cleanup_pdf_text(&text),
            Err(e) => {
                // Image-only or oddly encoded pages still count as (empty) pages.
                tracing::debug!("No text on {} page {}: {}", filename, page_number, e);
                String::new()
            }
        };
        pages.push(text);
    }

    Ok(pages)
}

/// Normalise PDF text: strip NULs, unfold ligatures and smart punctuation,
/// and drop blank lines
pub fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace('\u{2010}', "-")
        .replace('\u{2011}', "-")
        .replace('\u{2013}', "-")
        .replace('\u{2014}', "--")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'")
        .replace('\u{201C}', "\"")
        .replace('\u{201D}', "\"")
        .replace('\u{2022}', "* ")
        .replace('\u{2026}', "...")
        .replace('\u{00A0}', " ")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
