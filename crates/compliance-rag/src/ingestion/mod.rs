//! PDF ingestion: folder scanning and per-page text extraction

mod loader;

pub use loader::{cleanup_pdf_text, load_pdf_pages, load_pdfs_from_folder, PdfLoader};
