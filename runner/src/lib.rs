mod ocrmypdf;
mod opener;
mod preflight;
mod runner;

pub use ocrmypdf::{DEFAULT_PROGRAM, OcrMyPdf};
pub use opener::{DOCS_URL, open_path};
pub use preflight::{DEFAULT_TESSERACT, parse_language_list, preflight, supported_languages};
pub use runner::{ExecutionResult, RunState, Runner, spawn};
