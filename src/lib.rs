//! PE metadata extraction library.
//!
//! This library extracts descriptive metadata from Windows PE executables:
//! cryptographic hashes, architecture/bitness, imports, section headers, and
//! file size, optionally augmented by an external classifier's verdict.

pub mod analyzer;
pub mod binary;
pub mod classifier;
pub mod html;
pub mod report;

pub use analyzer::Analyzer;
pub use classifier::{Classifier, ClassifierError, CommandClassifier, Verdict};
pub use html::{render_html, TEMPLATE_NAME};
pub use report::{FileType, Magic, Report};
