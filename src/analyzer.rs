//! Metadata aggregation for a single PE file.

use crate::binary;
use crate::classifier::Classifier;
use crate::report::{FileType, Magic, Report};
use anyhow::{Context, Result};
use log::warn;
use md5::Md5;
use memmap2::Mmap;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

/// Hex digests of one byte stream.
struct Digests {
    md5: String,
    sha1: String,
    sha256: String,
}

/// Extracts descriptive metadata from a PE file.
///
/// The file is mapped into memory once; header parsing and all three digest
/// passes read the same immutable slice, so the hashes are guaranteed to
/// cover the identical bytes the parser saw.
pub struct Analyzer {
    mmap: Mmap,
    name: String,
    file_size: u64,
}

impl Analyzer {
    /// Creates an analyzer for the given file. `name` is the path or
    /// identifier carried into the report and handed to the classifier.
    ///
    /// Fails when the file cannot be stat'ed or mapped; both make any report
    /// meaningless.
    pub fn new(file: File, name: impl Into<String>) -> Result<Self> {
        let file_size = file.metadata().context("failed to stat input file")?.len();
        let mmap = unsafe { Mmap::map(&file)? };

        Ok(Self {
            mmap,
            name: name.into(),
            file_size,
        })
    }

    /// Runs every extraction step and assembles the report.
    ///
    /// An unparseable PE header aborts the analysis. Import, symbol, and
    /// section extraction degrade to empty on failure, and a classifier
    /// failure leaves the classification unset; none of those prevent a
    /// usable report.
    pub fn analyze(&self, classifier: Option<&dyn Classifier>) -> Result<Report> {
        let digests = compute_digests(&self.mmap);

        let summary = binary::parse(&self.mmap)
            .with_context(|| format!("failed to parse {} as a PE image", self.name))?;

        let classification = classifier.and_then(|c| match c.classify(Path::new(&self.name)) {
            Ok(verdict) => Some(verdict),
            Err(err) => {
                warn!("Classification of {} failed: {err}", self.name);
                None
            }
        });

        Ok(Report {
            name: self.name.clone(),
            md5: digests.md5,
            sha1: digests.sha1,
            sha256: digests.sha256,
            file_type: FileType::from_machine(summary.machine),
            magic: Magic::from_optional_header(summary.optional_magic),
            file_size: self.file_size,
            libraries: summary.libraries,
            symbols: summary.symbols,
            sections: summary.sections,
            classification,
        })
    }
}

/// Hashes the full content with three independent accumulators in one pass
/// over the in-memory buffer.
fn compute_digests(data: &[u8]) -> Digests {
    Digests {
        md5: hex::encode(Md5::digest(data)),
        sha1: hex::encode(Sha1::digest(data)),
        sha256: hex::encode(Sha256::digest(data)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_of_known_input() {
        let digests = compute_digests(b"abc");
        assert_eq!(digests.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(digests.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            digests.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
