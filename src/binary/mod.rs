//! Binary format parsing.
//!
//! This module wraps the `object` crate's PE reader and exposes the handful
//! of header facts the analyzer cares about: machine code, optional header
//! magic, imports, and the section table.

mod pe;

use anyhow::Result;
use object::pe::{ImageNtHeaders32, ImageNtHeaders64};
use object::FileKind;
use serde::Serialize;

pub use pe::PeSummary;

/// Information about a section in the binary.
#[derive(Debug, Clone, Serialize)]
pub struct SectionInfo {
    pub name: String,
    pub virtual_address: u64,
    pub virtual_size: u64,
    pub file_offset: u64,
    pub raw_size: u64,
    pub characteristics: u32,
}

/// Parses the raw bytes as a PE image and summarizes its headers.
///
/// Fails when the data is not a PE image (bad magic, truncated headers, or a
/// different binary format entirely). Import extraction failures inside a
/// well-formed image are non-fatal; see [`PeSummary`].
pub fn parse(data: &[u8]) -> Result<PeSummary> {
    match FileKind::parse(data)? {
        FileKind::Pe32 => pe::summarize::<ImageNtHeaders32>(data),
        FileKind::Pe64 => pe::summarize::<ImageNtHeaders64>(data),
        other => anyhow::bail!("Unsupported binary format: {:?}", other),
    }
}
