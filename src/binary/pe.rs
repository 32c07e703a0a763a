//! PE (Portable Executable) header summarization.

use super::SectionInfo;
use anyhow::Result;
use log::warn;
use object::read::pe::{ImageNtHeaders, ImageOptionalHeader, PeFile};
use object::{LittleEndian, Object, ObjectSection, SectionFlags};

/// Header facts extracted from a parsed PE image.
#[derive(Debug, Clone)]
pub struct PeSummary {
    /// COFF file header machine code (e.g. 0x14c for x86, 0x8664 for x64).
    pub machine: u16,
    /// Optional header magic (0x10B for PE32, 0x20B for PE32+).
    pub optional_magic: u16,
    /// Imported library names, first-reference order, deduplicated.
    pub libraries: Vec<String>,
    /// Imported symbol names in import table order.
    pub symbols: Vec<String>,
    /// Section headers in table order.
    pub sections: Vec<SectionInfo>,
}

/// Summarizes a PE image with the given NT headers layout (PE32 or PE32+).
///
/// Header parsing failures are returned to the caller; a broken import table
/// only degrades `libraries`/`symbols` to empty.
pub(super) fn summarize<Pe: ImageNtHeaders>(data: &[u8]) -> Result<PeSummary> {
    let file = PeFile::<Pe>::parse(data)?;

    let machine = file.nt_headers().file_header().machine.get(LittleEndian);
    let optional_magic = file.nt_headers().optional_header().magic();

    let (libraries, symbols) = collect_imports(&file);
    let sections = collect_sections(&file);

    Ok(PeSummary {
        machine,
        optional_magic,
        libraries,
        symbols,
        sections,
    })
}

fn collect_imports<'data, Pe: ImageNtHeaders>(
    file: &PeFile<'data, Pe>,
) -> (Vec<String>, Vec<String>) {
    let imports = match file.imports() {
        Ok(imports) => imports,
        Err(err) => {
            warn!("Failed to read import table: {err}");
            return (Vec::new(), Vec::new());
        }
    };

    let mut libraries: Vec<String> = Vec::new();
    let mut symbols = Vec::with_capacity(imports.len());

    for import in imports {
        let library = String::from_utf8_lossy(import.library()).into_owned();
        if !libraries.contains(&library) {
            libraries.push(library);
        }
        symbols.push(String::from_utf8_lossy(import.name()).into_owned());
    }

    (libraries, symbols)
}

fn collect_sections<'data, Pe: ImageNtHeaders>(file: &PeFile<'data, Pe>) -> Vec<SectionInfo> {
    file.sections()
        .map(|s| {
            let (file_offset, raw_size) = s.file_range().unwrap_or((0, 0));
            SectionInfo {
                name: String::from_utf8_lossy(s.name_bytes().unwrap_or_default()).into_owned(),
                virtual_address: s.address(),
                virtual_size: s.size(),
                file_offset,
                raw_size,
                characteristics: match s.flags() {
                    SectionFlags::Coff { characteristics } => characteristics,
                    _ => 0,
                },
            }
        })
        .collect()
}
