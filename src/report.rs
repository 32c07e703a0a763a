//! The aggregated per-file report and its plain-text rendering.

use crate::binary::SectionInfo;
use crate::classifier::Verdict;
use object::pe::{
    IMAGE_FILE_MACHINE_AMD64, IMAGE_FILE_MACHINE_I386, IMAGE_NT_OPTIONAL_HDR32_MAGIC,
    IMAGE_NT_OPTIONAL_HDR64_MAGIC,
};
use serde::Serialize;
use std::fmt;

/// Executable kind derived from the COFF machine code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    #[serde(rename = "Win32 Exe")]
    Win32Exe,
    #[serde(rename = "Win64 Exe")]
    Win64Exe,
    Unknown,
}

impl FileType {
    /// Maps a machine code to an executable kind. Machine codes outside the
    /// x86/x64 pair report as [`FileType::Unknown`] rather than failing.
    pub fn from_machine(machine: u16) -> Self {
        match machine {
            IMAGE_FILE_MACHINE_I386 => FileType::Win32Exe,
            IMAGE_FILE_MACHINE_AMD64 => FileType::Win64Exe,
            _ => FileType::Unknown,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileType::Win32Exe => "Win32 Exe",
            FileType::Win64Exe => "Win64 Exe",
            FileType::Unknown => "Unknown",
        })
    }
}

/// Image layout derived from the optional header magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Magic {
    #[serde(rename = "PE32")]
    Pe32,
    #[serde(rename = "PE32P")]
    Pe32Plus,
    Unknown,
}

impl Magic {
    /// Maps an optional header magic value. Values outside the known set map
    /// to [`Magic::Unknown`]; this is graceful degradation, not an error.
    pub fn from_optional_header(magic: u16) -> Self {
        match magic {
            IMAGE_NT_OPTIONAL_HDR32_MAGIC => Magic::Pe32,
            IMAGE_NT_OPTIONAL_HDR64_MAGIC => Magic::Pe32Plus,
            _ => Magic::Unknown,
        }
    }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Magic::Pe32 => "PE32",
            Magic::Pe32Plus => "PE32P",
            Magic::Unknown => "Unknown",
        })
    }
}

/// Descriptive metadata for one analyzed PE file.
///
/// Built once by [`crate::Analyzer::analyze`], then only read. `classification`
/// stays `None` when the classifier was not invoked or failed; formatters must
/// render that as absent, not as a negative verdict.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: String,
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
    pub file_type: FileType,
    pub magic: Magic,
    pub file_size: u64,
    pub libraries: Vec<String>,
    pub symbols: Vec<String>,
    pub sections: Vec<SectionInfo>,
    pub classification: Option<Verdict>,
}

impl fmt::Display for Report {
    /// Fixed-width label/value lines suitable for terminal output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---Basic Info---")?;
        writeln!(f, "{:<15}{}", "MD5 Hash: ", self.md5)?;
        writeln!(f, "{:<15}{}", "SHA1 Hash: ", self.sha1)?;
        writeln!(f, "{:<15}{}", "SHA256 Hash: ", self.sha256)?;
        writeln!(f, "{:<15}{}", "File Type: ", self.file_type)?;
        writeln!(f, "{:<15}{}", "Magic: ", self.magic)?;
        write!(f, "{:<15}{}", "File Size: ", self.file_size)
    }
}
