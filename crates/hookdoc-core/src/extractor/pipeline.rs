//! Batch extraction pipeline.
//!
//! One project is processed as a single synchronous unit: enumerate, parse
//! each file once (hook detection runs inside the parse), then export. No
//! state is shared across files; the parser instance is the only thing
//! reused.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::HookdocResult;
use crate::export::entities::export_file;
use crate::extractor::filesystem::collect_source_files;
use crate::extractor::parser::{ParsedFile, SourceParser};
use crate::models::FileRecord;

/// Parse every listed file into the pre-export model.
pub fn parse_project(files: &[PathBuf]) -> HookdocResult<Vec<ParsedFile>> {
    let mut parser = SourceParser::new()?;
    files.iter().map(|path| parser.parse_file(path)).collect()
}

/// Parse and export the listed files against the declared project root.
pub fn export_files(root: &Path, files: &[PathBuf]) -> HookdocResult<Vec<FileRecord>> {
    let mut parser = SourceParser::new()?;
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let parsed = parser.parse_file(path)?;
        records.push(export_file(&parsed, root));
    }
    info!(root = %root.display(), files = records.len(), "export complete");
    Ok(records)
}

/// Enumerate, parse and export an entire project rooted at a directory.
pub fn export_project(root: &Path) -> HookdocResult<Vec<FileRecord>> {
    let files = collect_source_files(root)?;
    export_files(root, &files)
}

/// Serialize exported records as pretty-printed JSON.
pub fn write_export<W: Write>(records: &[FileRecord], writer: W) -> HookdocResult<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
