// Splits plain-text note documents into retrievable chunks

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::NoteEntry;
use crate::config::constants::CHUNK_SIZE;

/// Extensions ingestion treats as plain text
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Whether ingestion accepts this file as plain text, by extension.
/// Every ingestion path, disk or upload, goes through the same gate.
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Split text into chunks of at most `size` characters.
///
/// Splitting happens on character boundaries, not bytes, so multi-byte
/// text never lands mid-codepoint. Whitespace-only chunks are dropped.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|c| c.iter().collect::<String>())
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

/// Build note entries for one document. The keyword every chunk shares
/// is the lowercased file stem, so a task naming the document matches.
pub fn entries_from_text(source_name: &str, text: &str) -> Vec<NoteEntry> {
    let keyword = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_name)
        .to_lowercase();
    chunk_text(text, CHUNK_SIZE)
        .into_iter()
        .map(|chunk| NoteEntry::new(&keyword, chunk.trim()))
        .collect()
}

/// Ingest one file from disk
pub fn load_file(path: &Path) -> Result<Vec<NoteEntry>> {
    if !is_text_file(path) {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        bail!(
            "unsupported corpus file type '.{}' for {} (plain text only)",
            ext,
            path.display()
        );
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("corpus");
    Ok(entries_from_text(name, &text))
}

/// Ingest every supported file directly under `dir`, in name order.
/// Unsupported or unreadable files are skipped, not fatal.
pub fn load_dir(dir: &Path) -> Result<Vec<NoteEntry>> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read corpus directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut entries = Vec::new();
    for path in paths {
        match load_file(&path) {
            Ok(mut chunks) => entries.append(&mut chunks),
            Err(err) => debug!(file = %path.display(), error = %err, "skipping corpus file"),
        }
    }
    Ok(entries)
}

/// Ingest a configured corpus path, file or directory
pub fn load_path(path: &Path) -> Result<Vec<NoteEntry>> {
    if path.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── chunking ──────────────────────────────────────────────────────────────

    #[test]
    fn test_chunk_splits_at_size() {
        let text = "a".repeat(1000);
        let chunks = chunk_text(&text, 800);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 800);
        assert_eq!(chunks[1].chars().count(), 200);
    }

    #[test]
    fn test_chunk_short_text_is_single_chunk() {
        let chunks = chunk_text("short note", 800);
        assert_eq!(chunks, vec!["short note".to_string()]);
    }

    #[test]
    fn test_chunk_counts_characters_not_bytes() {
        // Three-byte codepoints; byte-based splitting would panic or tear
        let text = "日".repeat(10);
        let chunks = chunk_text(&text, 4);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "日日日日");
    }

    #[test]
    fn test_chunk_drops_blank_pieces() {
        let chunks = chunk_text("abcd    ", 4);
        assert_eq!(chunks, vec!["abcd".to_string()]);
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("", 800).is_empty());
    }

    // ── entries ───────────────────────────────────────────────────────────────

    #[test]
    fn test_entries_use_lowercased_stem_as_keyword() {
        let entries = entries_from_text("Networking.md", "Layers and protocols.");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].keyword, "networking");
        assert_eq!(entries[0].text, "Layers and protocols.");
    }

    // ── filesystem ────────────────────────────────────────────────────────────

    #[test]
    fn test_text_file_gate_by_extension() {
        assert!(is_text_file(Path::new("notes.txt")));
        assert!(is_text_file(Path::new("Notes.MD")));
        assert!(is_text_file(Path::new("deep/dir/summary.text")));
        assert!(!is_text_file(Path::new("slides.pdf")));
        assert!(!is_text_file(Path::new("data.csv")));
        assert!(!is_text_file(Path::new("README")));
    }

    #[test]
    fn test_load_file_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn test_load_file_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compilers.txt");
        fs::write(&path, "Lexing, parsing, codegen.").unwrap();
        let entries = load_file(&path).unwrap();
        assert_eq!(entries[0].keyword, "compilers");
        assert_eq!(entries[0].text, "Lexing, parsing, codegen.");
    }

    #[test]
    fn test_load_dir_skips_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "First note.").unwrap();
        fs::write(dir.path().join("b.pdf"), b"%PDF-1.4").unwrap();
        fs::write(dir.path().join("c.md"), "Second note.").unwrap();

        let entries = load_dir(dir.path()).unwrap();
        let keywords: Vec<&str> = entries.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["a", "c"]);
    }

    #[test]
    fn test_load_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dir(&dir.path().join("absent")).is_err());
    }
}
