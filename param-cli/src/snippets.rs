//! Snippet discovery.

use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// One specification snippet to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// File stem, used for the output file name.
    pub name: String,
    /// Trimmed file contents.
    pub text: String,
}

/// Loads the `*.txt` snippets in `dir`.
///
/// Without a selection every snippet is returned in name order. With one,
/// only the selected snippets are returned, in selection order; names with
/// no file are reported in a single warning.
///
/// # Errors
///
/// Returns an error if the directory or a snippet file cannot be read.
pub fn discover(dir: &Path, selected: Option<&[String]>) -> anyhow::Result<Vec<Snippet>> {
    let mut found = BTreeMap::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read snippets directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if selected.is_some_and(|names| !names.iter().any(|n| n == name)) {
            continue;
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snippet {}", path.display()))?;
        found.insert(name.to_string(), text.trim().to_string());
    }

    let Some(names) = selected else {
        return Ok(found
            .into_iter()
            .map(|(name, text)| Snippet { name, text })
            .collect());
    };

    let mut snippets = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match found.remove(name) {
            Some(text) => snippets.push(Snippet {
                name: name.clone(),
                text,
            }),
            None if snippets.iter().any(|s| &s.name == name) => {}
            None => missing.push(name.as_str()),
        }
    }

    if !missing.is_empty() {
        tracing::warn!("Snippet(s) not found - {}", missing.join(", "));
    }
    Ok(snippets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vlen.txt"), "  VLEN is implementation-defined.\n").unwrap();
        std::fs::write(dir.path().join("cache.txt"), "Cache size must be uniform.").unwrap();
        std::fs::write(dir.path().join("notes.md"), "not a snippet").unwrap();
        dir
    }

    #[test]
    fn discovers_all_snippets_in_name_order() {
        let dir = snippet_dir();
        let snippets = discover(dir.path(), None).unwrap();

        let names: Vec<_> = snippets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["cache", "vlen"]);
        assert_eq!(snippets[1].text, "VLEN is implementation-defined.");
    }

    #[test]
    fn selection_keeps_given_order_and_skips_missing() {
        let dir = snippet_dir();
        let selected = ["vlen".to_string(), "absent".to_string(), "cache".to_string()];

        let snippets = discover(dir.path(), Some(&selected[..])).unwrap();

        let names: Vec<_> = snippets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["vlen", "cache"]);
    }

    #[test]
    fn repeated_selection_is_processed_once() {
        let dir = snippet_dir();
        let selected = ["cache".to_string(), "cache".to_string()];

        assert_eq!(discover(dir.path(), Some(&selected[..])).unwrap().len(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nope"), None).is_err());
    }
}
