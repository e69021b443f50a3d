//! File output for documents and export records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Serialization format for a parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML with a document start marker.
    Yaml,
}

impl OutputFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render a value in the given format.
///
/// # Errors
/// Returns an error if the value cannot be serialized.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => format!("---\n{}", serde_yaml_ng::to_string(value)?),
    })
}

/// Write a file atomically: temp file, sync, rename.
///
/// A crash mid-write leaves any existing file untouched.
fn write_atomic(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let result = write_temp(&temp_path, write).and_then(|()| replace(&temp_path, path));
    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
        }
    }
    result
}

fn write_temp(
    temp_path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<()>,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(temp_path)?);
    write(&mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn replace(temp_path: &Path, path: &Path) -> Result<()> {
    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(temp_path, path)?;
    Ok(())
}

/// Write a value to a file in the given format.
///
/// # Errors
/// Returns an error if serialization or any file operation fails.
pub fn write_document<T: Serialize>(value: &T, path: &Path, format: OutputFormat) -> Result<()> {
    let content = render(value, format)?;
    write_atomic(path, |w| Ok(w.write_all(content.as_bytes())?))
}

/// Write records as JSON Lines, one compact object per line.
///
/// Returns the number of records written.
///
/// # Errors
/// Returns an error if serialization or any file operation fails.
pub fn write_jsonl<'a, T, I>(records: I, path: &Path) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut count = 0;
    write_atomic(path, |w| {
        for record in records {
            serde_json::to_writer(&mut *w, record)?;
            w.write_all(b"\n")?;
            count += 1;
        }
        Ok(())
    })?;
    Ok(count)
}

/// Build `{dir}/{prefix}{stem}.{extension}`.
#[must_use]
pub fn output_path(dir: &Path, prefix: &str, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{prefix}{stem}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qanun_parser::parse_document;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_render_json_keeps_arabic() {
        let doc = parse_document("المادة 1\nنص");
        let json = render(&doc, OutputFormat::Json).unwrap();

        assert!(json.contains("\"topLevelArticles\""));
        assert!(json.contains("المادة 1"));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_render_yaml() {
        let doc = parse_document("المادة 1\nنص");
        let yaml = render(&doc, OutputFormat::Yaml).unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("topLevelArticles:"));
    }

    #[test]
    fn test_write_document_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "old").unwrap();

        write_document(&parse_document("المادة 1"), &path, OutputFormat::Json).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("المادة 1"));
        assert!(!dir.path().join(".doc.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        // JSON object keys must be strings
        let records = vec![BTreeMap::from([((1, 2), 3)])];

        let result = write_jsonl(&records, &path);

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(!dir.path().join(".records.jsonl.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory in the way makes the rename fail
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), "x").unwrap();

        let result = write_document(&vec!["أ"], &path, OutputFormat::Json);

        assert!(result.is_err());
        assert!(!dir.path().join(".taken.tmp").exists());
    }

    #[test]
    fn test_write_jsonl_one_record_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        let records = vec![vec!["أ".to_string()], vec!["ب".to_string(), "ج".to_string()]];

        let count = write_jsonl(&records, &path).unwrap();

        assert_eq!(count, 2);
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![r#"["أ"]"#, r#"["ب","ج"]"#]);
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), "graph_", "output1", "json");
        assert_eq!(path, Path::new("out").join("graph_output1.json"));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Yaml.extension(), "yaml");
    }
}
