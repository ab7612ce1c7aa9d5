use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Failures of the file-import boundary. Whether the parsed value has
/// the right shape is the store's concern, not this module's.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read file: {0}")]
    Read(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads a user-selected file to text and parses it as JSON.
pub fn read_import(path: &Path) -> Result<Value, ImportError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_and_parses_an_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "terms.json", r#"[{"name":"A","category":"C"}]"#);
        let value = read_import(&path).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.json", "[{oops");
        assert!(matches!(read_import(&path), Err(ImportError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(read_import(&path), Err(ImportError::Read(_))));
    }
}
