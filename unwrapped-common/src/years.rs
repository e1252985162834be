//! Year discovery
//!
//! Lists the years for which a collection file exists in the data directory.
//! The directory is read fresh on every call; nothing is cached.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::collection::CollectionFile;
use crate::{Error, Result};

/// List year tokens of all collection files in `directory`, newest first
///
/// Only the top level of `directory` is read. Tokens are not validated; see
/// [`compare_year_tokens`] for how non-numeric ones are ordered. An empty
/// result is not an error.
pub fn list_years(directory: &Path) -> Result<Vec<String>> {
    if !directory.exists() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut years = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            debug!("Skipping non UTF-8 entry {:?}", entry.file_name());
            continue;
        };

        if let Some(file) = CollectionFile::from_file_name(&file_name) {
            years.push(file.year);
        }
    }

    years.sort_by(|a, b| compare_year_tokens(b, a));

    if years.is_empty() {
        warn!("No collection files found in {}", directory.display());
    } else {
        debug!("Found {} collection years in {}", years.len(), directory.display());
    }

    Ok(years)
}

/// Ascending order over year tokens
///
/// All-digit tokens are numeric, of any length, and sort by value before any
/// other token. Other tokens (signs, letters, empty) sort lexicographically.
/// Numerically equal tokens (`2020`, `02020`) fall back to string order so
/// the order is total.
pub fn compare_year_tokens(a: &str, b: &str) -> Ordering {
    match (numeric_digits(a), numeric_digits(b)) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Significant digits of an all-digit token
fn numeric_digits(token: &str) -> Option<&str> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.trim_start_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn list_years_with_logs(directory: &Path) -> (Vec<String>, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let years = tracing::subscriber::with_default(subscriber, || list_years(directory))
            .unwrap();
        (years, logs.contents())
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "[]").unwrap();
    }

    #[test]
    fn test_lists_matching_files_descending() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_2019.json");
        touch(&dir, "collection_2020.json");
        touch(&dir, "other.txt");

        let years = list_years(dir.path()).unwrap();
        assert_eq!(years, vec!["2020", "2019"]);
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let years = list_years(dir.path()).unwrap();
        assert!(years.is_empty());
    }

    #[test]
    fn test_empty_result_logs_warning() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "other.txt");

        let (years, logs) = list_years_with_logs(dir.path());
        assert!(years.is_empty());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("No collection files found"));
    }

    #[test]
    fn test_non_empty_result_does_not_warn() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_2020.json");

        let (years, logs) = list_years_with_logs(dir.path());
        assert_eq!(years, vec!["2020"]);
        assert!(!logs.contains("No collection files found"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("public");

        let err = list_years(&missing).unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(ref path) if path == &missing));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_2021.json");
        touch(&dir, "collection_2024.json");
        touch(&dir, "collection_2022.json");

        let first = list_years(dir.path()).unwrap();
        let second = list_years(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["2024", "2022", "2021"]);
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_2020.json");
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("archive").join("collection_2010.json"), "[]").unwrap();

        let years = list_years(dir.path()).unwrap();
        assert_eq!(years, vec!["2020"]);
    }

    #[test]
    fn test_numeric_order_not_lexicographic() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_999.json");
        touch(&dir, "collection_2000.json");

        let years = list_years(dir.path()).unwrap();
        assert_eq!(years, vec!["2000", "999"]);
    }

    #[test]
    fn test_non_numeric_tokens_follow_numeric() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_draft.json");
        touch(&dir, "collection_2023.json");
        touch(&dir, "collection_backup.json");
        touch(&dir, "collection_2024.json");

        let years = list_years(dir.path()).unwrap();
        assert_eq!(years, vec!["2024", "2023", "draft", "backup"]);
    }

    #[test]
    fn test_numeric_tokens_beyond_i64() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "collection_2024.json");
        touch(&dir, "collection_99999999999999999999.json");
        touch(&dir, "collection_draft.json");

        let years = list_years(dir.path()).unwrap();
        assert_eq!(years, vec!["99999999999999999999", "2024", "draft"]);
    }

    #[test]
    fn test_compare_year_tokens() {
        assert_eq!(compare_year_tokens("2020", "2019"), Ordering::Greater);
        assert_eq!(compare_year_tokens("2020", "2020"), Ordering::Equal);
        assert_eq!(compare_year_tokens("draft", "1999"), Ordering::Less);
        assert_eq!(compare_year_tokens("02020", "2020"), Ordering::Less);
        assert_eq!(compare_year_tokens("0999", "2000"), Ordering::Less);
        assert_eq!(compare_year_tokens("", "0"), Ordering::Less);
    }
}
