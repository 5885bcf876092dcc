use crate::fetch::error::FetchError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::task;

pub(crate) const UTF8_BOM: &str = "\u{feff}";

/// Writes `text` to `path` as UTF-8 with a byte-order mark, creating parent
/// directories. A body that already starts with a BOM is not given a second
/// one.
///
/// The page is written to a temporary file next to `path` and renamed into
/// place, so a failed write never leaves a partial file at `path`.
pub(crate) async fn write_with_bom(path: &Path, text: &str) -> Result<(), FetchError> {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| FetchError::CacheDirCreation(parent.to_path_buf(), e))?;

    let body = text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string();
    let parent = parent.to_path_buf();
    let path = path.to_path_buf();

    task::spawn_blocking(move || {
        let write_error = |e| FetchError::CacheWrite(path.clone(), e);
        let mut temp_file = NamedTempFile::new_in(&parent).map_err(write_error)?;
        temp_file
            .write_all(UTF8_BOM.as_bytes())
            .map_err(write_error)?;
        temp_file.write_all(body.as_bytes()).map_err(write_error)?;
        temp_file.flush().map_err(write_error)?;
        // On failure the temporary file is dropped, which deletes it.
        temp_file.persist(&path).map_err(|e| write_error(e.error))?;
        Ok::<(), FetchError>(())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn creates_parents_and_prefixes_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.html");
        write_with_bom(&path, "<html/>").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\xef\xbb\xbf<html/>");
        assert_eq!(entries(&dir.path().join("a/b")), vec!["c.html"]);
    }

    #[tokio::test]
    async fn keeps_single_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        write_with_bom(&path, "\u{feff}<html/>").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\xef\xbb\xbf<html/>");
    }

    #[tokio::test]
    async fn truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        write_with_bom(&path, "a much longer first body").await.unwrap();
        write_with_bom(&path, "short").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\u{feff}short");
        assert_eq!(entries(dir.path()), vec!["page.html"]);
    }

    #[tokio::test]
    async fn failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory sits where the page should go, so the final
        // rename fails after the body has been written.
        let path = dir.path().join("page.html");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = write_with_bom(&path, "<html/>").await;
        assert!(matches!(result, Err(FetchError::CacheWrite(ref p, _)) if *p == path));
        assert_eq!(entries(dir.path()), vec!["page.html"]);
        assert!(path.is_dir());
        assert_eq!(entries(&path), vec!["keep"]);
    }
}
