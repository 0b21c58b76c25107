//! Attachment uploads (machine photos, contract documents, receipts, tickets).
//!
//! Files land in `UPLOAD_DIR/<entity>/<id>-<unix ts>-<nonce>-<sanitized name>`
//! and the path relative to `UPLOAD_DIR` is stored on the row. `/uploads`
//! serves the directory back. A row holds at most one file per slot: the file
//! it pointed to before is removed once the new path is saved.

use std::future::Future;
use std::path::Path;

use axum::extract::Multipart;
use faena_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Extensions accepted for photos.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Extensions accepted for documents, receipts and tickets.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "webp"];

/// Longest stem kept from the client's file name.
const MAX_STEM_LEN: usize = 80;

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Pull the required `file` field out of a multipart body. Other fields are ignored.
pub async fn read_file_field(mut multipart: Multipart) -> AppResult<UploadedFile> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some(UploadedFile {
            file_name,
            data: data.to_vec(),
        });
    }

    let upload =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if upload.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    Ok(upload)
}

/// Lower-cased extension of `file_name` if it is in `allowed`.
pub fn validate_extension(file_name: &str, allowed: &[&str]) -> AppResult<String> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if allowed.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::BadRequest(format!(
            "Unsupported file type '.{ext}'. Supported: {}",
            allowed
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Reduce a client file name to `[a-z0-9_-]` plus its extension.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };

    let mut clean: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .take(MAX_STEM_LEN)
        .collect();
    if clean.trim_matches('_').is_empty() {
        clean = "upload".to_string();
    }

    match ext {
        Some(ext) => {
            let ext: String = ext
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect();
            if ext.is_empty() {
                clean
            } else {
                format!("{clean}.{ext}")
            }
        }
        None => clean,
    }
}

/// Write `upload` under `upload_dir/<entity>/` and return the relative path.
pub async fn store(
    upload_dir: &Path,
    entity: &str,
    id: DbId,
    upload: &UploadedFile,
) -> AppResult<String> {
    let dir = upload_dir.join(entity);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let stored_name = format!(
        "{id}-{}-{}-{}",
        chrono::Utc::now().timestamp(),
        &nonce[..8],
        sanitize_file_name(&upload.file_name)
    );
    tokio::fs::write(dir.join(&stored_name), &upload.data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::debug!(entity, id, file = %stored_name, bytes = upload.data.len(), "Stored upload");
    Ok(format!("{entity}/{stored_name}"))
}

/// Delete a previously stored file. A missing file is not an error; other
/// failures are logged and swallowed since the row no longer points there.
pub async fn remove(upload_dir: &Path, relative: &str) {
    if relative.split('/').any(|part| part == ".." || part.is_empty()) {
        tracing::warn!(path = relative, "Refusing to remove suspicious upload path");
        return;
    }
    match tokio::fs::remove_file(upload_dir.join(relative)).await {
        Ok(()) => tracing::debug!(path = relative, "Removed upload"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = relative, error = %e, "Failed to remove upload"),
    }
}

/// Store `upload` and hand its path to `save`, which records it on the row.
///
/// On success the file the row pointed to before (`previous`) is removed.
/// When `save` fails or finds no row, the new file is removed instead.
pub async fn replace<T, F, Fut>(
    upload_dir: &Path,
    entity: &str,
    id: DbId,
    upload: &UploadedFile,
    previous: Option<&str>,
    save: F,
) -> AppResult<Option<T>>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<Option<T>, sqlx::Error>>,
{
    let path = store(upload_dir, entity, id, upload).await?;
    match save(path.clone()).await {
        Ok(Some(row)) => {
            if let Some(old) = previous.filter(|old| *old != path) {
                remove(upload_dir, old).await;
            }
            Ok(Some(row))
        }
        Ok(None) => {
            remove(upload_dir, &path).await;
            Ok(None)
        }
        Err(e) => {
            remove(upload_dir, &path).await;
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(
            sanitize_file_name("../../etc/Boleta Nº 12.PDF"),
            "boleta_n__12.pdf"
        );
        assert_eq!(sanitize_file_name("foto.jpeg"), "foto.jpeg");
    }

    #[test]
    fn sanitize_handles_missing_stem_and_extension() {
        assert_eq!(sanitize_file_name(".png"), "_png");
        assert_eq!(sanitize_file_name("???"), "upload");
        assert_eq!(sanitize_file_name("ticket"), "ticket");
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert_eq!(
            validate_extension("Guia.PDF", DOCUMENT_EXTENSIONS).unwrap(),
            "pdf"
        );
        assert_matches!(
            validate_extension("guia.exe", DOCUMENT_EXTENSIONS),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(
            validate_extension("contrato.pdf", IMAGE_EXTENSIONS),
            Err(AppError::BadRequest(_))
        );
    }

    #[tokio::test]
    async fn store_writes_under_entity_directory() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedFile {
            file_name: "Excavadora 1.png".into(),
            data: vec![1, 2, 3],
        };

        let relative = store(dir.path(), "machines", 7, &upload).await.unwrap();

        assert!(relative.starts_with("machines/7-"));
        assert!(relative.ends_with("-excavadora_1.png"));
        let written = std::fs::read(dir.path().join(&relative)).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    fn upload(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.into(),
            data: data.to_vec(),
        }
    }

    #[tokio::test]
    async fn same_name_twice_gets_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let first = store(dir.path(), "contracts", 3, &upload("c.pdf", b"1")).await.unwrap();
        let second = store(dir.path(), "contracts", 3, &upload("c.pdf", b"2")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn replace_removes_previous_file_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let old = store(dir.path(), "machines", 1, &upload("a.png", b"old")).await.unwrap();

        let saved = replace(
            dir.path(),
            "machines",
            1,
            &upload("b.png", b"new"),
            Some(&old),
            |path| async move { Ok::<_, sqlx::Error>(Some(path)) },
        )
        .await
        .unwrap()
        .unwrap();

        assert!(!dir.path().join(&old).exists());
        assert_eq!(std::fs::read(dir.path().join(&saved)).unwrap(), b"new");
    }

    #[tokio::test]
    async fn replace_discards_new_file_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let old = store(dir.path(), "expenses", 2, &upload("a.pdf", b"old")).await.unwrap();

        let result = replace(
            dir.path(),
            "expenses",
            2,
            &upload("b.pdf", b"new"),
            Some(&old),
            |_path| async { Err::<Option<()>, _>(sqlx::Error::PoolTimedOut) },
        )
        .await;
        assert_matches!(result, Err(AppError::Database(_)));

        let missing = replace(
            dir.path(),
            "expenses",
            2,
            &upload("c.pdf", b"new"),
            Some(&old),
            |_path| async { Ok::<Option<()>, sqlx::Error>(None) },
        )
        .await
        .unwrap();
        assert!(missing.is_none());

        // Only the original file is left.
        let left: Vec<_> = std::fs::read_dir(dir.path().join("expenses"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(left.len(), 1);
        assert!(dir.path().join(&old).exists());
    }

    #[tokio::test]
    async fn remove_ignores_missing_and_traversal_paths() {
        let dir = tempfile::tempdir().unwrap();
        remove(dir.path(), "machines/gone.png").await;
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();
        remove(dir.path(), "machines/../keep.txt").await;
        assert!(dir.path().join("keep.txt").exists());
    }
}
