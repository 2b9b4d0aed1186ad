use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::Utc;
use rocket::fs::TempFile;
use rocket::http::ContentType;

use crate::config::UploadConfig;
use crate::model::error::upload_errors::UploadError;
use crate::model::file_types::ImageType;
use crate::model::response::upload_responses::{StoredFile, UploadedImages};
use crate::repository::folder_repository;
use crate::service::folder_service::sanitize_folder_name;

/// what we know about an uploaded file before it's written anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    /// the file name the client sent, without any directories
    pub original_name: String,
    /// a file name stem that's safe to use on disk
    pub stem: String,
    /// the extension as the client sent it, without the leading `.`
    pub extension: Option<String>,
    pub content_type: Option<ContentType>,
    pub size: u64,
}

impl ImagePart {
    pub fn from_temp_file(file: &TempFile<'_>) -> ImagePart {
        let original_name = file
            .raw_name()
            .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str())
            .and_then(|raw| Path::new(raw).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let path = Path::new(&original_name);
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_string);
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        ImagePart {
            stem: sanitize_file_stem(stem),
            extension,
            content_type: file.content_type().cloned(),
            size: file.len(),
            original_name,
        }
    }
}

/// keeps the client's stem as-is apart from path separators, control characters and leading dots.
/// Falls back to `image` if nothing is left
pub fn sanitize_file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .filter(|c| !matches!(c, '/' | '\\') && !c.is_control())
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').trim();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// checks the whole batch before anything gets written, so that a bad part fails the entire upload
pub fn validate_parts(parts: &[ImagePart], limits: &UploadConfig) -> Result<(), UploadError> {
    if parts.is_empty() {
        return Err(UploadError::NoFiles);
    }
    if parts.len() > limits.max_files_per_request {
        return Err(UploadError::TooManyFiles(parts.len()));
    }
    for part in parts {
        let extension_ok = part
            .extension
            .as_deref()
            .and_then(ImageType::from_extension)
            .is_some();
        let content_type_ok = part
            .content_type
            .as_ref()
            .and_then(ImageType::from_content_type)
            .is_some();
        if !extension_ok || !content_type_ok {
            return Err(UploadError::UnsupportedType(part.original_name.clone()));
        }
        if part.size > limits.max_file_size_bytes {
            return Err(UploadError::FileTooLarge(part.original_name.clone()));
        }
    }
    Ok(())
}

/// `{stem}_{millis}.{extension}`
pub fn stored_file_name(stem: &str, extension: Option<&str>, millis: i64) -> String {
    match extension {
        Some(extension) => format!("{stem}_{millis}.{extension}"),
        None => format!("{stem}_{millis}"),
    }
}

/// claims a file name in `dir` by creating an empty file there. If the name for the current millisecond is
/// taken, the next millisecond is tried until a free one is found
pub fn reserve_destination(
    dir: &Path,
    stem: &str,
    extension: Option<&str>,
) -> io::Result<(String, PathBuf)> {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let name = stored_file_name(stem, extension, millis);
        let path = dir.join(&name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => return Ok((name, path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => millis += 1,
            Err(e) => return Err(e),
        }
    }
}

/// validates and writes every file into the folder, creating the folder's directory if needed
pub async fn upload_images(
    folder_name: &str,
    files: &mut [TempFile<'_>],
    limits: &UploadConfig,
) -> Result<UploadedImages, UploadError> {
    let folder = sanitize_folder_name(folder_name);
    if folder.is_empty() {
        return Err(UploadError::InvalidName);
    }
    let parts: Vec<ImagePart> = files.iter().map(ImagePart::from_temp_file).collect();
    validate_parts(&parts, limits)?;
    let dir = folder_repository::create_folder_if_missing(&folder).map_err(|e| {
        log::error!("Failed to create folder {folder} for upload! Error is {e:?}");
        UploadError::FileSystemFailure
    })?;
    let mut stored = Vec::with_capacity(parts.len());
    let mut written: Vec<PathBuf> = Vec::with_capacity(parts.len());
    for (file, part) in files.iter_mut().zip(parts) {
        let (stored_name, destination) =
            match reserve_destination(&dir, &part.stem, part.extension.as_deref()) {
                Ok(reserved) => reserved,
                Err(e) => {
                    log::error!("Failed to reserve a file name in {folder}! Error is {e:?}");
                    discard_files(&written);
                    return Err(UploadError::FileSystemFailure);
                }
            };
        written.push(destination.clone());
        if let Err(e) = file.move_copy_to(&destination).await {
            log::error!(
                "Failed to write {} to {}! Error is {e:?}",
                part.original_name,
                destination.display()
            );
            discard_files(&written);
            return Err(UploadError::FileSystemFailure);
        }
        stored.push(StoredFile {
            url: folder_repository::image_url(&folder, &stored_name),
            original_name: part.original_name,
            stored_name,
            size: part.size,
        });
    }
    log::info!("Uploaded {} images into folder {folder}", stored.len());
    Ok(UploadedImages {
        message: format!("Uploaded {} files", stored.len()),
        files: stored,
        folder,
    })
}

/// removes files already written by a batch that failed partway through
fn discard_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Failed to remove {} after a failed upload: {e:?}", path.display());
        }
    }
}
