//! Loading upload attachments from disk

use std::path::Path;

use partnerdesk_domain::{FileAttachment, PartnerDeskError, Result};

/// Read `path` into a [`FileAttachment`], guessing the MIME type from the
/// extension (`application/octet-stream` when unknown).
///
/// # Errors
/// Returns `PartnerDeskError::Validation` naming the file when it cannot be
/// read.
pub async fn load_attachment(path: &Path) -> Result<FileAttachment> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            PartnerDeskError::validation("file", format!("Not a file: {}", path.display()))
        })?;

    let bytes = tokio::fs::read(path).await.map_err(|err| {
        PartnerDeskError::validation(
            file_name.clone(),
            format!("Cannot read {}: {err}", path.display()),
        )
    })?;

    Ok(FileAttachment::new(file_name, guess_content_type(path), bytes))
}

/// Load every path in order, failing on the first unreadable file.
pub async fn load_attachments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FileAttachment>> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in paths {
        attachments.push(load_attachment(path.as_ref()).await?);
    }
    Ok(attachments)
}

fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}
