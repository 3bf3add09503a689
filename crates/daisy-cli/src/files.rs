use daisy_core::upload::{UploadedFile, guess_mime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Largest file accepted into the upload tray. Matches the transcription
/// endpoint's request limit.
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Expand a leading `~/` using HOME.
pub fn expand_home(input: &str) -> PathBuf {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(input)
}

/// Read a file from disk into an upload, with its MIME type guessed from the extension.
pub fn read_upload(path: &Path) -> io::Result<UploadedFile> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        ));
    }
    if metadata.len() > MAX_UPLOAD_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is larger than 25 MB", path.display()),
        ));
    }
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(UploadedFile::new(name, guess_mime(path), bytes))
}
