use std::path::Path;

use uuid::Uuid;

use crate::completion::AudioInput;
use crate::types::{Attachment, AttachmentKind};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A file the user picked, held in memory until it is sent or removed.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub kind: AttachmentKind,
    pub size_label: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = mime.into();
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            kind: AttachmentKind::from_mime(&mime),
            size_label: size_label(bytes.len() as u64),
            mime,
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_audio(&self) -> bool {
        self.kind == AttachmentKind::Audio
    }

    pub fn attachment(&self) -> Attachment {
        Attachment {
            kind: self.kind,
            name: self.name.clone(),
            size_bytes: self.size_bytes(),
        }
    }

    pub fn audio_input(&self) -> AudioInput<'_> {
        AudioInput {
            file_name: &self.name,
            mime: &self.mime,
            bytes: &self.bytes,
        }
    }
}

pub fn size_label(size_bytes: u64) -> String {
    format!("{:.1} MB", size_bytes as f64 / BYTES_PER_MB)
}

/// MIME type from a file extension, for files opened from disk.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "webm" => "audio/webm",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Files waiting to be sent, in the order they were added.
#[derive(Debug, Default)]
pub struct UploadTray {
    files: Vec<UploadedFile>,
}

impl UploadTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: UploadedFile) -> &UploadedFile {
        self.files.push(file);
        &self.files[self.files.len() - 1]
    }

    pub fn remove(&mut self, id: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|file| file.id == id)?;
        Some(self.files.remove(index))
    }

    /// Id of the file at a zero-based tray position.
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.files.get(index).map(|file| file.id.as_str())
    }

    /// Empty the tray, returning files in insertion order.
    pub fn drain(&mut self) -> Vec<UploadedFile> {
        std::mem::take(&mut self.files)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
