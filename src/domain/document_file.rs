use bytes::Bytes;

/// A user-supplied document, owned by the pipeline for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub content: Bytes,
}

impl DocumentFile {
    pub fn new(name: String, mime_type: String, content: Bytes) -> Self {
        Self {
            size_bytes: content.len() as u64,
            name,
            mime_type,
            content,
        }
    }

    /// Metadata-only file for an upload whose body was never read.
    pub fn declared(name: String, mime_type: String, size_bytes: u64) -> Self {
        Self {
            name,
            size_bytes,
            mime_type,
            content: Bytes::new(),
        }
    }

    /// Lower-cased text after the last `.`, prefixed with `.`.
    ///
    /// A name without any dot yields the whole name, so `README` becomes `.readme`.
    pub fn extension(&self) -> String {
        let tail = self.name.rsplit('.').next().unwrap_or_default();
        format!(".{}", tail.to_lowercase())
    }

    pub fn is_pdf(&self) -> bool {
        self.extension() == ".pdf"
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// MIME type used for data URIs and uploads when the declared one is blank.
    pub fn effective_mime(&self) -> &str {
        if self.mime_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            &self.mime_type
        }
    }
}
