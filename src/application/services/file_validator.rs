use crate::domain::{AnalyzerConfig, DocumentFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub reason: Option<String>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    fn invalid(reason: String) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
        }
    }
}

/// Checks extension, then size. Looks at metadata only, never at the content.
pub fn validate_file(file: &DocumentFile, config: &AnalyzerConfig) -> ValidationResult {
    let extension = file.extension();
    if !config.accepted_file_types.contains(&extension) {
        return ValidationResult::invalid(format!(
            "File type {} is not accepted. Please upload: {}",
            extension,
            config.accepted_file_types.join(", ")
        ));
    }

    let size_mb = file.size_mb();
    if size_mb > config.max_file_size_mb {
        return ValidationResult::invalid(format!(
            "File size ({:.2}MB) exceeds maximum allowed size of {}MB",
            size_mb, config.max_file_size_mb
        ));
    }

    ValidationResult::valid()
}
