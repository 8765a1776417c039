/// The host record an uploaded document is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerReference {
    pub entity_type: String,
    pub id: String,
}

impl OwnerReference {
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Record id without the surrounding braces some hosts add.
    pub fn bare_id(&self) -> &str {
        self.id.trim_start_matches('{').trim_end_matches('}')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentId(pub String);

impl AttachmentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
