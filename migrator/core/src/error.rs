/// Reasons an Ingress cannot be expressed as a VirtualService.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("ingress is missing required field `{field}`")]
    MalformedInput { field: String },

    #[error("ingress backend `{field}` cannot be routed by a VirtualService: {reason}")]
    UnsupportedBackend { field: String, reason: String },
}

impl MappingError {
    pub(crate) fn malformed(field: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
        }
    }

    pub(crate) fn unsupported(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedBackend {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
