use crate::core::MappingError;
use kube::Resource;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    #[error("{kind} {namespace}/{name} already exists")]
    Conflict {
        kind: String,
        namespace: String,
        name: String,
    },

    #[error("kubernetes API request failed: {0}")]
    Transport(BoxError),
}

// === impl Error ===

impl Error {
    /// Classifies a failed request for the `K` resource `namespace/name`.
    pub(crate) fn from_api<K>(error: kube::Error, namespace: &str, name: &str) -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        match error {
            kube::Error::Api(ref rsp) if rsp.code == 404 => Self::NotFound {
                kind: K::kind(&()).to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            kube::Error::Api(ref rsp) if rsp.code == 409 => Self::Conflict {
                kind: K::kind(&()).to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            error => Self::Transport(error.into()),
        }
    }
}
