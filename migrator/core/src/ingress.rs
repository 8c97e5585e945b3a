/// The parts of an Ingress that drive the mapping.
///
/// Fields mirror the Kubernetes resource but make optionality explicit; no
/// validation happens when a value is built. [`crate::map`] rejects inputs
/// that cannot be translated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngressSpec {
    pub name: String,
    pub namespace: String,
    pub rules: Vec<IngressRule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngressRule {
    pub host: Option<String>,
    pub paths: Vec<IngressPath>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngressPath {
    /// The request path of the rule. Routes only match on port, so this is
    /// informational.
    pub path: Option<String>,
    pub backend: Backend,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    Service { name: String, port: ServicePort },
    Resource { kind: String, name: String },
    Missing,
}

/// A service port reference exactly as it appeared on the Ingress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServicePort {
    Number(i32),
    Name(String),
    Unset,
}

// === impl IngressPath ===

impl IngressPath {
    pub fn service(name: impl ToString, port: i32) -> Self {
        Self {
            path: None,
            backend: Backend::Service {
                name: name.to_string(),
                port: ServicePort::Number(port),
            },
        }
    }
}
