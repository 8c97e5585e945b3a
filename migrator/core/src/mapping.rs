use crate::{
    Backend, Destination, HttpRoute, IngressPath, IngressSpec, MappingError, ServicePort,
    VirtualServiceSpec,
};
use tracing::debug;

/// Builds the VirtualService that replaces `ingress`.
///
/// The first route always redirects plaintext traffic to HTTPS. It is
/// followed by one forwarding route per Ingress path, in the order the paths
/// appear across all rules. Only the first rule's host is kept.
pub fn map(ingress: IngressSpec) -> Result<VirtualServiceSpec, MappingError> {
    let IngressSpec {
        name,
        namespace,
        rules,
    } = ingress;

    if name.is_empty() {
        return Err(MappingError::malformed("metadata.name"));
    }
    if namespace.is_empty() {
        return Err(MappingError::malformed("metadata.namespace"));
    }

    let host = match rules.first() {
        None => return Err(MappingError::malformed("spec.rules")),
        Some(rule) => match rule.host.as_deref() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(MappingError::malformed("spec.rules[0].host")),
        },
    };

    let mut http = Vec::with_capacity(1 + rules.iter().map(|r| r.paths.len()).sum::<usize>());
    http.push(HttpRoute::https_redirect());

    for (i, rule) in rules.iter().enumerate() {
        for (j, path) in rule.paths.iter().enumerate() {
            let field = format!("spec.rules[{i}].http.paths[{j}].backend");
            let dst = destination(path, &field)?;
            debug!(path = ?path.path, %dst, "Routing");
            http.push(HttpRoute::forward(dst));
        }
    }

    let gateways = vec![format!("{namespace}/{}", VirtualServiceSpec::GATEWAY_NAME)];
    Ok(VirtualServiceSpec {
        name,
        namespace,
        hosts: vec![host],
        gateways,
        http,
    })
}

fn destination(path: &IngressPath, field: &str) -> Result<Destination, MappingError> {
    let (name, port) = match &path.backend {
        Backend::Service { name, port } => (name, port),
        Backend::Resource { kind, name } => {
            return Err(MappingError::unsupported(
                field,
                format!("{kind} {name} is not a service"),
            ))
        }
        Backend::Missing => {
            return Err(MappingError::unsupported(field, "backend has no service"))
        }
    };

    if name.is_empty() {
        return Err(MappingError::malformed(format!("{field}.service.name")));
    }

    let port = match port {
        ServicePort::Number(n) => u16::try_from(*n)
            .ok()
            .filter(|p| *p != 0)
            .map(u32::from)
            .ok_or_else(|| MappingError::malformed(format!("{field}.service.port.number")))?,
        ServicePort::Name(port) => {
            return Err(MappingError::unsupported(
                field,
                format!("named port {port:?} must be a port number"),
            ))
        }
        ServicePort::Unset => {
            return Err(MappingError::malformed(format!(
                "{field}.service.port.number"
            )))
        }
    };

    Ok(Destination {
        host: name.clone(),
        port,
    })
}
