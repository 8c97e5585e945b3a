//! Conversions between Kubernetes resources and the mapping's data model.

use crate::{
    core,
    k8s::{self, istio},
};

/// Reads the routing-relevant parts of an Ingress.
///
/// This never fails. Missing fields are carried through so that
/// [`core::map`] can report them.
pub fn ingress_spec(ingress: k8s::Ingress) -> core::IngressSpec {
    let k8s::Ingress { metadata, spec, .. } = ingress;
    let rules = spec
        .and_then(|spec| spec.rules)
        .into_iter()
        .flatten()
        .map(ingress_rule)
        .collect();

    core::IngressSpec {
        name: metadata.name.unwrap_or_default(),
        namespace: metadata.namespace.unwrap_or_default(),
        rules,
    }
}

fn ingress_rule(k8s::IngressRule { host, http }: k8s::IngressRule) -> core::IngressRule {
    // A rule without an `http` block contributes no paths.
    let paths = http
        .into_iter()
        .flat_map(|http| http.paths)
        .map(|k8s::HTTPIngressPath { path, backend, .. }| core::IngressPath {
            path,
            backend: backend_ref(backend),
        })
        .collect();
    core::IngressRule { host, paths }
}

fn backend_ref(backend: k8s::IngressBackend) -> core::Backend {
    match backend {
        k8s::IngressBackend {
            service: Some(k8s::IngressServiceBackend { name, port }),
            ..
        } => core::Backend::Service {
            name,
            port: match port {
                Some(k8s::ServiceBackendPort {
                    number: Some(number),
                    ..
                }) => core::ServicePort::Number(number),
                Some(k8s::ServiceBackendPort {
                    name: Some(name), ..
                }) => core::ServicePort::Name(name),
                _ => core::ServicePort::Unset,
            },
        },
        k8s::IngressBackend {
            resource: Some(resource),
            ..
        } => core::Backend::Resource {
            kind: resource.kind,
            name: resource.name,
        },
        _ => core::Backend::Missing,
    }
}

/// Builds the VirtualService resource to submit to the cluster.
pub fn virtual_service(vs: &core::VirtualServiceSpec) -> k8s::VirtualService {
    k8s::VirtualService {
        metadata: k8s::ObjectMeta {
            name: Some(vs.name.clone()),
            namespace: Some(vs.namespace.clone()),
            ..Default::default()
        },
        spec: istio::VirtualServiceSpec {
            hosts: vs.hosts.clone(),
            gateways: vs.gateways.clone(),
            http: vs.http.iter().map(http_route).collect(),
        },
    }
}

/// Renders the VirtualService resource as a YAML manifest.
pub fn manifest(vs: &core::VirtualServiceSpec) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&virtual_service(vs))
}

fn http_route(route: &core::HttpRoute) -> istio::HttpRoute {
    let mut http = istio::HttpRoute {
        name: Some(route.name.clone()),
        matches: vec![istio::HttpMatchRequest {
            port: Some(route.port),
        }],
        ..Default::default()
    };

    match &route.action {
        core::RouteAction::Redirect { scheme } => {
            http.redirect = Some(istio::HttpRedirect {
                scheme: Some(scheme.clone()),
            });
        }
        core::RouteAction::Forward(core::Destination { host, port }) => {
            http.route = vec![istio::HttpRouteDestination {
                destination: istio::Destination {
                    host: host.clone(),
                    port: Some(istio::PortSelector { number: *port }),
                },
            }];
        }
    }

    http
}
