#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod args;
mod cluster;
pub mod convert;
mod error;

#[cfg(test)]
mod tests;

pub use self::{
    args::Args,
    cluster::Cluster,
    error::{BoxError, Error},
};
pub use istio_ingress_migrator_core as core;
pub use istio_ingress_migrator_k8s_api as k8s;

use tracing::{info, instrument};

/// Looks up Ingress resources.
#[async_trait::async_trait]
pub trait IngressSource {
    async fn get(&self, namespace: &str, name: &str) -> Result<core::IngressSpec, Error>;
}

/// Persists VirtualService resources.
///
/// Implementations must only create: an existing resource with the same
/// identity is reported as [`Error::Conflict`] and left untouched.
#[async_trait::async_trait]
pub trait VirtualServiceSink {
    async fn create(&self, vs: &core::VirtualServiceSpec) -> Result<(), Error>;
}

/// Fetches an Ingress and builds the VirtualService that replaces it.
#[instrument(skip(source))]
pub async fn plan<S>(
    source: &S,
    namespace: &str,
    name: &str,
) -> Result<core::VirtualServiceSpec, Error>
where
    S: IngressSource + ?Sized,
{
    let ingress = source.get(namespace, name).await?;
    info!(rules = ingress.rules.len(), "Fetched Ingress");
    let vs = core::map(ingress)?;
    Ok(vs)
}

/// Replaces an Ingress with a newly created VirtualService.
///
/// Nothing is written unless the Ingress maps cleanly.
#[instrument(skip(source, sink))]
pub async fn migrate<S, K>(
    source: &S,
    sink: &K,
    namespace: &str,
    name: &str,
) -> Result<core::VirtualServiceSpec, Error>
where
    S: IngressSource + ?Sized,
    K: VirtualServiceSink + ?Sized,
{
    let vs = plan(source, namespace, name).await?;
    sink.create(&vs).await?;
    info!(routes = vs.http.len(), "Created VirtualService");
    Ok(vs)
}
