use crate::{convert, core, k8s, Error, IngressSource, VirtualServiceSink};
use kube::api::{Api, PostParams};
use tokio::time;
use tracing::debug;

/// Reads Ingresses from and writes VirtualServices to a Kubernetes cluster.
#[derive(Clone)]
pub struct Cluster {
    client: kube::Client,
    timeout: time::Duration,
}

// === impl Cluster ===

impl Cluster {
    pub const FIELD_MANAGER: &'static str = "istio-ingress-migrator";

    /// Every API request fails with [`Error::Transport`] if it does not
    /// complete within `timeout`.
    pub fn new(client: kube::Client, timeout: time::Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl IngressSource for Cluster {
    async fn get(&self, namespace: &str, name: &str) -> Result<core::IngressSpec, Error> {
        let api = Api::<k8s::Ingress>::namespaced(self.client.clone(), namespace);
        let ingress = time::timeout(self.timeout, api.get(name))
            .await
            .map_err(|e| Error::Transport(e.into()))?
            .map_err(|e| Error::from_api::<k8s::Ingress>(e, namespace, name))?;
        debug!(?ingress.spec, "Fetched");
        Ok(convert::ingress_spec(ingress))
    }
}

#[async_trait::async_trait]
impl VirtualServiceSink for Cluster {
    async fn create(&self, vs: &core::VirtualServiceSpec) -> Result<(), Error> {
        let api = Api::<k8s::VirtualService>::namespaced(self.client.clone(), &vs.namespace);
        let params = PostParams {
            field_manager: Some(Self::FIELD_MANAGER.to_string()),
            ..PostParams::default()
        };
        let resource = convert::virtual_service(vs);
        let created = time::timeout(self.timeout, api.create(&params, &resource))
            .await
            .map_err(|e| Error::Transport(e.into()))?
            .map_err(|e| Error::from_api::<k8s::VirtualService>(e, &vs.namespace, &vs.name))?;
        debug!(uid = ?created.metadata.uid, "Created");
        Ok(())
    }
}
