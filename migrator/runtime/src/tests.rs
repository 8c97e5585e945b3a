use crate::{
    core::{self, IngressPath, IngressRule, IngressSpec, MappingError},
    migrate, plan, Error, IngressSource, VirtualServiceSink,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;

type Key = (String, String);

/// An in-memory stand-in for the Kubernetes API.
#[derive(Default)]
struct FakeCluster {
    ingresses: BTreeMap<Key, IngressSpec>,
    virtual_services: Mutex<BTreeMap<Key, core::VirtualServiceSpec>>,
    creates: Mutex<usize>,
    unreachable: bool,
}

impl FakeCluster {
    fn with_ingress(mut self, ingress: IngressSpec) -> Self {
        let key = (ingress.namespace.clone(), ingress.name.clone());
        self.ingresses.insert(key, ingress);
        self
    }

    fn created(&self, ns: &str, name: &str) -> Option<core::VirtualServiceSpec> {
        self.virtual_services
            .lock()
            .get(&(ns.to_string(), name.to_string()))
            .cloned()
    }
}

#[async_trait::async_trait]
impl IngressSource for FakeCluster {
    async fn get(&self, namespace: &str, name: &str) -> Result<IngressSpec, Error> {
        if self.unreachable {
            return Err(Error::Transport("connection refused".into()));
        }
        self.ingresses
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: "Ingress".to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl VirtualServiceSink for FakeCluster {
    async fn create(&self, vs: &core::VirtualServiceSpec) -> Result<(), Error> {
        *self.creates.lock() += 1;
        let key = (vs.namespace.clone(), vs.name.clone());
        let mut virtual_services = self.virtual_services.lock();
        if virtual_services.contains_key(&key) {
            return Err(Error::Conflict {
                kind: "VirtualService".to_string(),
                namespace: key.0,
                name: key.1,
            });
        }
        virtual_services.insert(key, vs.clone());
        Ok(())
    }
}

fn mk_shop() -> IngressSpec {
    IngressSpec {
        name: "shop".to_string(),
        namespace: "prod".to_string(),
        rules: vec![IngressRule {
            host: Some("shop.example.com".to_string()),
            paths: vec![
                IngressPath::service("cart", 8080),
                IngressPath::service("catalog", 8081),
            ],
        }],
    }
}

#[tokio::test]
async fn creates_virtual_service() {
    let cluster = FakeCluster::default().with_ingress(mk_shop());

    let vs = migrate(&cluster, &cluster, "prod", "shop")
        .await
        .expect("migration must succeed");

    assert_eq!(vs.hosts, vec!["shop.example.com".to_string()]);
    assert_eq!(vs.gateways, vec!["prod/ingressgateway".to_string()]);
    assert_eq!(vs.http.len(), 3);
    assert_eq!(cluster.created("prod", "shop"), Some(vs));
}

#[tokio::test]
async fn second_create_conflicts() {
    let cluster = FakeCluster::default().with_ingress(mk_shop());

    migrate(&cluster, &cluster, "prod", "shop")
        .await
        .expect("first migration must succeed");
    let err = migrate(&cluster, &cluster, "prod", "shop")
        .await
        .expect_err("second migration must fail");

    assert!(matches!(err, Error::Conflict { .. }), "{err}");
    assert_eq!(*cluster.creates.lock(), 2);
}

#[tokio::test]
async fn missing_ingress() {
    let cluster = FakeCluster::default();

    let err = migrate(&cluster, &cluster, "prod", "shop")
        .await
        .expect_err("migration must fail");

    assert_eq!(err.to_string(), "Ingress prod/shop not found");
    assert_eq!(*cluster.creates.lock(), 0);
}

#[tokio::test]
async fn malformed_ingress_is_never_created() {
    let cluster = FakeCluster::default().with_ingress(IngressSpec {
        name: "empty".to_string(),
        namespace: "prod".to_string(),
        rules: vec![],
    });

    let err = migrate(&cluster, &cluster, "prod", "empty")
        .await
        .expect_err("migration must fail");

    assert!(
        matches!(
            &err,
            Error::Mapping(MappingError::MalformedInput { field }) if field == "spec.rules"
        ),
        "{err}"
    );
    assert_eq!(*cluster.creates.lock(), 0);
    assert_eq!(cluster.created("prod", "empty"), None);
}

#[tokio::test]
async fn transport_failures_propagate() {
    let cluster = FakeCluster {
        unreachable: true,
        ..FakeCluster::default()
    };

    let err = migrate(&cluster, &cluster, "prod", "shop")
        .await
        .expect_err("migration must fail");

    assert_eq!(
        err.to_string(),
        "kubernetes API request failed: connection refused"
    );
    assert_eq!(*cluster.creates.lock(), 0);
}

#[tokio::test]
async fn plan_does_not_create() {
    let cluster = FakeCluster::default().with_ingress(mk_shop());

    let vs = plan(&cluster, "prod", "shop").await.expect("plan must succeed");

    assert!(vs.http[0].is_redirect());
    assert_eq!(*cluster.creates.lock(), 0);
}
