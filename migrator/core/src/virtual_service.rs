use std::fmt;

/// An Istio VirtualService as produced by [`crate::map`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VirtualServiceSpec {
    pub name: String,
    pub namespace: String,
    pub hosts: Vec<String>,
    pub gateways: Vec<String>,

    /// Routes in evaluation order.
    pub http: Vec<HttpRoute>,
}

/// A single route that matches requests arriving on `port`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRoute {
    pub name: String,
    pub port: u32,
    pub action: RouteAction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteAction {
    Redirect { scheme: String },
    Forward(Destination),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub host: String,
    pub port: u32,
}

// === impl VirtualServiceSpec ===

impl VirtualServiceSpec {
    /// Name of the gateway, in the Ingress' namespace, that every generated
    /// VirtualService is bound to.
    pub const GATEWAY_NAME: &'static str = "ingressgateway";
}

// === impl HttpRoute ===

impl HttpRoute {
    pub const HTTP_PORT: u32 = 80;
    pub const HTTPS_PORT: u32 = 443;

    pub const REDIRECT_NAME: &'static str = "http-to-https";

    // Every forwarding route shares this name regardless of its backend.
    pub const FORWARD_NAME: &'static str = "pos-bff-service";

    /// Redirects plaintext requests to HTTPS.
    pub fn https_redirect() -> Self {
        Self {
            name: Self::REDIRECT_NAME.to_string(),
            port: Self::HTTP_PORT,
            action: RouteAction::Redirect {
                scheme: "https".to_string(),
            },
        }
    }

    /// Sends HTTPS requests to `destination`.
    pub fn forward(destination: Destination) -> Self {
        Self {
            name: Self::FORWARD_NAME.to_string(),
            port: Self::HTTPS_PORT,
            action: RouteAction::Forward(destination),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.action, RouteAction::Redirect { .. })
    }
}

// === impl Destination ===

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
