use crate::{convert, Cluster};
use anyhow::Result;
use clap::{builder::NonEmptyStringValueParser, Parser};
use tokio::time;
use tracing::info;

#[derive(Debug, Parser)]
#[clap(
    name = "istio-ingress-migrator",
    version,
    about = "Replaces a Kubernetes Ingress with an Istio VirtualService"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "istio_ingress_migrator=info,warn",
        env = "INGRESS_MIGRATOR_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    /// Namespace of the Ingress
    #[clap(
        long,
        short = 'n',
        default_value = "default",
        value_parser = NonEmptyStringValueParser::new()
    )]
    namespace: String,

    /// Name of the Ingress to replace
    #[clap(
        long = "ingressname",
        short = 'i',
        value_parser = NonEmptyStringValueParser::new()
    )]
    ingress_name: String,

    /// Print the VirtualService as YAML instead of creating it
    #[clap(long)]
    dry_run: bool,

    /// Timeout for each Kubernetes API request
    #[clap(long, default_value = "10000")]
    api_timeout_ms: u64,
}

// === impl Args ===

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            client,
            namespace,
            ingress_name,
            dry_run,
            api_timeout_ms,
        } = self;

        log_format.try_init(log_level)?;

        let client = client.try_client().await?;
        let cluster = Cluster::new(client, time::Duration::from_millis(api_timeout_ms));

        if dry_run {
            let vs = crate::plan(&cluster, &namespace, &ingress_name).await?;
            print!("{}", convert::manifest(&vs)?);
            return Ok(());
        }

        let vs = crate::migrate(&cluster, &cluster, &namespace, &ingress_name).await?;
        info!(%vs.namespace, %vs.name, "Migrated");
        println!(
            "Successfully created VirtualService {} in namespace {}",
            vs.name, vs.namespace
        );
        Ok(())
    }
}
