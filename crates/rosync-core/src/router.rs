// ── Router handle ──
//
// Owns the gateway for one router and hands out the components that work
// against it. Opened once at startup, closed on shutdown; nothing is
// process-global.

use rosync_api::{Credentials, Gateway, RestGateway, TlsMode, TransportConfig};
use tracing::{debug, info};

use crate::address_list::AddressListManager;
use crate::config::{DeviceConfig, TlsVerification};
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::model::{Annotation, Identity};
use crate::reconcile::Reconciler;
use crate::snmp;

/// The main entry point for consumers.
///
/// Generic over the gateway so tests can drive it with a scripted one.
/// Operations run one at a time; the handle does no locking of its own.
pub struct Router<G = RestGateway> {
    gateway: G,
    annotation: Annotation,
    identity: Option<Identity>,
}

impl Router<RestGateway> {
    /// Build a REST gateway from `config` and verify it by reading the
    /// router identity.
    ///
    /// Bad credentials or an unreachable router fail here rather than on
    /// the first real operation.
    pub async fn connect(config: &DeviceConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let gateway = RestGateway::new(config.url.clone(), credentials, &transport)?;

        let mut router = Self::with_gateway(gateway).annotated(config.annotation.clone());
        let identity = router.fetcher().identity().await?;
        info!(router = %identity.name, url = %config.url, "connected");
        router.identity = Some(identity);
        Ok(router)
    }
}

impl<G: Gateway> Router<G> {
    /// Wrap an already-built gateway without probing it.
    pub fn with_gateway(gateway: G) -> Self {
        Self {
            gateway,
            annotation: Annotation::default(),
            identity: None,
        }
    }

    /// Labels attached to secrets returned by [`secrets`](Self::secrets).
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Identity read during [`connect`](Router::connect), if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    // ── Components ───────────────────────────────────────────────

    pub fn fetcher(&self) -> Fetcher<'_, G> {
        Fetcher::new(&self.gateway)
    }

    pub fn reconciler(&self) -> Reconciler<'_, G> {
        Reconciler::new(&self.gateway)
    }

    pub fn address_lists(&self) -> AddressListManager<'_, G> {
        AddressListManager::new(&self.gateway)
    }

    // ── Convenience ──────────────────────────────────────────────

    /// Secrets labelled with this handle's annotation.
    pub async fn secrets(&self) -> Result<Vec<crate::model::Secret>, CoreError> {
        self.fetcher().secrets(&self.annotation).await
    }

    pub async fn enable_snmp(&self) -> Result<(), CoreError> {
        snmp::enable_snmp(&self.gateway).await
    }

    /// Release the gateway.
    pub fn close(self) {
        debug!("router handle closed");
    }
}

fn build_transport(config: &DeviceConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::command;
    use crate::testing::{ScriptedGateway, record};

    #[tokio::test]
    async fn secrets_use_handle_annotation() {
        let gw = ScriptedGateway::new()
            .with_rows(command::SECRET_PRINT, vec![record(&[("name", "u1")])]);
        let router = Router::with_gateway(gw)
            .annotated(Annotation::new(Some("10.0.0.1".into()), Some("west".into())));

        let secrets = router.secrets().await.unwrap();

        assert_eq!(secrets[0].bts.as_deref(), Some("west"));
        assert!(router.identity().is_none());
    }

    #[tokio::test]
    async fn components_share_one_gateway() {
        let gw = ScriptedGateway::new();
        let router = Router::with_gateway(gw);

        router.reconciler().sync_caller_id().await.unwrap();
        router.enable_snmp().await.unwrap();

        let paths: Vec<String> = router
            .gateway()
            .sent()
            .iter()
            .map(|c| c.path().to_owned())
            .collect();
        assert_eq!(
            paths,
            [command::SECRET_PRINT, command::ACTIVE_PRINT, command::SNMP_SET]
        );
    }
}
