//! CapabilityNegotiator - Picks and invokes the SDK call shape per operation.
//!
//! The capability level is resolved once, from the configured override or
//! the SDK's own descriptor. Every fetch, surface construction and show
//! then goes through the dispatch table, so adapters never branch on SDK
//! versions themselves.

use std::sync::Arc;

use crate::config::SdkConfig;
use crate::domain::capability::{resolve, CallShape, CapabilityLevel, Operation, SdkDescriptor};
use crate::domain::foundation::{AdHandle, BridgeError, ConfigurationError, ZoneKey};
use crate::domain::request::{AdFormat, AdSize, HostContext};
use crate::ports::{AdNetwork, Presentation, Surface, SurfaceRequest};

/// Negotiates call shapes against one ad network.
pub struct CapabilityNegotiator {
    network: Arc<dyn AdNetwork>,
    descriptor: SdkDescriptor,
    level: CapabilityLevel,
}

impl CapabilityNegotiator {
    /// Resolves the capability level and registers the plugin with the SDK.
    pub fn new(network: Arc<dyn AdNetwork>, config: &SdkConfig) -> Self {
        let descriptor = config.effective_descriptor(network.descriptor());
        let level = descriptor.capability_level();
        network.set_plugin_version(&config.plugin_version);

        tracing::info!(
            version_code = descriptor.version_code,
            level = %level,
            plugin = %config.plugin_version,
            "Ad network capabilities resolved"
        );

        Self {
            network,
            descriptor,
            level,
        }
    }

    pub fn level(&self) -> CapabilityLevel {
        self.level
    }

    pub fn descriptor(&self) -> SdkDescriptor {
        self.descriptor
    }

    /// Returns the call shape for `operation` on `zone`.
    ///
    /// # Errors
    ///
    /// `CapabilityUnavailable` when a named zone is requested and the SDK
    /// has no zone-aware overload for the operation.
    pub fn resolve(&self, operation: Operation, zone: &ZoneKey) -> Result<CallShape, ConfigurationError> {
        resolve(operation, self.level, zone).require(operation, zone)
    }

    /// Rejects hosts the SDK cannot render `format` into.
    pub fn check_host(&self, format: AdFormat, host: &HostContext) -> Result<(), ConfigurationError> {
        if self.level.requires_activity(format) && !host.is_activity() {
            tracing::warn!(format = %format, host = %host, "Host context rejected");
            return Err(ConfigurationError::InvalidHostContext {
                format,
                version_code: self.descriptor.version_code,
            });
        }
        Ok(())
    }

    /// Fetches one ad for `zone` through the available shape.
    pub async fn fetch(&self, zone: &ZoneKey, size: AdSize) -> Result<AdHandle, BridgeError> {
        let shape = self.resolve(Operation::Fetch, zone)?;
        tracing::debug!(zone = %zone, shape = ?shape, "Fetching ad");

        let result = match shape {
            CallShape::ZoneAware(zone) => self.network.load_next_ad_for_zone(&zone).await,
            CallShape::Legacy => self.network.load_next_ad(size).await,
            CallShape::Unavailable => return Err(unavailable(Operation::Fetch, zone)),
        };

        result.map_err(|code| {
            tracing::debug!(zone = %zone, code = %code, "Fetch failed");
            BridgeError::from(code)
        })
    }

    /// Constructs a surface for `zone` through the available shape.
    pub fn create_surface(
        &self,
        request: &SurfaceRequest,
        zone: &ZoneKey,
    ) -> Result<Arc<dyn Surface>, BridgeError> {
        match self.resolve(Operation::CreateSurface, zone)? {
            CallShape::ZoneAware(zone) => self.network.create_surface_for_zone(request, &zone),
            CallShape::Legacy => self.network.create_surface(request),
            CallShape::Unavailable => Err(unavailable(Operation::CreateSurface, zone)),
        }
    }

    /// Presents a fullscreen ad through the available shape.
    pub fn show(
        &self,
        ad: &AdHandle,
        zone: &ZoneKey,
        presentation: &Presentation,
    ) -> Result<(), BridgeError> {
        match self.resolve(Operation::Show, zone)? {
            CallShape::ZoneAware(zone) => self.network.show_for_zone(ad, &zone, presentation),
            CallShape::Legacy => self.network.show(ad, presentation),
            CallShape::Unavailable => Err(unavailable(Operation::Show, zone)),
        }
    }
}

fn unavailable(operation: Operation, zone: &ZoneKey) -> BridgeError {
    ConfigurationError::CapabilityUnavailable {
        operation,
        zone: zone.clone(),
    }
    .into()
}

impl std::fmt::Debug for CapabilityNegotiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityNegotiator")
            .field("descriptor", &self.descriptor)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAdNetwork, NetworkCall};
    use crate::domain::foundation::NetworkErrorCode;

    fn negotiator(network: &MockAdNetwork) -> CapabilityNegotiator {
        CapabilityNegotiator::new(Arc::new(network.clone()), &SdkConfig::default())
    }

    #[test]
    fn plugin_version_is_sent_on_construction() {
        let network = MockAdNetwork::new();
        negotiator(&network);

        assert_eq!(
            network.calls(),
            vec![NetworkCall::SetPluginVersion("AdMob-2.1".to_string())]
        );
    }

    #[test]
    fn configured_version_overrides_reported_one() {
        let network = MockAdNetwork::new().with_version_code(760);
        let config = SdkConfig {
            version_code: Some(705),
            ..Default::default()
        };

        let negotiator = CapabilityNegotiator::new(Arc::new(network), &config);

        assert_eq!(negotiator.level(), CapabilityLevel::ActivityBound);
    }

    #[tokio::test]
    async fn named_zone_uses_zone_aware_fetch() {
        let network = MockAdNetwork::new();
        let negotiator = negotiator(&network);
        let zone = ZoneKey::new("rewarded1");

        negotiator.fetch(&zone, AdSize::Interstitial).await.unwrap();

        assert!(network.calls().contains(&NetworkCall::LoadNextAdForZone(zone)));
    }

    #[tokio::test]
    async fn default_zone_on_old_sdk_uses_legacy_fetch() {
        let network = MockAdNetwork::new().with_version_code(740);
        let negotiator = negotiator(&network);

        negotiator
            .fetch(&ZoneKey::default_zone(), AdSize::Banner)
            .await
            .unwrap();

        assert!(network.calls().contains(&NetworkCall::LoadNextAd(AdSize::Banner)));
    }

    #[tokio::test]
    async fn named_zone_on_old_sdk_is_a_configuration_error() {
        let network = MockAdNetwork::new().with_version_code(740);
        let negotiator = negotiator(&network);
        let zone = ZoneKey::new("rewarded1");

        let err = negotiator.fetch(&zone, AdSize::Interstitial).await.unwrap_err();

        assert_eq!(
            err,
            BridgeError::Configuration(ConfigurationError::CapabilityUnavailable {
                operation: Operation::Fetch,
                zone,
            })
        );
        assert_eq!(network.fetch_count(), 0);
    }

    #[tokio::test]
    async fn network_codes_are_translated() {
        let network = MockAdNetwork::new()
            .with_no_fill()
            .with_error(NetworkErrorCode::NoNetwork)
            .with_error(NetworkErrorCode::FetchTimeout)
            .with_error(NetworkErrorCode::Other(-900));
        let negotiator = negotiator(&network);
        let zone = ZoneKey::default_zone();

        assert_eq!(negotiator.fetch(&zone, AdSize::Banner).await, Err(BridgeError::NoFill));
        assert_eq!(negotiator.fetch(&zone, AdSize::Banner).await, Err(BridgeError::Network));
        assert_eq!(negotiator.fetch(&zone, AdSize::Banner).await, Err(BridgeError::Timeout));
        assert!(matches!(
            negotiator.fetch(&zone, AdSize::Banner).await,
            Err(BridgeError::Internal(_))
        ));
    }

    #[test]
    fn old_sdk_rejects_application_host_for_banners() {
        let negotiator = negotiator(&MockAdNetwork::new().with_version_code(705));

        let err = negotiator
            .check_host(AdFormat::Banner, &HostContext::application("App"))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::InvalidHostContext {
                format: AdFormat::Banner,
                version_code: 705,
            }
        );
        assert!(negotiator
            .check_host(AdFormat::Banner, &HostContext::activity("Main"))
            .is_ok());
    }

    #[test]
    fn context_banner_sdk_still_needs_activity_for_fullscreen() {
        let negotiator = negotiator(&MockAdNetwork::new().with_version_code(715));
        let app = HostContext::application("App");

        assert!(negotiator.check_host(AdFormat::Banner, &app).is_ok());
        assert!(negotiator.check_host(AdFormat::Interstitial, &app).is_err());
    }

    #[test]
    fn legacy_surface_constructor_for_default_zone() {
        let network = MockAdNetwork::new().with_version_code(720);
        let negotiator = negotiator(&network);
        let request = SurfaceRequest::new(AdFormat::Banner, AdSize::Banner, HostContext::activity("Main"));

        let surface = negotiator
            .create_surface(&request, &ZoneKey::default_zone())
            .unwrap();

        assert!(surface.zone().is_default());
        assert!(network.calls().iter().all(|call| !call.is_zone_aware()));
    }
}
