//! Image Transform Resolver: turns a photo reference plus options into a delivery URL.
//!
//! The resolver never calls the delivery service; it only spells out what that service
//! should do. With no tenant configured it fails open and hands back the original
//! source reference: an unbordered, unoptimized image beats a broken one.

use crate::config::Config;
use crate::imaging::transform::{
    build_descriptor, SourceDimensions, TransformDescriptor, TransformOptions,
};

/// Path segment selecting remote-fetch delivery of an arbitrary source URL.
const DELIVERY_PATH: &str = "image/fetch";

/// Where transformed images are served from: service root plus tenant (cloud name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub root: String,
    pub tenant: String,
}

impl ServiceIdentity {
    pub fn new(root: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tenant: tenant.into(),
        }
    }

    /// `<root>/<tenant>/image/fetch/<tokens>/<source>`
    pub fn delivery_url(&self, descriptor: &TransformDescriptor) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.root.trim_end_matches('/'),
            self.tenant,
            DELIVERY_PATH,
            descriptor.tokens(),
            descriptor.source
        )
    }
}

/// Stateless resolver. Cheap to clone; shared through `AppState`.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    identity: Option<ServiceIdentity>,
    border_family: String,
}

impl ImageResolver {
    pub fn new(identity: Option<ServiceIdentity>, border_family: impl Into<String>) -> Self {
        Self {
            identity,
            border_family: border_family.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let identity = config
            .image_service_tenant
            .as_ref()
            .map(|tenant| ServiceIdentity::new(config.image_service_root.clone(), tenant.clone()));
        Self::new(identity, config.border_family.clone())
    }

    /// True when a tenant is configured and URLs will actually be transformed.
    pub fn is_configured(&self) -> bool {
        self.identity.is_some()
    }

    /// Builds the descriptor without deciding how it is delivered.
    pub fn describe(
        &self,
        source: &str,
        dimensions: SourceDimensions,
        options: &TransformOptions,
    ) -> TransformDescriptor {
        build_descriptor(source, dimensions, options, &self.border_family)
    }

    /// Resolves the final image reference for a photo.
    ///
    /// Returns `source` unchanged when no service identity is configured, regardless
    /// of the options.
    pub fn resolve(
        &self,
        source: &str,
        dimensions: SourceDimensions,
        options: &TransformOptions,
    ) -> String {
        match &self.identity {
            Some(identity) => identity.delivery_url(&self.describe(source, dimensions, options)),
            None => source.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
