use async_trait::async_trait;

/// Outcome of a permission check or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Not yet checked this run.
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Platform-specific location permission identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    /// Android-style foreground fine location.
    FineLocation,
    /// iOS-style when-in-use authorization.
    LocationWhenInUse,
}

/// Seam for the host's runtime permission machinery.
///
/// `check` never shows UI; `request` may prompt the user and suspends until
/// they answer. The workflow calls `request` only after a non-granted check.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn check(&self, kind: PermissionKind) -> PermissionState;

    async fn request(&self, kind: PermissionKind) -> PermissionState;
}
