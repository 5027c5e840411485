use async_trait::async_trait;
use log::debug;

use crate::platform::permission::{PermissionKind, PermissionProvider, PermissionState};

/// Desktop hosts have no runtime location prompt; access is governed at the
/// OS level outside the process, so both paths report granted.
pub struct DesktopPermissions;

#[async_trait]
impl PermissionProvider for DesktopPermissions {
    async fn check(&self, kind: PermissionKind) -> PermissionState {
        debug!("Permission check ({kind:?}): granted");
        PermissionState::Granted
    }

    async fn request(&self, _kind: PermissionKind) -> PermissionState {
        PermissionState::Granted
    }
}
