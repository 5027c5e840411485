pub mod desktop;
pub mod ip_api;

pub use desktop::DesktopPermissions;
pub use ip_api::IpLocationProvider;
