//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod vendor_api;

#[cfg(test)]
pub use vendor_api::MockVendorApi;
pub use vendor_api::{FixtureVendorApi, VendorApi, VendorApiError, VendorLookup};
