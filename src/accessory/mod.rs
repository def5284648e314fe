//! Accessory-protocol data model: typed characteristic values, handler
//! traits, and the static capability topology built at startup.

pub mod characteristic;
pub mod topology;
