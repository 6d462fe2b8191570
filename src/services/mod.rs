pub mod geocoding;
pub mod shelters;
