pub mod api;
pub mod attr;
pub mod key;
pub mod params;
