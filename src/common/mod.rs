pub mod attribute;
pub mod limits;
pub mod mac;
pub mod object;
pub mod status;
