use crate::common::object::ObjectId;

/// Maximum number of service keys held by the default driver configuration
pub const MAX_SKEYS: usize = 16;
/// Maximum number of switches the default driver configuration can serve
pub const MAX_SWITCHES: usize = 4;

/// Switches registered by the default driver configuration.
pub const SWITCH_IDS: [ObjectId; 2] = [ObjectId::switch(0), ObjectId::switch(1)];
