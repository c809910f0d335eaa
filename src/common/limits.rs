/// Maximum length of service key material.
pub const SAI_SKEY_KEY_SIZE: usize = 25;

/// Capacity of the `chardata` member of a raw attribute value, including the terminating NUL.
pub const SAI_CHARDATA_SIZE: usize = 32;

/// Length of a MAC address in bytes.
pub const MAC_ADDRESS_SIZE: usize = 6;

/// Maximum number of attributes in a create or set list passed through the C interface.
pub const MAX_ATTR_COUNT: usize = 16;
