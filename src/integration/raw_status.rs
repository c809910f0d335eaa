use crate::common::status::Error;

/// Raw status code as returned through the C interface. Zero means success, negative values
/// are errors.
pub type RawStatus = i32;

pub const SAI_STATUS_SUCCESS: RawStatus = 0;
pub const SAI_STATUS_FAILURE: RawStatus = -1;
pub const SAI_STATUS_NOT_SUPPORTED: RawStatus = -2;
pub const SAI_STATUS_NO_MEMORY: RawStatus = -3;
pub const SAI_STATUS_INSUFFICIENT_RESOURCES: RawStatus = -4;
pub const SAI_STATUS_INVALID_PARAMETER: RawStatus = -5;
pub const SAI_STATUS_ITEM_ALREADY_EXISTS: RawStatus = -6;
pub const SAI_STATUS_ITEM_NOT_FOUND: RawStatus = -7;
pub const SAI_STATUS_BUFFER_OVERFLOW: RawStatus = -8;
pub const SAI_STATUS_UNINITIALIZED: RawStatus = -12;
pub const SAI_STATUS_TABLE_FULL: RawStatus = -13;
pub const SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING: RawStatus = -14;
pub const SAI_STATUS_NOT_IMPLEMENTED: RawStatus = -15;
pub const SAI_STATUS_OBJECT_IN_USE: RawStatus = -17;
pub const SAI_STATUS_INVALID_OBJECT_TYPE: RawStatus = -18;
pub const SAI_STATUS_INVALID_OBJECT_ID: RawStatus = -19;

/// Attribute-indexed codes: the code for the attribute at index `i` is `BASE - i`.
pub const SAI_STATUS_INVALID_ATTRIBUTE_0: RawStatus = -0x0001_0000;
pub const SAI_STATUS_INVALID_ATTR_VALUE_0: RawStatus = -0x0002_0000;
pub const SAI_STATUS_ATTR_NOT_IMPLEMENTED_0: RawStatus = -0x0003_0000;
pub const SAI_STATUS_UNKNOWN_ATTRIBUTE_0: RawStatus = -0x0004_0000;
pub const SAI_STATUS_ATTR_NOT_SUPPORTED_0: RawStatus = -0x0005_0000;

/// Largest attribute index an indexed status code can carry.
pub const SAI_STATUS_MAX_ATTR_INDEX: u32 = 0xffff;

const fn indexed(base: RawStatus, index: u32) -> RawStatus {
    let index = if index > SAI_STATUS_MAX_ATTR_INDEX {
        SAI_STATUS_MAX_ATTR_INDEX
    } else {
        index
    };
    base - index as RawStatus
}

impl From<Error> for RawStatus {
    fn from(value: Error) -> Self {
        match value {
            Error::Failure => SAI_STATUS_FAILURE,
            Error::NotSupported => SAI_STATUS_NOT_SUPPORTED,
            Error::NoMemory => SAI_STATUS_NO_MEMORY,
            Error::InsufficientResources => SAI_STATUS_INSUFFICIENT_RESOURCES,
            Error::InvalidParameter => SAI_STATUS_INVALID_PARAMETER,
            Error::ItemAlreadyExists => SAI_STATUS_ITEM_ALREADY_EXISTS,
            Error::ItemNotFound => SAI_STATUS_ITEM_NOT_FOUND,
            Error::BufferOverflow => SAI_STATUS_BUFFER_OVERFLOW,
            Error::Uninitialized => SAI_STATUS_UNINITIALIZED,
            Error::TableFull => SAI_STATUS_TABLE_FULL,
            Error::MandatoryAttributeMissing => SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING,
            Error::NotImplemented => SAI_STATUS_NOT_IMPLEMENTED,
            Error::ObjectInUse => SAI_STATUS_OBJECT_IN_USE,
            Error::InvalidObjectType => SAI_STATUS_INVALID_OBJECT_TYPE,
            Error::InvalidObjectId => SAI_STATUS_INVALID_OBJECT_ID,
            Error::InvalidAttribute(i) => indexed(SAI_STATUS_INVALID_ATTRIBUTE_0, i),
            Error::InvalidAttrValue(i) => indexed(SAI_STATUS_INVALID_ATTR_VALUE_0, i),
            Error::AttrNotImplemented(i) => indexed(SAI_STATUS_ATTR_NOT_IMPLEMENTED_0, i),
            Error::UnknownAttribute(i) => indexed(SAI_STATUS_UNKNOWN_ATTRIBUTE_0, i),
            Error::AttrNotSupported(i) => indexed(SAI_STATUS_ATTR_NOT_SUPPORTED_0, i),
        }
    }
}

/// Status code of an operation result.
pub fn from_result<T>(result: Result<T, Error>) -> RawStatus {
    match result {
        Ok(_) => SAI_STATUS_SUCCESS,
        Err(e) => e.into(),
    }
}

/// Decode a status code. Codes without a matching [Error] are reported as [Error::Failure].
pub fn into_result(status: RawStatus) -> Result<(), Error> {
    let error = match status {
        SAI_STATUS_SUCCESS => return Ok(()),
        SAI_STATUS_NOT_SUPPORTED => Error::NotSupported,
        SAI_STATUS_NO_MEMORY => Error::NoMemory,
        SAI_STATUS_INSUFFICIENT_RESOURCES => Error::InsufficientResources,
        SAI_STATUS_INVALID_PARAMETER => Error::InvalidParameter,
        SAI_STATUS_ITEM_ALREADY_EXISTS => Error::ItemAlreadyExists,
        SAI_STATUS_ITEM_NOT_FOUND => Error::ItemNotFound,
        SAI_STATUS_BUFFER_OVERFLOW => Error::BufferOverflow,
        SAI_STATUS_UNINITIALIZED => Error::Uninitialized,
        SAI_STATUS_TABLE_FULL => Error::TableFull,
        SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING => Error::MandatoryAttributeMissing,
        SAI_STATUS_NOT_IMPLEMENTED => Error::NotImplemented,
        SAI_STATUS_OBJECT_IN_USE => Error::ObjectInUse,
        SAI_STATUS_INVALID_OBJECT_TYPE => Error::InvalidObjectType,
        SAI_STATUS_INVALID_OBJECT_ID => Error::InvalidObjectId,
        _ => decode_indexed(status).unwrap_or(Error::Failure),
    };
    Err(error)
}

fn decode_indexed(status: RawStatus) -> Option<Error> {
    let bases: [(RawStatus, fn(u32) -> Error); 5] = [
        (SAI_STATUS_INVALID_ATTRIBUTE_0, Error::InvalidAttribute),
        (SAI_STATUS_INVALID_ATTR_VALUE_0, Error::InvalidAttrValue),
        (SAI_STATUS_ATTR_NOT_IMPLEMENTED_0, Error::AttrNotImplemented),
        (SAI_STATUS_UNKNOWN_ATTRIBUTE_0, Error::UnknownAttribute),
        (SAI_STATUS_ATTR_NOT_SUPPORTED_0, Error::AttrNotSupported),
    ];
    bases.into_iter().find_map(|(base, error)| {
        let index = base.checked_sub(status)?;
        (0..=SAI_STATUS_MAX_ATTR_INDEX as RawStatus)
            .contains(&index)
            .then(|| error(index as u32))
    })
}
