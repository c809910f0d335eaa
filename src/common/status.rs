use displaydoc::Display;

/// Failure kinds shared by the object interfaces of the switch abstraction layer.
///
/// Variants carrying a `u32` refer to the position of the offending attribute in the list
/// passed to the operation.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum Error {
    /// unspecified failure
    Failure,
    /// operation is not supported
    NotSupported,
    /// out of memory
    NoMemory,
    /// insufficient resources to create the object
    InsufficientResources,
    /// invalid parameter
    InvalidParameter,
    /// item already exists
    ItemAlreadyExists,
    /// item not found
    ItemNotFound,
    /// buffer too small
    BufferOverflow,
    /// driver is not initialized
    Uninitialized,
    /// table is full
    TableFull,
    /// mandatory attribute is missing
    MandatoryAttributeMissing,
    /// function is not implemented
    NotImplemented,
    /// object is in use
    ObjectInUse,
    /// invalid object type
    InvalidObjectType,
    /// invalid object id
    InvalidObjectId,
    /// attribute at index {0} is invalid
    InvalidAttribute(u32),
    /// value of attribute at index {0} is invalid
    InvalidAttrValue(u32),
    /// attribute at index {0} is not implemented
    AttrNotImplemented(u32),
    /// attribute at index {0} is unknown
    UnknownAttribute(u32),
    /// attribute at index {0} is not supported
    AttrNotSupported(u32),
}

impl Error {
    /// Position of the offending attribute, if the error refers to one.
    pub const fn attr_index(&self) -> Option<u32> {
        match self {
            Error::InvalidAttribute(index)
            | Error::InvalidAttrValue(index)
            | Error::AttrNotImplemented(index)
            | Error::UnknownAttribute(index)
            | Error::AttrNotSupported(index) => Some(*index),
            _ => None,
        }
    }

    /// Moves an attribute-indexed error to another list position. Other errors are returned
    /// unchanged.
    pub const fn at_index(self, index: u32) -> Self {
        match self {
            Error::InvalidAttribute(_) => Error::InvalidAttribute(index),
            Error::InvalidAttrValue(_) => Error::InvalidAttrValue(index),
            Error::AttrNotImplemented(_) => Error::AttrNotImplemented(index),
            Error::UnknownAttribute(_) => Error::UnknownAttribute(index),
            Error::AttrNotSupported(_) => Error::AttrNotSupported(index),
            other => other,
        }
    }
}
