use crate::common::limits::SAI_CHARDATA_SIZE;
use crate::common::mac::MacAddress;
use crate::common::status::Error;
use core::fmt;
use zeroize::Zeroize;

/// Numeric attribute identifier as it appears in attribute lists.
pub type AttrId = i32;

/// Type of the value an attribute carries.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AttrValueType {
    Chardata,
    U64,
    Mac,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct AttrFlags {
    /// The attribute must be present in the attribute list of a create call.
    pub mandatory_on_create: bool,
    /// The attribute can only be given on creation and never be set afterwards.
    pub create_only: bool,
    /// The attribute is maintained by the driver and can only be read.
    pub read_only: bool,
}

/// Which operations accept an attribute.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct AttrCapability {
    pub create: bool,
    pub set: bool,
    pub get: bool,
}

impl AttrFlags {
    pub const fn capability(&self) -> AttrCapability {
        AttrCapability {
            create: !self.read_only,
            set: !self.read_only && !self.create_only,
            get: true,
        }
    }
}

/// Fixed-capacity character data. The buffer is zeroed on drop because it usually carries
/// key material.
#[derive(Clone)]
pub struct Chardata {
    data: [u8; SAI_CHARDATA_SIZE],
    len: usize,
}

impl Chardata {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TryFrom<&[u8]> for Chardata {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > SAI_CHARDATA_SIZE {
            return Err(Error::BufferOverflow);
        }
        let mut data = [0u8; SAI_CHARDATA_SIZE];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Chardata {
            data,
            len: bytes.len(),
        })
    }
}

impl PartialEq for Chardata {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Chardata {}

impl fmt::Debug for Chardata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chardata")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl Drop for Chardata {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

/// Typed value of an attribute. `Unset` marks an output slot of a get call that has not been
/// filled yet.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum AttributeValue {
    #[default]
    Unset,
    Chardata(Chardata),
    U64(u64),
    Mac(MacAddress),
}

impl AttributeValue {
    pub const fn value_type(&self) -> Option<AttrValueType> {
        match self {
            AttributeValue::Unset => None,
            AttributeValue::Chardata(_) => Some(AttrValueType::Chardata),
            AttributeValue::U64(_) => Some(AttrValueType::U64),
            AttributeValue::Mac(_) => Some(AttrValueType::Mac),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Unset => f.write_str("<unset>"),
            AttributeValue::Chardata(data) => write!(f, "<{} bytes redacted>", data.len()),
            AttributeValue::U64(value) => write!(f, "{value}"),
            AttributeValue::Mac(mac) => write!(f, "{mac}"),
        }
    }
}

/// An (id, value) pair as passed to create, set and get operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    pub id: AttrId,
    pub value: AttributeValue,
}

impl Attribute {
    pub const fn new(id: AttrId, value: AttributeValue) -> Self {
        Attribute { id, value }
    }

    /// An output slot for a get call.
    pub const fn slot(id: AttrId) -> Self {
        Attribute {
            id,
            value: AttributeValue::Unset,
        }
    }
}
