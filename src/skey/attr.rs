use crate::common::attribute::{
    AttrCapability, AttrFlags, AttrId, AttrValueType, Attribute, AttributeValue, Chardata,
};
use crate::common::limits::SAI_SKEY_KEY_SIZE;
use crate::common::mac::MacAddress;
use crate::common::status::Error;
use core::fmt;
use strum::{EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// First service key attribute ID
pub const SAI_SKEY_ATTR_START: AttrId = 0;
/// One past the last service key attribute ID
pub const SAI_SKEY_ATTR_END: AttrId = SkeyAttr::COUNT as AttrId;

#[derive(
    Copy, Clone, Debug, EnumCount, EnumIter, EnumString, Eq, FromRepr, IntoStaticStr, PartialEq,
)]
#[repr(i32)]
pub enum SkeyAttr {
    /// Key material, at most [SAI_SKEY_KEY_SIZE] bytes
    #[strum(serialize = "SAI_SKEY_ATTR_KEY")]
    Key = 0,
    /// Serial number
    #[strum(serialize = "SAI_SKEY_ATTR_SN")]
    Sn = 1,
    /// MAC address of the switch
    #[strum(serialize = "SAI_SKEY_ATTR_MAC")]
    Mac = 2,
}

/// Static description of a service key attribute.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AttrMetadata {
    pub attr: SkeyAttr,
    pub name: &'static str,
    pub value_type: AttrValueType,
    pub flags: AttrFlags,
}

const MANDATORY_CREATE_ONLY: AttrFlags = AttrFlags {
    mandatory_on_create: true,
    create_only: true,
    read_only: false,
};

impl SkeyAttr {
    pub const fn id(self) -> AttrId {
        self as AttrId
    }

    pub fn from_id(id: AttrId) -> Option<Self> {
        Self::from_repr(id)
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn value_type(self) -> AttrValueType {
        match self {
            SkeyAttr::Key => AttrValueType::Chardata,
            SkeyAttr::Sn => AttrValueType::U64,
            SkeyAttr::Mac => AttrValueType::Mac,
        }
    }

    pub const fn flags(self) -> AttrFlags {
        match self {
            SkeyAttr::Key | SkeyAttr::Sn | SkeyAttr::Mac => MANDATORY_CREATE_ONLY,
        }
    }

    pub const fn capability(self) -> AttrCapability {
        self.flags().capability()
    }

    pub fn metadata(self) -> AttrMetadata {
        AttrMetadata {
            attr: self,
            name: self.name(),
            value_type: self.value_type(),
            flags: self.flags(),
        }
    }

    /// An empty output slot for a get call.
    pub const fn slot(self) -> Attribute {
        Attribute::slot(self.id())
    }

    /// Whether `value` has the right type and fits the constraints of this attribute.
    ///
    /// Key material must not contain NUL bytes, as character data is NUL terminated on the C
    /// interface.
    pub fn accepts(self, value: &AttributeValue) -> bool {
        match (self, value) {
            (SkeyAttr::Key, AttributeValue::Chardata(data)) => {
                data.len() <= SAI_SKEY_KEY_SIZE && !data.as_bytes().contains(&0)
            }
            (SkeyAttr::Sn, AttributeValue::U64(_)) => true,
            (SkeyAttr::Mac, AttributeValue::Mac(_)) => true,
            _ => false,
        }
    }
}

/// `SAI_SKEY_ATTR_KEY` attribute. Fails with [Error::BufferOverflow] if `material` does not
/// even fit into character data; the tighter key size limit is checked on creation.
pub fn key(material: &[u8]) -> Result<Attribute, Error> {
    Ok(Attribute::new(
        SkeyAttr::Key.id(),
        AttributeValue::Chardata(Chardata::try_from(material)?),
    ))
}

/// `SAI_SKEY_ATTR_SN` attribute
pub const fn serial_number(sn: u64) -> Attribute {
    Attribute::new(SkeyAttr::Sn.id(), AttributeValue::U64(sn))
}

/// `SAI_SKEY_ATTR_MAC` attribute
pub const fn mac(mac: MacAddress) -> Attribute {
    Attribute::new(SkeyAttr::Mac.id(), AttributeValue::Mac(mac))
}

/// Parses `NAME=value`, e.g. `SAI_SKEY_ATTR_SN=42` or `SAI_SKEY_ATTR_MAC=aa:bb:cc:dd:ee:ff`.
///
/// Serial numbers are decimal or `0x` prefixed hexadecimal. Key material is taken verbatim.
/// Unknown names fail with [Error::UnknownAttribute] and malformed values with
/// [Error::InvalidAttrValue], both at index 0.
pub fn parse(text: &str) -> Result<Attribute, Error> {
    let (name, value) = text.split_once('=').ok_or(Error::InvalidParameter)?;
    let attr: SkeyAttr = name.trim().parse().map_err(|_| Error::UnknownAttribute(0))?;
    let value = value.trim();
    match attr {
        SkeyAttr::Key => key(value.as_bytes()).map_err(|_| Error::InvalidAttrValue(0)),
        SkeyAttr::Sn => {
            let sn = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => value.parse(),
            }
            .map_err(|_| Error::InvalidAttrValue(0))?;
            Ok(serial_number(sn))
        }
        SkeyAttr::Mac => value
            .parse()
            .map(mac)
            .map_err(|_| Error::InvalidAttrValue(0)),
    }
}

/// Displays an attribute as `NAME=value`. Key material is redacted.
pub struct Serialized<'a>(pub &'a Attribute);

impl fmt::Display for Serialized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match SkeyAttr::from_id(self.0.id) {
            Some(attr) => write!(f, "{}={}", attr.name(), self.0.value),
            None => write!(f, "<unknown attribute {}>={}", self.0.id, self.0.value),
        }
    }
}
