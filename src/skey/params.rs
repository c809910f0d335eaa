use crate::common::attribute::{Attribute, AttributeValue};
use crate::common::mac::MacAddress;
use crate::common::status::Error;
use crate::skey::attr::SkeyAttr;
use crate::skey::key::KeyMaterial;
use strum::EnumCount;

/// Attributes of a service key, validated from the attribute list of a create call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkeyParams {
    pub key: KeyMaterial,
    pub serial_number: u64,
    pub mac: MacAddress,
}

impl SkeyParams {
    /// Current value of `attr`.
    pub fn value(&self, attr: SkeyAttr) -> Result<AttributeValue, Error> {
        Ok(match attr {
            SkeyAttr::Key => AttributeValue::Chardata(self.key.to_chardata()?),
            SkeyAttr::Sn => AttributeValue::U64(self.serial_number),
            SkeyAttr::Mac => AttributeValue::Mac(self.mac),
        })
    }
}

impl TryFrom<&[Attribute]> for SkeyParams {
    type Error = Error;

    /// Every attribute must be known, given once and carry a valid value. Errors refer to the
    /// first offending list position; missing attributes are reported after the whole list
    /// was checked.
    fn try_from(attributes: &[Attribute]) -> Result<Self, Self::Error> {
        let mut seen = [false; SkeyAttr::COUNT];
        let mut key = None;
        let mut serial_number = None;
        let mut mac = None;
        for (index, attribute) in attributes.iter().enumerate() {
            let index = index as u32;
            let attr = SkeyAttr::from_id(attribute.id).ok_or(Error::UnknownAttribute(index))?;
            if attr.flags().read_only {
                return Err(Error::InvalidAttribute(index));
            }
            if core::mem::replace(&mut seen[attr.id() as usize], true) {
                return Err(Error::InvalidAttribute(index));
            }
            if !attr.accepts(&attribute.value) {
                return Err(Error::InvalidAttrValue(index));
            }
            match &attribute.value {
                AttributeValue::Chardata(data) => {
                    key = Some(
                        KeyMaterial::try_from(data).map_err(|_| Error::InvalidAttrValue(index))?,
                    )
                }
                AttributeValue::U64(value) => serial_number = Some(*value),
                AttributeValue::Mac(value) => mac = Some(*value),
                AttributeValue::Unset => return Err(Error::InvalidAttrValue(index)),
            }
        }
        match (key, serial_number, mac) {
            (Some(key), Some(serial_number), Some(mac)) => Ok(SkeyParams {
                key,
                serial_number,
                mac,
            }),
            _ => Err(Error::MandatoryAttributeMissing),
        }
    }
}
