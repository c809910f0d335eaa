use crate::common::attribute::Attribute;
use crate::common::object::ObjectId;
use crate::common::status::Error;
use crate::skey::attr::SkeyAttr;

/// Service key methods a switch driver provides.
///
/// A service key is a key resource provisioned on a switch. It is described by three
/// attributes ([SkeyAttr]), all of which must be given on creation and can never be changed
/// afterwards.
///
/// Every call is synchronous and atomic: on error no object is created, removed or modified
/// and no output slot is written.
pub trait SkeyApi {
    /// Create a service key on `switch_id`.
    ///
    /// `attributes` must contain every mandatory-on-create attribute exactly once.
    ///
    /// returns: The identifier of the new service key or an error.
    fn create_skey(
        &mut self,
        switch_id: ObjectId,
        attributes: &[Attribute],
    ) -> Result<ObjectId, Error>;

    /// Remove a service key. The identifier is invalid afterwards; removing it again fails
    /// with [Error::InvalidObjectId].
    fn remove_skey(&mut self, skey_id: ObjectId) -> Result<(), Error>;

    /// Set a single attribute.
    fn set_skey_attribute(&mut self, skey_id: ObjectId, attribute: &Attribute)
        -> Result<(), Error>;

    /// Fill the value of every attribute in `attributes`, keeping the list order.
    fn get_skey_attribute(
        &self,
        skey_id: ObjectId,
        attributes: &mut [Attribute],
    ) -> Result<(), Error>;
}

/// Checks an attribute passed to a set call and returns the attribute it refers to.
///
/// None of the currently defined attributes is settable, so known attributes are rejected
/// with [Error::InvalidAttribute].
pub fn check_set_attribute(attribute: &Attribute) -> Result<SkeyAttr, Error> {
    let attr = SkeyAttr::from_id(attribute.id).ok_or(Error::UnknownAttribute(0))?;
    if !attr.capability().set {
        return Err(Error::InvalidAttribute(0));
    }
    if !attr.accepts(&attribute.value) {
        return Err(Error::InvalidAttrValue(0));
    }
    Ok(attr)
}

/// Checks the attribute IDs of a get call.
pub fn check_get_attributes(attributes: &[Attribute]) -> Result<(), Error> {
    for (index, attribute) in attributes.iter().enumerate() {
        let attr =
            SkeyAttr::from_id(attribute.id).ok_or(Error::UnknownAttribute(index as u32))?;
        if !attr.capability().get {
            return Err(Error::AttrNotSupported(index as u32));
        }
    }
    Ok(())
}
