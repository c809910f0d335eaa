use crate::common::attribute::{AttrId, AttrValueType, Attribute, AttributeValue, Chardata};
use crate::common::limits::{MAC_ADDRESS_SIZE, MAX_ATTR_COUNT, SAI_CHARDATA_SIZE};
use crate::common::mac::MacAddress;
use crate::common::object::ObjectId;
use crate::common::status::Error;
use crate::integration::raw_status::{from_result, RawStatus};
use crate::skey::api::SkeyApi;
use crate::skey::attr::SkeyAttr;
use core::ffi::c_char;
use heapless::Vec;

/// Raw attribute value. The attribute ID selects the valid member.
#[repr(C)]
#[derive(Copy, Clone)]
pub union RawAttributeValue {
    pub chardata: [c_char; SAI_CHARDATA_SIZE],
    pub u64: u64,
    pub mac: [u8; MAC_ADDRESS_SIZE],
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct RawAttribute {
    pub id: AttrId,
    pub value: RawAttributeValue,
}

/// Create a service key
///
/// * `skey_id`: Output, service key ID
/// * `switch_id`: Switch object ID
/// * `attr_count`: Number of attributes
/// * `attr_list`: Array of attributes
pub type CreateSkeyFn = unsafe extern "C" fn(
    skey_id: *mut u64,
    switch_id: u64,
    attr_count: u32,
    attr_list: *const RawAttribute,
) -> RawStatus;

/// Remove a service key
pub type RemoveSkeyFn = unsafe extern "C" fn(skey_id: u64) -> RawStatus;

/// Set a service key attribute
pub type SetSkeyAttributeFn =
    unsafe extern "C" fn(skey_id: u64, attr: *const RawAttribute) -> RawStatus;

/// Get service key attributes, `attr_list` is read and written
pub type GetSkeyAttributeFn =
    unsafe extern "C" fn(skey_id: u64, attr_count: u32, attr_list: *mut RawAttribute) -> RawStatus;

/// Service key method table handed out to C callers.
///
/// The entries are bound to a [DriverInstance], a type that gives access to a driver living in
/// a `static` (usually a [StaticDriver](crate::integration::static_driver::StaticDriver)).
/// Attribute lists of create and set calls hold at most [MAX_ATTR_COUNT] entries; get lists
/// are processed in place and have no limit.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct SkeyApiTable {
    pub create_skey: CreateSkeyFn,
    pub remove_skey: RemoveSkeyFn,
    pub set_skey_attribute: SetSkeyAttributeFn,
    pub get_skey_attribute: GetSkeyAttributeFn,
}

/// Access to the driver behind a [SkeyApiTable].
pub trait DriverInstance {
    type Driver: SkeyApi;

    /// Run `f` on the driver. Returns `None` if no driver is available.
    fn with_driver<R>(f: impl FnOnce(&mut Self::Driver) -> R) -> Option<R>;
}

impl SkeyApiTable {
    pub const fn for_instance<I: DriverInstance>() -> Self {
        SkeyApiTable {
            create_skey: create_skey::<I>,
            remove_skey: remove_skey::<I>,
            set_skey_attribute: set_skey_attribute::<I>,
            get_skey_attribute: get_skey_attribute::<I>,
        }
    }
}

impl RawAttribute {
    pub fn new(id: AttrId) -> Self {
        RawAttribute {
            id,
            value: RawAttributeValue { u64: 0 },
        }
    }

    /// Raw form of `attribute`. Unset values are zeroed.
    pub fn encode(attribute: &Attribute) -> Self {
        let mut raw = RawAttribute::new(attribute.id);
        raw.value = encode_value(&attribute.value);
        raw
    }

    /// Typed form of this attribute. The member read is selected by the attribute ID, unknown
    /// IDs yield an unset value and are rejected later by the driver.
    ///
    /// # Safety
    ///
    /// The member of `value` matching the type of `id` must be initialised.
    pub unsafe fn decode(&self) -> Result<Attribute, Error> {
        let Some(attr) = SkeyAttr::from_id(self.id) else {
            return Ok(Attribute::slot(self.id));
        };
        let value = match attr.value_type() {
            AttrValueType::Chardata => {
                // SAFETY: the caller initialised the member selected by the attribute ID
                let chardata = unsafe { self.value.chardata };
                let len = chardata
                    .iter()
                    .position(|c| *c == 0)
                    .unwrap_or(SAI_CHARDATA_SIZE);
                let mut bytes = [0u8; SAI_CHARDATA_SIZE];
                for (byte, c) in bytes.iter_mut().zip(chardata.iter()) {
                    *byte = *c as u8;
                }
                AttributeValue::Chardata(Chardata::try_from(&bytes[..len])?)
            }
            // SAFETY: the caller initialised the member selected by the attribute ID
            AttrValueType::U64 => AttributeValue::U64(unsafe { self.value.u64 }),
            // SAFETY: the caller initialised the member selected by the attribute ID
            AttrValueType::Mac => AttributeValue::Mac(MacAddress(unsafe { self.value.mac })),
        };
        Ok(Attribute::new(self.id, value))
    }
}

fn encode_value(value: &AttributeValue) -> RawAttributeValue {
    match value {
        AttributeValue::Unset => RawAttributeValue { u64: 0 },
        AttributeValue::Chardata(data) => {
            // NUL terminated if there is room left
            let mut chardata = [0 as c_char; SAI_CHARDATA_SIZE];
            for (c, byte) in chardata.iter_mut().zip(data.as_bytes()) {
                *c = *byte as c_char;
            }
            RawAttributeValue { chardata }
        }
        AttributeValue::U64(value) => RawAttributeValue { u64: *value },
        AttributeValue::Mac(mac) => RawAttributeValue { mac: mac.octets() },
    }
}

/// # Safety
///
/// If `count` is not zero, `list` must be null or point to `count` attributes whose members
/// selected by their IDs are initialised.
unsafe fn decode_list(
    list: *const RawAttribute,
    count: u32,
) -> Result<Vec<Attribute, MAX_ATTR_COUNT>, Error> {
    let mut attributes = Vec::new();
    if count == 0 {
        return Ok(attributes);
    }
    if list.is_null() {
        return Err(Error::InvalidParameter);
    }
    if count as usize > MAX_ATTR_COUNT {
        return Err(Error::BufferOverflow);
    }
    // SAFETY: non-null and holding `count` attributes as guaranteed by the caller
    let raw = unsafe { core::slice::from_raw_parts(list, count as usize) };
    for (index, attribute) in raw.iter().enumerate() {
        // SAFETY: members selected by the IDs are initialised as guaranteed by the caller
        let attribute = unsafe { attribute.decode() }.map_err(|e| e.at_index(index as u32))?;
        attributes
            .push(attribute)
            .map_err(|_| Error::BufferOverflow)?;
    }
    Ok(attributes)
}

unsafe extern "C" fn create_skey<I: DriverInstance>(
    skey_id: *mut u64,
    switch_id: u64,
    attr_count: u32,
    attr_list: *const RawAttribute,
) -> RawStatus {
    if skey_id.is_null() {
        return Error::InvalidParameter.into();
    }
    // SAFETY: the C caller passes `attr_count` initialised attributes
    let attributes = match unsafe { decode_list(attr_list, attr_count) } {
        Ok(attributes) => attributes,
        Err(e) => return e.into(),
    };
    let result = I::with_driver(|driver| driver.create_skey(switch_id.into(), &attributes))
        .unwrap_or(Err(Error::Uninitialized));
    if let Ok(id) = result {
        // SAFETY: checked for null above, the C caller provides writable storage
        unsafe { skey_id.write(id.into()) };
    }
    from_result(result)
}

unsafe extern "C" fn remove_skey<I: DriverInstance>(skey_id: u64) -> RawStatus {
    from_result(
        I::with_driver(|driver| driver.remove_skey(skey_id.into()))
            .unwrap_or(Err(Error::Uninitialized)),
    )
}

unsafe extern "C" fn set_skey_attribute<I: DriverInstance>(
    skey_id: u64,
    attr: *const RawAttribute,
) -> RawStatus {
    // SAFETY: the C caller passes null or a single initialised attribute
    let attributes = match unsafe { decode_list(attr, 1) } {
        Ok(attributes) => attributes,
        Err(e) => return e.into(),
    };
    let Some(attribute) = attributes.first() else {
        return Error::InvalidParameter.into();
    };
    from_result(
        I::with_driver(|driver| driver.set_skey_attribute(ObjectId::from(skey_id), attribute))
            .unwrap_or(Err(Error::Uninitialized)),
    )
}

unsafe extern "C" fn get_skey_attribute<I: DriverInstance>(
    skey_id: u64,
    attr_count: u32,
    attr_list: *mut RawAttribute,
) -> RawStatus {
    let raw: &mut [RawAttribute] = if attr_count == 0 {
        Default::default()
    } else if attr_list.is_null() {
        return Error::InvalidParameter.into();
    } else {
        // SAFETY: non-null and holding `attr_count` attributes as guaranteed by the C caller
        unsafe { core::slice::from_raw_parts_mut(attr_list, attr_count as usize) }
    };
    let skey_id = ObjectId::from(skey_id);
    from_result(
        I::with_driver(|driver| get_in_place(driver, skey_id, raw))
            .unwrap_or(Err(Error::Uninitialized)),
    )
}

/// Fills `raw` one attribute at a time. Every ID is read once before the first value is
/// written, so `raw` is left untouched on error.
fn get_in_place<D: SkeyApi>(
    driver: &D,
    skey_id: ObjectId,
    raw: &mut [RawAttribute],
) -> Result<(), Error> {
    driver.get_skey_attribute(skey_id, &mut [])?;
    for (index, attribute) in raw.iter().enumerate() {
        let mut slot = [Attribute::slot(attribute.id)];
        driver
            .get_skey_attribute(skey_id, &mut slot)
            .map_err(|e| e.at_index(index as u32))?;
    }
    for (index, attribute) in raw.iter_mut().enumerate() {
        let mut slot = [Attribute::slot(attribute.id)];
        driver
            .get_skey_attribute(skey_id, &mut slot)
            .map_err(|e| e.at_index(index as u32))?;
        attribute.value = encode_value(&slot[0].value);
    }
    Ok(())
}
