#[macro_use]
mod common;

pub use common::*;
use saiskey::{
    common::{
        limits::{MAX_ATTR_COUNT, SAI_CHARDATA_SIZE, SAI_SKEY_KEY_SIZE},
        status::Error,
    },
    integration::{
        raw_api::{DriverInstance, RawAttribute, RawAttributeValue, SkeyApiTable},
        raw_status::*,
    },
    skey::{api::SkeyApi, attr::SkeyAttr},
};
use std::ffi::c_char;
use std::ptr;

fn create(api: &SkeyApiTable, switch_id: u64, attributes: &[RawAttribute]) -> (RawStatus, u64) {
    let mut skey_id = 0u64;
    // SAFETY: all pointers are valid and every attribute has the member for its ID initialised
    let status = unsafe {
        (api.create_skey)(
            &mut skey_id,
            switch_id,
            attributes.len() as u32,
            attributes.as_ptr(),
        )
    };
    (status, skey_id)
}

fn get(api: &SkeyApiTable, skey_id: u64, attributes: &mut [RawAttribute]) -> RawStatus {
    // SAFETY: the list is valid for `attributes.len()` elements
    unsafe { (api.get_skey_attribute)(skey_id, attributes.len() as u32, attributes.as_mut_ptr()) }
}

fn remove(api: &SkeyApiTable, skey_id: u64) -> RawStatus {
    // SAFETY: no pointers involved
    unsafe { (api.remove_skey)(skey_id) }
}

fn serial_number(attribute: &RawAttribute) -> u64 {
    // SAFETY: all members are plain data that the tests initialise through `RawAttribute::new`
    unsafe { attribute.value.u64 }
}

#[test]
fn scenario() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let (status, skey_id) = create(
        &api,
        SWITCH0.into(),
        &raw_create_list(KEY, SERIAL_NUMBER, MAC),
    );
    assert_eq!(status, SAI_STATUS_SUCCESS);
    assert_ne!(skey_id, 0);

    let mut query = [RawAttribute::new(SkeyAttr::Sn.id())];
    assert_eq!(get(&api, skey_id, &mut query), SAI_STATUS_SUCCESS);
    assert_eq!(serial_number(&query[0]), SERIAL_NUMBER);

    assert_eq!(remove(&api, skey_id), SAI_STATUS_SUCCESS);
    assert_eq!(get(&api, skey_id, &mut query), SAI_STATUS_INVALID_OBJECT_ID);
    assert_eq!(remove(&api, skey_id), SAI_STATUS_INVALID_OBJECT_ID);
}

#[test]
fn get_returns_created_values() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let (status, skey_id) = create(
        &api,
        SWITCH1.into(),
        &raw_create_list(KEY, SERIAL_NUMBER, MAC),
    );
    assert_eq!(status, SAI_STATUS_SUCCESS);

    let mut query = [
        RawAttribute::new(SkeyAttr::Mac.id()),
        RawAttribute::new(SkeyAttr::Key.id()),
        RawAttribute::new(SkeyAttr::Sn.id()),
    ];
    assert_eq!(get(&api, skey_id, &mut query), SAI_STATUS_SUCCESS);
    // SAFETY: the driver wrote the members matching the IDs
    let (mac, chardata) = unsafe { (query[0].value.mac, query[1].value.chardata) };
    assert_eq!(mac, MAC.octets());
    let mut expected = [0 as c_char; SAI_CHARDATA_SIZE];
    for (c, byte) in expected.iter_mut().zip(KEY) {
        *c = *byte as c_char;
    }
    assert_eq!(chardata, expected);
    assert_eq!(serial_number(&query[2]), SERIAL_NUMBER);

    // Typed view of the same key
    let attributes: Vec<_> = query
        .iter()
        // SAFETY: the driver wrote the members matching the IDs
        .map(|raw| unsafe { raw.decode() }.expect("failed to decode"))
        .collect();
    let [key, sn, mac] = create_list(KEY, SERIAL_NUMBER, MAC);
    assert_eq!(attributes, [mac, key, sn]);
}

#[test]
fn create_failures() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let list = raw_create_list(KEY, SERIAL_NUMBER, MAC);
    assert_eq!(
        create(&api, SWITCH0.into(), &list[1..]).0,
        SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING
    );
    assert_eq!(
        create(&api, UNKNOWN_SWITCH.into(), &list).0,
        SAI_STATUS_INVALID_OBJECT_ID
    );

    let mut too_long = list;
    too_long[0].value = RawAttributeValue {
        chardata: [b'k' as c_char; SAI_CHARDATA_SIZE],
    };
    assert_eq!(
        create(&api, SWITCH0.into(), &too_long).0,
        SAI_STATUS_INVALID_ATTR_VALUE_0
    );

    let mut unknown = list;
    unknown[2] = RawAttribute::new(77);
    assert_eq!(
        create(&api, SWITCH0.into(), &unknown).0,
        SAI_STATUS_UNKNOWN_ATTRIBUTE_0 - 2
    );

    // SAFETY: null pointers are rejected before being dereferenced
    let status = unsafe { (api.create_skey)(ptr::null_mut(), SWITCH0.into(), 3, list.as_ptr()) };
    assert_eq!(status, SAI_STATUS_INVALID_PARAMETER);
    let mut skey_id = 0;
    // SAFETY: null pointers are rejected before being dereferenced
    let status = unsafe { (api.create_skey)(&mut skey_id, SWITCH0.into(), 3, ptr::null()) };
    assert_eq!(status, SAI_STATUS_INVALID_PARAMETER);
    assert_eq!(skey_id, 0);

    assert_eq!(
        Instance::with_driver(|driver| driver.skey_count(SWITCH0)),
        Some(Ok(0))
    );
}

#[test]
fn set_is_rejected() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let list = raw_create_list(KEY, SERIAL_NUMBER, MAC);
    let (status, skey_id) = create(&api, SWITCH0.into(), &list);
    assert_eq!(status, SAI_STATUS_SUCCESS);
    for attribute in &list {
        // SAFETY: the attribute is valid for the duration of the call
        let status = unsafe { (api.set_skey_attribute)(skey_id, attribute) };
        assert_eq!(status, SAI_STATUS_INVALID_ATTRIBUTE_0);
    }
    // SAFETY: null pointers are rejected before being dereferenced
    let status = unsafe { (api.set_skey_attribute)(skey_id, ptr::null()) };
    assert_eq!(status, SAI_STATUS_INVALID_PARAMETER);
}

#[test]
fn unknown_get_attribute_leaves_list_untouched() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let (status, skey_id) = create(
        &api,
        SWITCH0.into(),
        &raw_create_list(KEY, SERIAL_NUMBER, MAC),
    );
    assert_eq!(status, SAI_STATUS_SUCCESS);

    let mut query = [
        RawAttribute::new(SkeyAttr::Sn.id()),
        RawAttribute::new(SkeyAttr::Mac.id() + 10),
    ];
    query[0].value = RawAttributeValue { u64: 0xdead };
    assert_eq!(
        get(&api, skey_id, &mut query),
        SAI_STATUS_UNKNOWN_ATTRIBUTE_0 - 1
    );
    assert_eq!(serial_number(&query[0]), 0xdead);

    // SAFETY: null pointers are rejected before being dereferenced
    let status = unsafe { (api.get_skey_attribute)(skey_id, 1, ptr::null_mut()) };
    assert_eq!(status, SAI_STATUS_INVALID_PARAMETER);
    assert_eq!(get(&api, skey_id, &mut []), SAI_STATUS_SUCCESS);
}

#[test]
fn uninitialized_driver() {
    static_instance!(Instance);
    let api = SkeyApiTable::for_instance::<Instance>();

    let (status, skey_id) = create(
        &api,
        SWITCH0.into(),
        &raw_create_list(KEY, SERIAL_NUMBER, MAC),
    );
    assert_eq!(status, SAI_STATUS_UNINITIALIZED);
    assert_eq!(skey_id, 0);
    assert_eq!(remove(&api, 1), SAI_STATUS_UNINITIALIZED);

    Instance::slot().install(init_driver());
    let (status, skey_id) = create(
        &api,
        SWITCH0.into(),
        &raw_create_list(KEY, SERIAL_NUMBER, MAC),
    );
    assert_eq!(status, SAI_STATUS_SUCCESS);
    assert!(Instance::slot().uninstall().is_some());
    assert_eq!(remove(&api, skey_id), SAI_STATUS_UNINITIALIZED);
}

#[test]
fn keys_created_through_typed_api_read_back_unchanged() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let with_nul = create_list(b"ab\0cdef", SERIAL_NUMBER, MAC);
    assert_eq!(
        Instance::with_driver(|driver| driver.create_skey(SWITCH0, &with_nul)),
        Some(Err(Error::InvalidAttrValue(0)))
    );

    let key = [0xa5u8; SAI_SKEY_KEY_SIZE];
    let list = create_list(&key, SERIAL_NUMBER, MAC);
    let skey_id = Instance::with_driver(|driver| driver.create_skey(SWITCH0, &list))
        .expect("driver not installed")
        .expect("failed to create service key");

    let mut query = [RawAttribute::new(SkeyAttr::Key.id())];
    assert_eq!(get(&api, skey_id.into(), &mut query), SAI_STATUS_SUCCESS);
    // SAFETY: the driver wrote the chardata member
    let decoded = unsafe { query[0].decode() }.expect("failed to decode");
    assert_eq!(decoded, list[0]);
}

#[test]
fn get_list_longer_than_create_limit() {
    static_instance!(Instance);
    Instance::slot().install(init_driver());
    let api = SkeyApiTable::for_instance::<Instance>();

    let (status, skey_id) = create(
        &api,
        SWITCH0.into(),
        &raw_create_list(KEY, SERIAL_NUMBER, MAC),
    );
    assert_eq!(status, SAI_STATUS_SUCCESS);

    let mut query = [RawAttribute::new(SkeyAttr::Sn.id()); MAX_ATTR_COUNT + 4];
    assert_eq!(get(&api, skey_id, &mut query), SAI_STATUS_SUCCESS);
    assert!(query
        .iter()
        .all(|attribute| serial_number(attribute) == SERIAL_NUMBER));

    let mut query = [RawAttribute::new(SkeyAttr::Sn.id()); MAX_ATTR_COUNT + 4];
    query[MAX_ATTR_COUNT + 3] = RawAttribute::new(SkeyAttr::Mac.id() + 1);
    assert_eq!(
        get(&api, skey_id, &mut query),
        SAI_STATUS_UNKNOWN_ATTRIBUTE_0 - (MAX_ATTR_COUNT as RawStatus + 3)
    );
    assert!(query[..MAX_ATTR_COUNT + 3]
        .iter()
        .all(|attribute| serial_number(attribute) == 0));
}
