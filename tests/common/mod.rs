#![allow(dead_code, unused_macros)]

use saiskey::{
    common::{attribute::Attribute, mac::MacAddress, object::ObjectId},
    config::driver::{MAX_SKEYS, MAX_SWITCHES, SWITCH_IDS},
    integration::{memory_driver::MemorySkeyDriver, raw_api::RawAttribute},
    skey::attr,
};

pub type TestDriver = MemorySkeyDriver<{ MAX_SKEYS }, { MAX_SWITCHES }>;

pub const SWITCH0: ObjectId = SWITCH_IDS[0];
pub const SWITCH1: ObjectId = SWITCH_IDS[1];
pub const UNKNOWN_SWITCH: ObjectId = ObjectId::switch(3);
pub const MAC: MacAddress = MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
/// 19 bytes of key material
pub const KEY: &[u8] = b"abcdefghijklmnopqrs";
pub const SERIAL_NUMBER: u64 = 42;

pub fn init_driver() -> TestDriver {
    TestDriver::try_new(&SWITCH_IDS).expect("failed to create driver")
}

pub fn create_list(key: &[u8], serial_number: u64, mac: MacAddress) -> [Attribute; 3] {
    [
        attr::key(key).expect("failed to build key attribute"),
        attr::serial_number(serial_number),
        attr::mac(mac),
    ]
}

pub fn raw_create_list(key: &[u8], serial_number: u64, mac: MacAddress) -> [RawAttribute; 3] {
    create_list(key, serial_number, mac).map(|attribute| RawAttribute::encode(&attribute))
}

/// Declares a [DriverInstance](saiskey::integration::raw_api::DriverInstance) type backed by
/// its own static driver slot.
macro_rules! static_instance {
    ($instance:ident) => {
        struct $instance;

        impl $instance {
            fn slot() -> &'static saiskey::integration::static_driver::StaticDriver<
                crate::common::TestDriver,
            > {
                static DRIVER: saiskey::integration::static_driver::StaticDriver<
                    crate::common::TestDriver,
                > = saiskey::integration::static_driver::StaticDriver::new();
                &DRIVER
            }
        }

        impl saiskey::integration::raw_api::DriverInstance for $instance {
            type Driver = crate::common::TestDriver;

            fn with_driver<R>(f: impl FnOnce(&mut Self::Driver) -> R) -> Option<R> {
                Self::slot().with(f)
            }
        }
    };
}
