use clap::Parser;
use log::{error, info, warn, LevelFilter};
use saiskey::common::attribute::Attribute;
use saiskey::common::object::ObjectId;
use saiskey::common::status::Error;
use saiskey::config::driver::{MAX_SKEYS, MAX_SWITCHES};
use saiskey::integration::memory_driver::MemorySkeyDriver;
use saiskey::integration::raw_api::{DriverInstance, RawAttribute, SkeyApiTable};
use saiskey::integration::raw_status::into_result;
use saiskey::integration::static_driver::StaticDriver;
use saiskey::skey::api::SkeyApi;
use saiskey::skey::attr::{self, Serialized, SkeyAttr};
use simple_logger::SimpleLogger;

type Driver = MemorySkeyDriver<MAX_SKEYS, MAX_SWITCHES>;

static DRIVER: StaticDriver<Driver> = StaticDriver::new();

/// Hands the C method table access to [DRIVER]
struct Instance;

impl DriverInstance for Instance {
    type Driver = Driver;

    fn with_driver<R>(f: impl FnOnce(&mut Self::Driver) -> R) -> Option<R> {
        DRIVER.with(f)
    }
}

const DEFAULT_ATTRIBUTES: [&str; 3] = [
    "SAI_SKEY_ATTR_KEY=abcdefghijklmnopqrs",
    "SAI_SKEY_ATTR_SN=42",
    "SAI_SKEY_ATTR_MAC=aa:bb:cc:dd:ee:ff",
];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of switches served by the driver
    #[arg(long, default_value_t = 2)]
    switches: u8,
    /// Index of the switch to provision the service key on
    #[arg(long, default_value_t = 0)]
    switch: u8,
    /// Create attribute as NAME=VALUE, e.g. SAI_SKEY_ATTR_SN=42. Can be repeated.
    #[arg(short, long = "attr", value_parser = parse_attribute)]
    attributes: Vec<Attribute>,
    /// Log level
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

fn parse_attribute(text: &str) -> Result<Attribute, String> {
    attr::parse(text).map_err(|e| format!("invalid attribute '{text}': {e}"))
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level)
        .init()
        .expect("Failed to initialize logger");

    let switch_ids: Vec<ObjectId> = (0..args.switches).map(ObjectId::switch).collect();
    let driver = Driver::try_new(&switch_ids).inspect_err(|e| {
        error!("Failed to create driver for {} switches: {e}", args.switches);
    })?;
    DRIVER.install(driver);
    let api = SkeyApiTable::for_instance::<Instance>();

    let attributes = if args.attributes.is_empty() {
        DEFAULT_ATTRIBUTES
            .iter()
            .map(|text| attr::parse(text))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        args.attributes
    };
    for attribute in &attributes {
        info!("Create attribute: {}", Serialized(attribute));
    }

    // Create through the C method table
    let switch_id = ObjectId::switch(args.switch);
    let raw_attributes: Vec<RawAttribute> = attributes.iter().map(RawAttribute::encode).collect();
    let mut skey_id = 0u64;
    // SAFETY: pointers refer to live locals, every attribute was encoded from a typed value
    let status = unsafe {
        (api.create_skey)(
            &mut skey_id,
            switch_id.into(),
            raw_attributes.len() as u32,
            raw_attributes.as_ptr(),
        )
    };
    into_result(status).inspect_err(|e| error!("Failed to create service key: {e}"))?;
    let skey_id = ObjectId::from(skey_id);
    info!("Created service key {skey_id} on {switch_id}");

    // Read back through the typed API
    let mut slots = [SkeyAttr::Key.slot(), SkeyAttr::Sn.slot(), SkeyAttr::Mac.slot()];
    DRIVER
        .with(|driver| driver.get_skey_attribute(skey_id, &mut slots))
        .unwrap_or(Err(Error::Uninitialized))?;
    for slot in &slots {
        info!("Read attribute: {}", Serialized(slot));
    }

    // Service key attributes are create-only
    let update = RawAttribute::encode(&attr::serial_number(43));
    // SAFETY: `update` lives for the duration of the call
    let status = unsafe { (api.set_skey_attribute)(skey_id.into(), &update) };
    match into_result(status) {
        Ok(()) => warn!("Unexpectedly changed serial number of {skey_id}"),
        Err(e) => info!("Changing the serial number was rejected: {e}"),
    }

    // SAFETY: no pointers involved
    let status = unsafe { (api.remove_skey)(skey_id.into()) };
    into_result(status).inspect_err(|e| error!("Failed to remove service key: {e}"))?;
    info!("Removed service key {skey_id}");

    let mut query = [RawAttribute::new(SkeyAttr::Sn.id())];
    // SAFETY: `query` is valid for one element
    let status = unsafe { (api.get_skey_attribute)(skey_id.into(), 1, query.as_mut_ptr()) };
    match into_result(status) {
        Ok(()) => warn!("Removed service key {skey_id} is still readable"),
        Err(e) => info!("Reading the removed service key failed: {e}"),
    }

    Ok(())
}
