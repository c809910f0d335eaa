use crate::common::attribute::Attribute;
use crate::common::object::{ObjectId, ObjectType};
use crate::common::status::Error;
use crate::skey::api::{check_get_attributes, check_set_attribute, SkeyApi};
use crate::skey::attr::SkeyAttr;
use crate::skey::params::SkeyParams;
use heapless::Vec;
use log::{debug, warn};

/// Service key driver that keeps all keys in RAM.
///
/// Holds at most `MAX_SKEYS` keys shared by at most `MAX_SWITCHES` switches. Key material is
/// zeroed when a key is removed or the driver is dropped.
pub struct MemorySkeyDriver<const MAX_SKEYS: usize, const MAX_SWITCHES: usize> {
    switches: SortedSwitches<MAX_SWITCHES>,
    slots: [Slot; MAX_SKEYS],
}

/// Storage slot of a single service key.
#[derive(Default)]
struct Slot {
    /// Incremented whenever the slot is freed. Part of the key's object ID.
    generation: u16,
    /// Set once the generation is exhausted. A retired slot is never used again.
    retired: bool,
    entry: Option<Entry>,
}

impl Slot {
    fn is_free(&self) -> bool {
        !self.retired && self.entry.is_none()
    }

    /// Drop the entry and advance the generation so that IDs handed out for this slot never
    /// match again.
    fn release(&mut self) {
        // Dropping the entry zeroes the key material
        self.entry = None;
        match self.generation.checked_add(1) {
            Some(generation) => self.generation = generation,
            None => self.retired = true,
        }
    }
}

struct Entry {
    switch_id: ObjectId,
    params: SkeyParams,
}

impl<const MAX_SKEYS: usize, const MAX_SWITCHES: usize> MemorySkeyDriver<MAX_SKEYS, MAX_SWITCHES> {
    /// Create a driver serving the given switches.
    pub fn try_new(switch_ids: &[ObjectId]) -> Result<Self, Error> {
        Ok(Self {
            switches: SortedSwitches::try_from(switch_ids)?,
            slots: core::array::from_fn(|_| Slot::default()),
        })
    }

    /// Start serving another switch.
    pub fn add_switch(&mut self, switch_id: ObjectId) -> Result<(), Error> {
        self.switches.insert(switch_id)
    }

    /// Stop serving a switch. Fails with [Error::ObjectInUse] while service keys exist on it.
    pub fn remove_switch(&mut self, switch_id: ObjectId) -> Result<(), Error> {
        if !self.switches.contains(switch_id) {
            return Err(Error::InvalidObjectId);
        }
        if self.skey_count(switch_id)? > 0 {
            warn!("Refusing to remove {switch_id}: service keys still exist");
            return Err(Error::ObjectInUse);
        }
        self.switches.remove(switch_id)
    }

    /// Number of service keys on `switch_id`.
    pub fn skey_count(&self, switch_id: ObjectId) -> Result<usize, Error> {
        if !self.switches.contains(switch_id) {
            return Err(Error::InvalidObjectId);
        }
        Ok(self.entries().filter(|(_, e)| e.switch_id == switch_id).count())
    }

    /// Number of service keys that can still be created, across all switches. Slots whose
    /// generations are used up no longer count.
    pub fn available_skeys(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_free()).count()
    }

    /// IDs of all service keys on `switch_id`, in storage order.
    pub fn skey_ids(&self, switch_id: ObjectId) -> Result<Vec<ObjectId, MAX_SKEYS>, Error> {
        if !self.switches.contains(switch_id) {
            return Err(Error::InvalidObjectId);
        }
        let mut ids = Vec::new();
        for (id, _) in self.entries().filter(|(_, e)| e.switch_id == switch_id) {
            // At most MAX_SKEYS entries exist
            ids.push(id).map_err(|_| Error::BufferOverflow)?;
        }
        Ok(ids)
    }

    fn entries(&self) -> impl Iterator<Item = (ObjectId, &Entry)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry
                .as_ref()
                .map(|entry| (Self::object_id(entry.switch_id, slot.generation, index), entry))
        })
    }

    fn object_id(switch_id: ObjectId, generation: u16, index: usize) -> ObjectId {
        ObjectId::new(
            ObjectType::Skey,
            switch_id.switch_index(),
            generation,
            index as u32,
        )
    }

    /// Resolve a service key ID to its slot. Removed, foreign and malformed IDs are rejected.
    fn slot_index(&self, skey_id: ObjectId) -> Result<usize, Error> {
        if skey_id.object_type() != ObjectType::Skey {
            return Err(Error::InvalidObjectId);
        }
        let index = skey_id.slot() as usize;
        match self.slots.get(index) {
            Some(Slot {
                generation,
                entry: Some(entry),
                ..
            }) if *generation == skey_id.generation()
                && entry.switch_id == skey_id.switch_id() =>
            {
                Ok(index)
            }
            _ => Err(Error::InvalidObjectId),
        }
    }

    fn entry(&self, skey_id: ObjectId) -> Result<&Entry, Error> {
        let index = self.slot_index(skey_id)?;
        self.slots[index].entry.as_ref().ok_or(Error::InvalidObjectId)
    }
}

impl<const MAX_SKEYS: usize, const MAX_SWITCHES: usize> SkeyApi
    for MemorySkeyDriver<MAX_SKEYS, MAX_SWITCHES>
{
    fn create_skey(
        &mut self,
        switch_id: ObjectId,
        attributes: &[Attribute],
    ) -> Result<ObjectId, Error> {
        if !self.switches.contains(switch_id) {
            warn!("Cannot create service key: unknown switch {switch_id}");
            return Err(Error::InvalidObjectId);
        }
        let params = SkeyParams::try_from(attributes).inspect_err(|e| {
            warn!("Cannot create service key on {switch_id}: {e}");
        })?;
        let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_free())
        else {
            warn!(
                "Cannot create service key on {switch_id}: all {} slots in use",
                MAX_SKEYS
            );
            return Err(Error::InsufficientResources);
        };
        let skey_id = Self::object_id(switch_id, slot.generation, index);
        debug!(
            "Created service key {skey_id} on {switch_id} (sn={}, mac={}, key fingerprint={:02x?})",
            params.serial_number,
            params.mac,
            params.key.fingerprint()
        );
        slot.entry = Some(Entry { switch_id, params });
        Ok(skey_id)
    }

    fn remove_skey(&mut self, skey_id: ObjectId) -> Result<(), Error> {
        let index = self.slot_index(skey_id).inspect_err(|_| {
            warn!("Cannot remove service key {skey_id}: invalid ID");
        })?;
        let slot = &mut self.slots[index];
        slot.release();
        if slot.retired {
            warn!("Retiring slot {index}: all generations used");
        }
        debug!("Removed service key {skey_id}");
        Ok(())
    }

    fn set_skey_attribute(&mut self, skey_id: ObjectId, attribute: &Attribute) -> Result<(), Error> {
        self.entry(skey_id)?;
        let attr = check_set_attribute(attribute).inspect_err(|e| {
            warn!("Cannot set attribute of service key {skey_id}: {e}");
        })?;
        // No settable attributes are defined yet
        match attr {
            SkeyAttr::Key | SkeyAttr::Sn | SkeyAttr::Mac => Err(Error::InvalidAttribute(0)),
        }
    }

    fn get_skey_attribute(
        &self,
        skey_id: ObjectId,
        attributes: &mut [Attribute],
    ) -> Result<(), Error> {
        let entry = self.entry(skey_id)?;
        check_get_attributes(attributes)?;
        for attribute in attributes.iter_mut() {
            let attr = SkeyAttr::from_id(attribute.id).ok_or(Error::UnknownAttribute(0))?;
            attribute.value = entry.params.value(attr)?;
        }
        Ok(())
    }
}

/// Keeps a sorted list of switch IDs
#[derive(Default)]
struct SortedSwitches<const MAX_SWITCHES: usize> {
    inner: Vec<ObjectId, MAX_SWITCHES>,
}

impl<const MAX_SWITCHES: usize> SortedSwitches<MAX_SWITCHES> {
    fn contains(&self, switch_id: ObjectId) -> bool {
        self.inner.binary_search(&switch_id).is_ok()
    }

    fn insert(&mut self, switch_id: ObjectId) -> Result<(), Error> {
        if switch_id.object_type() != ObjectType::Switch {
            return Err(Error::InvalidObjectType);
        }
        if switch_id != ObjectId::switch(switch_id.switch_index()) {
            return Err(Error::InvalidObjectId);
        }
        if self.contains(switch_id) {
            return Err(Error::ItemAlreadyExists);
        }
        self.inner
            .push(switch_id)
            .map_err(|_| Error::InsufficientResources)?;
        self.inner.sort_unstable();
        Ok(())
    }

    fn remove(&mut self, switch_id: ObjectId) -> Result<(), Error> {
        let index = self
            .inner
            .binary_search(&switch_id)
            .map_err(|_| Error::InvalidObjectId)?;
        self.inner.swap_remove(index);
        self.inner.sort_unstable();
        Ok(())
    }
}

impl<const MAX_SWITCHES: usize> TryFrom<&[ObjectId]> for SortedSwitches<MAX_SWITCHES> {
    type Error = Error;

    fn try_from(switch_ids: &[ObjectId]) -> Result<Self, Self::Error> {
        if switch_ids.len() > MAX_SWITCHES {
            return Err(Error::InsufficientResources);
        }
        let mut ret = Self::default();
        for switch_id in switch_ids {
            ret.insert(*switch_id)?;
        }
        Ok(ret)
    }
}
