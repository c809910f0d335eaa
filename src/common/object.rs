use core::fmt;
use strum::{FromRepr, IntoStaticStr};

const TYPE_SHIFT: u32 = 56;
const SWITCH_SHIFT: u32 = 48;
const GENERATION_SHIFT: u32 = 32;

/// Kinds of objects an [ObjectId] can refer to.
#[derive(Copy, Clone, Debug, Eq, FromRepr, IntoStaticStr, PartialEq)]
#[repr(u8)]
pub enum ObjectType {
    #[strum(serialize = "SAI_OBJECT_TYPE_NULL")]
    Null = 0,
    #[strum(serialize = "SAI_OBJECT_TYPE_SWITCH")]
    Switch = 1,
    #[strum(serialize = "SAI_OBJECT_TYPE_SKEY")]
    Skey = 2,
}

/// Opaque 64-bit object identifier.
///
/// Layout: `type (8) | switch index (8) | generation (16) | slot (32)`. The generation changes
/// whenever a slot is reused so that identifiers of removed objects never become valid again.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub const NULL: ObjectId = ObjectId(0);

    pub const fn new(object_type: ObjectType, switch_index: u8, generation: u16, slot: u32) -> Self {
        ObjectId(
            ((object_type as u64) << TYPE_SHIFT)
                | ((switch_index as u64) << SWITCH_SHIFT)
                | ((generation as u64) << GENERATION_SHIFT)
                | slot as u64,
        )
    }

    /// Identifier of the switch with the given index.
    pub const fn switch(index: u8) -> Self {
        Self::new(ObjectType::Switch, index, 0, 0)
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Type of the referenced object. Identifiers with an unknown type tag are reported as
    /// [ObjectType::Null].
    pub fn object_type(&self) -> ObjectType {
        ObjectType::from_repr((self.0 >> TYPE_SHIFT) as u8).unwrap_or(ObjectType::Null)
    }

    pub const fn switch_index(&self) -> u8 {
        (self.0 >> SWITCH_SHIFT) as u8
    }

    pub const fn generation(&self) -> u16 {
        (self.0 >> GENERATION_SHIFT) as u16
    }

    pub const fn slot(&self) -> u32 {
        self.0 as u32
    }

    /// Identifier of the switch owning this object. A switch is its own owner.
    pub fn switch_id(&self) -> ObjectId {
        match self.object_type() {
            ObjectType::Null => ObjectId::NULL,
            _ => ObjectId::switch(self.switch_index()),
        }
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        ObjectId(value)
    }
}

impl From<ObjectId> for u64 {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oid:{:#018x}", self.0)
    }
}
