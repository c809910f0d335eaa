use crate::common::attribute::Chardata;
use crate::common::limits::{SAI_CHARDATA_SIZE, SAI_SKEY_KEY_SIZE};
use crate::common::status::Error;
use core::fmt;
use zeroize::Zeroize;

const _: () = assert!(SAI_SKEY_KEY_SIZE <= SAI_CHARDATA_SIZE);

/// Number of BLAKE3 output bytes used to identify key material in logs.
pub const FINGERPRINT_SIZE: usize = 8;

/// Service key material, at most [SAI_SKEY_KEY_SIZE] bytes. Zeroed on drop and never
/// printed.
#[derive(Clone)]
pub struct KeyMaterial {
    data: [u8; SAI_SKEY_KEY_SIZE],
    len: usize,
}

impl KeyMaterial {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Short digest that identifies the key without revealing it.
    pub fn fingerprint(&self) -> [u8; FINGERPRINT_SIZE] {
        let hash = blake3::hash(self.as_bytes());
        let mut fingerprint = [0u8; FINGERPRINT_SIZE];
        fingerprint.copy_from_slice(&hash.as_bytes()[..FINGERPRINT_SIZE]);
        fingerprint
    }

    pub fn to_chardata(&self) -> Result<Chardata, Error> {
        Chardata::try_from(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for KeyMaterial {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > SAI_SKEY_KEY_SIZE {
            return Err(Error::BufferOverflow);
        }
        let mut data = [0u8; SAI_SKEY_KEY_SIZE];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(KeyMaterial {
            data,
            len: bytes.len(),
        })
    }
}

impl TryFrom<&Chardata> for KeyMaterial {
    type Error = Error;

    fn try_from(chardata: &Chardata) -> Result<Self, Self::Error> {
        KeyMaterial::try_from(chardata.as_bytes())
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}
