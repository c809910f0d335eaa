use crate::common::limits::MAC_ADDRESS_SIZE;
use core::fmt;
use core::str::FromStr;
use displaydoc::Display;

/// Hardware (MAC) address of a switch.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct MacAddress(pub [u8; MAC_ADDRESS_SIZE]);

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum ParseError {
    /// MAC address must consist of six octets
    OctetCount,
    /// MAC address octet is not a two digit hexadecimal number
    Octet,
    /// MAC address mixes ':' and '-' separators
    MixedSeparators,
}

impl MacAddress {
    pub const fn new(octets: [u8; MAC_ADDRESS_SIZE]) -> Self {
        MacAddress(octets)
    }

    pub const fn octets(&self) -> [u8; MAC_ADDRESS_SIZE] {
        self.0
    }

    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl From<[u8; MAC_ADDRESS_SIZE]> for MacAddress {
    fn from(octets: [u8; MAC_ADDRESS_SIZE]) -> Self {
        MacAddress(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Accepts `aa:bb:cc:dd:ee:ff` and `aa-bb-cc-dd-ee-ff`, in either case.
impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator = if s.contains(':') { ':' } else { '-' };
        if s.contains(':') && s.contains('-') {
            return Err(ParseError::MixedSeparators);
        }
        let mut octets = [0u8; MAC_ADDRESS_SIZE];
        let mut count = 0;
        for part in s.split(separator) {
            if count == MAC_ADDRESS_SIZE {
                return Err(ParseError::OctetCount);
            }
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseError::Octet);
            }
            octets[count] = u8::from_str_radix(part, 16).map_err(|_| ParseError::Octet)?;
            count += 1;
        }
        if count != MAC_ADDRESS_SIZE {
            return Err(ParseError::OctetCount);
        }
        Ok(MacAddress(octets))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn parse_and_format() {
        let mac: MacAddress = "AA:bb:cc:dd:ee:FF".parse().expect("failed to parse MAC");
        assert_eq!(mac.octets(), [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        let mut text: String<17> = String::new();
        write!(text, "{mac}").expect("buffer too small");
        assert_eq!(text.as_str(), "aa:bb:cc:dd:ee:ff");

        let dashed: MacAddress = "00-11-22-33-44-55".parse().expect("failed to parse MAC");
        assert_eq!(dashed.octets(), [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert!(!dashed.is_multicast());
        assert!(MacAddress::new([0x01, 0, 0x5e, 0, 0, 1]).is_multicast());
    }

    #[test]
    fn reject_malformed() {
        assert_eq!(
            "aa:bb:cc:dd:ee".parse::<MacAddress>(),
            Err(ParseError::OctetCount)
        );
        assert_eq!(
            "aa:bb:cc:dd:ee:ff:00".parse::<MacAddress>(),
            Err(ParseError::OctetCount)
        );
        assert_eq!(
            "aa:bb:cc:dd:ee:fg".parse::<MacAddress>(),
            Err(ParseError::Octet)
        );
        assert_eq!(
            "aa:bb:cc:dd:ee:f".parse::<MacAddress>(),
            Err(ParseError::Octet)
        );
        assert_eq!(
            "aa:bb-cc:dd:ee:ff".parse::<MacAddress>(),
            Err(ParseError::MixedSeparators)
        );
        assert_eq!("".parse::<MacAddress>(), Err(ParseError::Octet));
    }
}
