//! Physical I/O address tokens and their parsed form.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::signal::SignalDirection;

/// A raw address cell from the source table, kept verbatim.  Conflict
/// detection compares tokens exactly as written; parsing into an
/// [`IoAddress`] is a separate, fallible step.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressToken(String);

impl AddressToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse this token as a physical bit address.
    pub fn parse_physical(&self) -> Result<IoAddress, AddressParseFailed> {
        self.0.parse()
    }
}

impl From<&str> for AddressToken {
    fn from(s: &str) -> AddressToken {
        AddressToken(s.to_string())
    }
}

impl From<String> for AddressToken {
    fn from(s: String) -> AddressToken {
        AddressToken(s)
    }
}

impl Display for AddressToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(&self.0)
    }
}

/// Why a token failed to parse as a physical bit address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressParseFailed {
    /// Not of the form `%I<byte>.<bit>` or `%Q<byte>.<bit>`.
    NotABitAddress,
    /// The byte number does not fit in 16 bits.
    ByteTooLarge,
}

impl Error for AddressParseFailed {}

impl Display for AddressParseFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AddressParseFailed::NotABitAddress => {
                f.write_str("expected a bit address of the form %I<byte>.<bit> or %Q<byte>.<bit>")
            }
            AddressParseFailed::ByteTooLarge => f.write_str("byte number does not fit in 16 bits"),
        }
    }
}

/// A parsed physical bit address such as `%I3.4` or `%Q10.7`.  The
/// area letter fixes the signal direction, so a role's address can be
/// checked against the direction the role declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IoAddress {
    area: SignalDirection,
    byte: u16,
    bit: u8,
}

impl IoAddress {
    pub const fn area(&self) -> SignalDirection {
        self.area
    }

    pub const fn byte(&self) -> u16 {
        self.byte
    }

    pub const fn bit(&self) -> u8 {
        self.bit
    }
}

fn bit_address_regex() -> &'static Regex {
    static BIT_ADDRESS: OnceLock<Regex> = OnceLock::new();
    BIT_ADDRESS.get_or_init(|| {
        const PATTERN: &str = r"^%([IQ])([0-9]{1,5})\.([0-7])$";
        match Regex::new(PATTERN) {
            Ok(r) => r,
            Err(e) => {
                panic!("'{PATTERN}' is not a valid regular expression: {e}");
            }
        }
    })
}

impl FromStr for IoAddress {
    type Err = AddressParseFailed;

    fn from_str(s: &str) -> Result<IoAddress, AddressParseFailed> {
        let got = bit_address_regex()
            .captures(s)
            .ok_or(AddressParseFailed::NotABitAddress)?;
        let area = match &got[1] {
            "I" => SignalDirection::Input,
            "Q" => SignalDirection::Output,
            other => unreachable!("area capture admits only I and Q, got {other}"),
        };
        let byte: u16 = got[2]
            .parse()
            .map_err(|_| AddressParseFailed::ByteTooLarge)?;
        // The bit capture is a single digit 0-7.
        let bit: u8 = got[3].as_bytes()[0] - b'0';
        Ok(IoAddress { area, byte, bit })
    }
}

impl Display for IoAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "%{}{}.{}", self.area.area_letter(), self.byte, self.bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_address() {
        let a: IoAddress = "%I3.4".parse().expect("valid address");
        assert_eq!(a.area(), SignalDirection::Input);
        assert_eq!(a.byte(), 3);
        assert_eq!(a.bit(), 4);
    }

    #[test]
    fn test_parse_output_address() {
        let a: IoAddress = "%Q100.7".parse().expect("valid address");
        assert_eq!(a.area(), SignalDirection::Output);
        assert_eq!(a.byte(), 100);
        assert_eq!(a.bit(), 7);
    }

    #[test]
    fn test_reject_malformed_tokens() {
        for bad in ["", "X1", "I1.0", "%I1", "%I1.8", "%M1.0", "%I1.0.0", "%Q.3", "%I-1.0"] {
            assert_eq!(
                bad.parse::<IoAddress>(),
                Err(AddressParseFailed::NotABitAddress),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_reject_oversized_byte_number() {
        assert_eq!(
            "%I65536.0".parse::<IoAddress>(),
            Err(AddressParseFailed::ByteTooLarge)
        );
    }

    #[test]
    fn test_token_keeps_raw_spelling() {
        let token = AddressToken::from("%I01.0");
        assert_eq!(token.as_str(), "%I01.0");
        let parsed = token.parse_physical().expect("valid address");
        // Parsing normalizes, the token itself does not.
        assert_eq!(parsed.to_string(), "%I1.0");
        assert_eq!(token.to_string(), "%I01.0");
    }
}

#[cfg(test)]
mod addr_proptests {
    use super::IoAddress;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Arbitrary)]
    struct BitAddressTestInput {
        input_area: bool,
        byte: u16,
        #[strategy(0..8u8)]
        bit: u8,
    }

    #[proptest]
    fn rendered_addresses_parse_back(input: BitAddressTestInput) {
        let letter = if input.input_area { 'I' } else { 'Q' };
        let text = format!("%{}{}.{}", letter, input.byte, input.bit);
        let parsed: IoAddress = text.parse().expect("rendered form should be valid");
        assert_eq!(parsed.byte(), input.byte);
        assert_eq!(parsed.bit(), input.bit);
        assert_eq!(parsed.to_string(), text);
    }
}
