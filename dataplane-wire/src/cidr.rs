use std::{fmt, str::FromStr};

use crate::{to_binary, FormatError, PrefixBits};

/// The longest valid IPv4 prefix length.
pub const MAX_PREFIX_LEN: u8 = 32;

/// A parsed CIDR route: the network prefix bits and the prefix length.
///
/// The prefix is always exactly [`Cidr::prefix_len`] bits long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    prefix: PrefixBits,
}

impl Cidr {
    /// The network prefix bits.
    #[inline]
    pub const fn prefix(&self) -> PrefixBits {
        self.prefix
    }

    /// The prefix length, in `[0, 32]`.
    #[inline]
    pub const fn prefix_len(&self) -> u8 {
        self.prefix.len()
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addr = std::net::Ipv4Addr::from(self.prefix.as_u32());
        write!(f, "{addr}/{}", self.prefix.len())
    }
}

impl FromStr for Cidr {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

/// Parses `<dotted-quad>/<length>` into its network prefix.
///
/// The `/` must appear exactly once and the length must be an integer in
/// `[0, 32]`. The resulting prefix holds the leading `length` bits of the
/// address; any host bits beyond it are discarded.
pub fn parse_cidr(text: &str) -> Result<Cidr, FormatError> {
    let (addr, len) =
        text.split_once('/').ok_or_else(|| FormatError::MissingSeparator(text.to_string()))?;

    if len.contains('/') {
        return Err(FormatError::ExtraSeparator(text.to_string()));
    }

    let len = parse_prefix_len(len)?;

    Ok(Cidr { prefix: to_binary(addr)?.leading(len) })
}

/// Parses an optionally negative decimal prefix length and checks it is in
/// `[0, 32]`. Lengths too large for an `i64` saturate and are out of range.
fn parse_prefix_len(len: &str) -> Result<u8, FormatError> {
    let (negative, digits) = match len.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, len),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidPrefixLength(len.to_string()));
    }

    // Only an optional '-' and digits at this point, so the only way to fail
    // is overflow.
    let value = len.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX });

    u8::try_from(value)
        .ok()
        .filter(|len| *len <= MAX_PREFIX_LEN)
        .ok_or(FormatError::PrefixLengthOutOfRange(value))
}
