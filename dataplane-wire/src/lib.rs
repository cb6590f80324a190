//! Text formats understood by the dataplane: dotted-quad IPv4 addresses and
//! `<address>/<length>` CIDR routes.
//!
//! Addresses are kept as their 32 bits, most significant bit first. Both
//! [`AddrBits`] and [`PrefixBits`] render as strings of binary digits, which is
//! the form the forwarding table compares on.
#![doc(issue_tracker_base_url = "https://github.com/chainbound/dataplane/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod addr;
pub use addr::{to_binary, AddrBits, PrefixBits};

mod cidr;
pub use cidr::{parse_cidr, Cidr, MAX_PREFIX_LEN};

use thiserror::Error;

/// A malformed address or CIDR string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid IPv4 address {addr:?}: expected 4 octets, found {found}")]
    OctetCount { addr: String, found: usize },
    #[error("invalid IPv4 address {addr:?}: octet {octet:?} is not a decimal integer")]
    InvalidOctet { addr: String, octet: String },
    #[error("invalid IPv4 address {addr:?}: octet {octet} is out of range [0, 255]")]
    OctetOutOfRange { addr: String, octet: String },
    #[error("invalid CIDR {0:?}: missing '/' separator")]
    MissingSeparator(String),
    #[error("invalid CIDR {0:?}: more than one '/' separator")]
    ExtraSeparator(String),
    #[error("invalid CIDR prefix length: {0:?}")]
    InvalidPrefixLength(String),
    #[error("CIDR prefix length must be between 0 and 32: {0}")]
    PrefixLengthOutOfRange(i64),
}
