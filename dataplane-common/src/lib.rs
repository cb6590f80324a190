//! Types shared by the router and the schedulers.

mod packet;
pub use packet::{Packet, Priority, UnknownPriority};
