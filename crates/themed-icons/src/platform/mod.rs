//! Reference bundle platforms.
//!
//! [`memory`] keeps resource tables in memory. [`fs`] reads bundles laid out
//! as directories and is available with the `fs` feature.

use std::num::NonZeroU32;

pub mod memory;

#[cfg(feature = "fs")]
pub mod fs;

/// Identifiers are handed out above this base, the application package range.
pub(crate) const ID_BASE: NonZeroU32 = match NonZeroU32::new(0x7f00_0000) {
    Some(base) => base,
    None => panic!("resource id base must be non-zero"),
};
