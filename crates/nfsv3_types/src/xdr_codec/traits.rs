use std::io::{Read, Write};

use super::Result;

/// Packing trait
pub trait Pack {
    /// Returns the packed size of the type.
    ///
    /// This includes any padding required to keep the data 4-byte aligned.
    fn packed_size(&self) -> usize;

    /// Packs the type into `out`, returning the number of bytes written.
    fn pack(&self, out: &mut impl Write) -> Result<usize>;
}

/// Unpacking trait
pub trait Unpack: Sized {
    /// Unpacks the type from `input`, returning it with the number of bytes read.
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)>;
}
