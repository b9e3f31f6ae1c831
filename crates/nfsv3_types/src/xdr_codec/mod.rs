//! XDR (RFC 4506) encoding engine.
//!
//! Every record implements [`Pack`] and [`Unpack`], usually through `#[derive(XdrCodec)]`.
//! The supported building blocks are 32/64-bit integers (`u8` travels as a full word), `bool`,
//! [`String`], [`Opaque`] bytes, fixed arrays, counted `Vec<u32>`, nested records and the
//! optional-data [`List`]. Anything else has no codec and fails to compile.

pub(crate) mod error;
pub(crate) mod list;
pub(crate) mod opaque;
pub(crate) mod primitives;
pub(crate) mod traits;
pub(crate) mod util;
pub(crate) mod void;

/// Derive macro that implements [`Pack`] and [`Unpack`] traits.
pub use nfsv3_macros::XdrCodec;

pub use self::error::Error;
pub use self::list::List;
pub use self::opaque::Opaque;
pub use self::primitives::{pack_fixed_opaque, unpack_fixed_opaque};
pub use self::traits::{Pack, Unpack};
pub use self::util::{add_padding, get_padding};
pub use self::void::Void;

pub type Result<T> = std::result::Result<T, Error>;

/// Packs `value` into a freshly allocated buffer.
pub fn to_bytes(value: &impl Pack) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(value.packed_size());
    value.pack(&mut buf)?;
    Ok(buf)
}

/// Unpacks a `T` from the front of `bytes`, returning it with the number of bytes consumed.
pub fn from_bytes<T: Unpack>(bytes: &[u8]) -> Result<(T, usize)> {
    let mut cursor = bytes;
    T::unpack(&mut cursor)
}
