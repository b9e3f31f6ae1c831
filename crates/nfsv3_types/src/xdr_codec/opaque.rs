use std::borrow::Cow;
use std::io::{Read, Write};

use super::util::{add_padding, get_padding, zero_padding};
use super::{Error, Pack, Result, Unpack};

/// Variable-length opaque data (`opaque name<>`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opaque<'a>(pub Cow<'a, [u8]>);

impl Opaque<'static> {
    /// Creates a new `Opaque` with owned data.
    #[must_use]
    pub const fn owned(data: Vec<u8>) -> Self {
        Opaque(Cow::Owned(data))
    }
}

impl<'a> Opaque<'a> {
    /// Creates a new `Opaque` from a borrowed slice.
    #[must_use]
    pub const fn borrowed(data: &'a [u8]) -> Self {
        Opaque(Cow::Borrowed(data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extracts the owned data, cloning it if it is borrowed.
    #[must_use]
    pub fn into_owned(self) -> Vec<u8> {
        self.0.into_owned()
    }

    /// Detaches the data from the borrowed buffer.
    #[must_use]
    pub fn to_static(&self) -> Opaque<'static> {
        Opaque(Cow::Owned(self.0.to_vec()))
    }
}

impl Pack for Opaque<'_> {
    fn packed_size(&self) -> usize {
        4 + add_padding(self.0.len())
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        pack_var_bytes(&self.0, out)
    }
}

impl Unpack for Opaque<'_> {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (buf, len) = unpack_var_bytes(input)?;
        Ok((Opaque(Cow::Owned(buf)), len))
    }
}

impl AsRef<[u8]> for Opaque<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<Vec<u8>> for Opaque<'static> {
    fn from(vec: Vec<u8>) -> Self {
        Opaque(Cow::Owned(vec))
    }
}

impl<'a> From<&'a [u8]> for Opaque<'a> {
    fn from(slice: &'a [u8]) -> Self {
        Opaque(Cow::Borrowed(slice))
    }
}

/// Length word, data, then zero padding up to the next 4-byte boundary.
pub(crate) fn pack_var_bytes(data: &[u8], out: &mut impl Write) -> Result<usize> {
    let len = u32::try_from(data.len()).map_err(|_| Error::ObjectTooLarge(data.len()))?;
    let mut bytes_written = len.pack(out)?;

    out.write_all(data)?;
    bytes_written += data.len();

    let padding = zero_padding(data.len());
    out.write_all(padding)?;
    bytes_written += padding.len();
    Ok(bytes_written)
}

/// Reads the length word, the data and the padding.
///
/// The length comes from the peer, so the buffer grows with the bytes that actually arrive
/// instead of being allocated up front.
pub(crate) fn unpack_var_bytes(input: &mut impl Read) -> Result<(Vec<u8>, usize)> {
    let (len, mut bytes_read) = u32::unpack(input)?;
    let len = len as usize;

    let mut buf = Vec::new();
    input.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(Error::TruncatedData);
    }
    bytes_read += len;

    let pad = get_padding(len);
    if pad > 0 {
        let mut pad_buf = [0u8; 3];
        input.read_exact(&mut pad_buf[..pad])?;
        bytes_read += pad;
    }

    Ok((buf, bytes_read))
}
