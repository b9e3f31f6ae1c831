use std::io::{Read, Write};

use super::opaque::{pack_var_bytes, unpack_var_bytes};
use super::util::{add_padding, get_padding};
use super::{Error, Pack, Result, Unpack};

impl Pack for u32 {
    fn packed_size(&self) -> usize {
        4
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        out.write_all(&self.to_be_bytes())?;
        Ok(4)
    }
}

impl Unpack for u32 {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let mut bytes = [0u8; 4];
        input.read_exact(&mut bytes)?;
        Ok((Self::from_be_bytes(bytes), 4))
    }
}

impl Pack for i32 {
    fn packed_size(&self) -> usize {
        4
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        out.write_all(&self.to_be_bytes())?;
        Ok(4)
    }
}

impl Unpack for i32 {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let mut bytes = [0u8; 4];
        input.read_exact(&mut bytes)?;
        Ok((Self::from_be_bytes(bytes), 4))
    }
}

// XDR has no sub-word scalar: a byte travels as a full word.
impl Pack for u8 {
    fn packed_size(&self) -> usize {
        4
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        u32::from(*self).pack(out)
    }
}

impl Unpack for u8 {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (word, len) = u32::unpack(input)?;
        let value = Self::try_from(word).map_err(|_| Error::OutOfRange(word))?;
        Ok((value, len))
    }
}

impl Pack for u64 {
    fn packed_size(&self) -> usize {
        8
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        out.write_all(&self.to_be_bytes())?;
        Ok(8)
    }
}

impl Unpack for u64 {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let mut bytes = [0u8; 8];
        input.read_exact(&mut bytes)?;
        Ok((Self::from_be_bytes(bytes), 8))
    }
}

impl Pack for bool {
    fn packed_size(&self) -> usize {
        4
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        u32::from(*self).pack(out)
    }
}

impl Unpack for bool {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (val, bytes_read) = u32::unpack(input)?;
        match val {
            0 => Ok((false, bytes_read)),
            1 => Ok((true, bytes_read)),
            _ => Err(Error::InvalidEnumValue(val)),
        }
    }
}

impl Pack for String {
    fn packed_size(&self) -> usize {
        4 + add_padding(self.len())
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        pack_var_bytes(self.as_bytes(), out)
    }
}

impl Unpack for String {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (bytes, len) = unpack_var_bytes(input)?;
        let value = Self::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        Ok((value, len))
    }
}

// Counted array of words: the element count comes first.
impl Pack for Vec<u32> {
    fn packed_size(&self) -> usize {
        4 + self.len() * 4
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        let mut bytes_written = u32::try_from(self.len())
            .map_err(|_| Error::ObjectTooLarge(self.len()))?
            .pack(out)?;
        for item in self {
            bytes_written += item.pack(out)?;
        }
        Ok(bytes_written)
    }
}

impl Unpack for Vec<u32> {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (len, mut bytes_read) = u32::unpack(input)?;
        // the count comes from the wire, so grow as elements actually arrive
        let mut vec = Self::new();
        for _ in 0..len {
            let (item, item_bytes) = u32::unpack(input)?;
            bytes_read += item_bytes;
            vec.push(item);
        }
        Ok((vec, bytes_read))
    }
}

// Fixed-size array: each element in order, no length prefix.
impl<T: Pack, const N: usize> Pack for [T; N] {
    fn packed_size(&self) -> usize {
        self.iter().map(Pack::packed_size).sum()
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        let mut bytes_written = 0;
        for item in self {
            bytes_written += item.pack(out)?;
        }
        Ok(bytes_written)
    }
}

impl<T: Unpack, const N: usize> Unpack for [T; N] {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let mut items = Vec::with_capacity(N);
        let mut bytes_read = 0;
        for _ in 0..N {
            let (item, item_bytes) = T::unpack(input)?;
            bytes_read += item_bytes;
            items.push(item);
        }
        let array = items.try_into().map_err(|_| Error::InvalidLength(N))?;
        Ok((array, bytes_read))
    }
}

/// Packs fixed-length opaque data (`opaque name[N]`): raw bytes plus padding, no length word.
pub fn pack_fixed_opaque(data: &[u8], out: &mut impl Write) -> Result<usize> {
    out.write_all(data)?;
    let padding = super::util::zero_padding(data.len());
    out.write_all(padding)?;
    Ok(data.len() + padding.len())
}

/// Unpacks fixed-length opaque data into a byte array, consuming the padding.
pub fn unpack_fixed_opaque<const N: usize>(input: &mut impl Read) -> Result<([u8; N], usize)> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf)?;
    let pad = get_padding(N);
    if pad > 0 {
        let mut pad_buf = [0u8; 3];
        input.read_exact(&mut pad_buf[..pad])?;
    }
    Ok((buf, N + pad))
}
