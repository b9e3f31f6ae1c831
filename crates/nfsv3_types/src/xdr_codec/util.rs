const ALIGNMENT: usize = 4;

/// Rounds `len` up to the XDR alignment of 4 bytes.
#[inline]
pub const fn add_padding(len: usize) -> usize {
    len + get_padding(len)
}

/// Number of zero bytes that follow `len` bytes of variable-length data.
#[inline]
pub const fn get_padding(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

#[inline]
pub(crate) fn zero_padding(len: usize) -> &'static [u8] {
    const ZEROES: [u8; ALIGNMENT - 1] = [0; ALIGNMENT - 1];
    &ZEROES[..get_padding(len)]
}
