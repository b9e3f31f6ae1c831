use std::io::{Read, Write};

use super::{Pack, Result, Unpack};

/// Optional-data sequence (`*next` linked lists in RFC 1813).
///
/// Each element is preceded by a non-zero "value follows" word and a zero word ends the
/// sequence.
/// No element count is stored, so decoding grows the vector until the terminator is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<T>(pub Vec<T>);

impl<T> Default for List<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> List<T> {
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Pack> Pack for List<T> {
    fn packed_size(&self) -> usize {
        self.0.iter().map(|item| 4 + item.packed_size()).sum::<usize>() + 4
    }

    fn pack(&self, output: &mut impl Write) -> Result<usize> {
        let mut len = 0;
        for item in &self.0 {
            len += true.pack(output)?;
            len += item.pack(output)?;
        }
        len += false.pack(output)?;
        Ok(len)
    }
}

impl<T: Unpack> Unpack for List<T> {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let mut items = Vec::new();
        let mut len = 0;
        loop {
            let (follows, follows_len) = u32::unpack(input)?;
            len += follows_len;
            if follows == 0 {
                break;
            }
            let (item, item_len) = T::unpack(input)?;
            len += item_len;
            items.push(item);
        }
        Ok((Self(items), len))
    }
}
