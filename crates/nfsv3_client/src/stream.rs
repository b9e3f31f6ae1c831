//! Sequential file access on top of READ/WRITE.

use nfsv3_types::nfs3::nfs_fh3;

use crate::error::{Error, RpcError};
use crate::io::{AsyncRead, AsyncWrite};
use crate::target::Target;

/// Reads a file from offset 0 in chunks of the server's preferred read size.
#[derive(Debug)]
pub struct FileReader<'a, IO> {
    target: &'a mut Target<IO>,
    handle: nfs_fh3,
    offset: u64,
    chunk_size: u32,
    eof: bool,
}

impl<'a, IO> FileReader<'a, IO>
where
    IO: AsyncRead + AsyncWrite,
{
    pub(crate) fn new(target: &'a mut Target<IO>, handle: nfs_fh3) -> Self {
        let chunk_size = target.read_chunk_size();
        Self {
            target,
            handle,
            offset: 0,
            chunk_size,
            eof: false,
        }
    }

    pub const fn handle(&self) -> &nfs_fh3 {
        &self.handle
    }

    pub const fn position(&self) -> u64 {
        self.offset
    }

    /// `true` once the server flagged the end of the file.
    pub const fn is_eof(&self) -> bool {
        self.eof
    }

    /// Issues one READ of at most `buf.len()` bytes.
    ///
    /// Returns 0 without contacting the server once the end of the file was reached.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if self.eof || buf.is_empty() {
            return Ok(0);
        }

        let count = u32::try_from(buf.len())
            .unwrap_or(u32::MAX)
            .min(self.chunk_size);
        let res = self.target.read_at(&self.handle, self.offset, count).await?;
        let data = res.data.as_ref();
        if data.len() > count as usize {
            return Err(RpcError::WrongLength.into());
        }

        buf[..data.len()].copy_from_slice(data);
        self.offset += data.len() as u64;
        self.eof = res.eof;
        Ok(data.len())
    }

    /// Reads until the end of the file, appending to `out`. Returns the number of bytes read.
    pub async fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize, Error> {
        let mut buf = vec![0u8; self.chunk_size as usize];
        let mut total = 0;
        while !self.eof {
            let n = self.read(&mut buf).await?;
            if n == 0 && !self.eof {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "server returned no data before end of file",
                )
                .into());
            }
            out.extend_from_slice(&buf[..n]);
            total += n;
        }
        Ok(total)
    }
}

/// Writes a file from offset 0 with `FILE_SYNC` in chunks of the server's preferred write size.
#[derive(Debug)]
pub struct FileWriter<'a, IO> {
    target: &'a mut Target<IO>,
    handle: nfs_fh3,
    offset: u64,
    chunk_size: usize,
}

impl<'a, IO> FileWriter<'a, IO>
where
    IO: AsyncRead + AsyncWrite,
{
    pub(crate) fn new(target: &'a mut Target<IO>, handle: nfs_fh3) -> Self {
        let chunk_size = target.write_chunk_size() as usize;
        Self {
            target,
            handle,
            offset: 0,
            chunk_size,
        }
    }

    pub const fn handle(&self) -> &nfs_fh3 {
        &self.handle
    }

    pub const fn position(&self) -> u64 {
        self.offset
    }

    /// Writes all of `buf`, one WRITE per chunk.
    ///
    /// A short count from the server is resumed from the acknowledged position.
    pub async fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let mut written = 0;
        while written < buf.len() {
            let end = buf.len().min(written + self.chunk_size);
            let count = self
                .target
                .write_at(&self.handle, self.offset, &buf[written..end])
                .await?;
            if count == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "server accepted zero bytes",
                )
                .into());
            }
            let count = (count as usize).min(end - written);
            written += count;
            self.offset += count as u64;
        }
        Ok(written)
    }

    /// Commits the written data.
    pub async fn close(self) -> Result<(), Error> {
        self.target.commit(&self.handle).await
    }
}
