//! Byte-stream traits the RPC transport runs on.
//!
//! Runtime adapters live in the `tokio` and `smol` modules.

use std::io::{Error, ErrorKind};

/// Readable half of a connection.
pub trait AsyncRead: Send {
    /// Reads at most `buf.len()` bytes. 0 means the peer closed the stream.
    fn async_read(&mut self, buf: &mut [u8])
    -> impl Future<Output = std::io::Result<usize>> + Send;

    /// Fills `buf` completely or fails with [`ErrorKind::UnexpectedEof`].
    fn async_read_exact(
        &mut self,
        buf: &mut [u8],
    ) -> impl Future<Output = std::io::Result<()>> + Send {
        async move {
            let mut filled = 0;
            while filled < buf.len() {
                match self.async_read(&mut buf[filled..]).await? {
                    0 => {
                        return Err(Error::new(
                            ErrorKind::UnexpectedEof,
                            "stream closed before the buffer was filled",
                        ));
                    }
                    n => filled += n,
                }
            }
            Ok(())
        }
    }
}

/// Writable half of a connection.
pub trait AsyncWrite: Send {
    /// Writes some prefix of `buf` and returns its length.
    fn async_write(&mut self, buf: &[u8]) -> impl Future<Output = std::io::Result<usize>> + Send;

    /// Writes the whole of `buf`; a zero-length write is [`ErrorKind::WriteZero`].
    fn async_write_all(&mut self, buf: &[u8]) -> impl Future<Output = std::io::Result<()>> + Send {
        async move {
            let mut written = 0;
            while written < buf.len() {
                match self.async_write(&buf[written..]).await? {
                    0 => return Err(Error::new(ErrorKind::WriteZero, "peer accepted no bytes")),
                    n => written += n,
                }
            }
            Ok(())
        }
    }

    /// Closes the write half. The default does nothing.
    fn async_shutdown(&mut self) -> impl Future<Output = std::io::Result<()>> + Send {
        async { Ok(()) }
    }
}
