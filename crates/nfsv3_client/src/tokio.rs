//! Tokio runtime adapters: byte streams and a TCP connector.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use ::tokio::io::{AsyncRead as TokioAsyncRead, AsyncWrite as TokioAsyncWrite};
use ::tokio::net::{TcpSocket, TcpStream};

use crate::io::{AsyncRead, AsyncWrite};
use crate::net::Connector;

/// Adapts any tokio stream to the crate's [`AsyncRead`]/[`AsyncWrite`] traits.
#[derive(Debug)]
pub struct TokioIo<T>(T);

impl<T> TokioIo<T> {
    pub const fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> AsyncRead for TokioIo<T>
where
    T: TokioAsyncRead + Unpin + Send,
{
    async fn async_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        ::tokio::io::AsyncReadExt::read(&mut self.0, buf).await
    }
}

impl<T> AsyncWrite for TokioIo<T>
where
    T: TokioAsyncWrite + Unpin + Send,
{
    async fn async_write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        ::tokio::io::AsyncWriteExt::write(&mut self.0, buf).await
    }

    async fn async_shutdown(&mut self) -> std::io::Result<()> {
        ::tokio::io::AsyncWriteExt::shutdown(&mut self.0).await
    }
}

/// TCP connector on the tokio runtime.
///
/// [`Connector::connect_with_port`] binds the local port before connecting.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioConnector;

impl Connector for TokioConnector {
    type Connection = TokioIo<TcpStream>;

    async fn connect(&self, host: &str, port: u16) -> std::io::Result<Self::Connection> {
        let stream = TcpStream::connect((host, port)).await?;
        Ok(TokioIo::new(stream))
    }

    async fn connect_with_port(
        &self,
        host: &str,
        port: u16,
        local_port: u16,
    ) -> std::io::Result<Self::Connection> {
        let mut last_err = None;
        for addr in ::tokio::net::lookup_host((host, port)).await? {
            let (socket, local): (TcpSocket, SocketAddr) = if addr.is_ipv4() {
                (TcpSocket::new_v4()?, (Ipv4Addr::UNSPECIFIED, local_port).into())
            } else {
                (TcpSocket::new_v6()?, (Ipv6Addr::UNSPECIFIED, local_port).into())
            };
            socket.bind(local)?;
            match socket.connect(addr).await {
                Ok(stream) => return Ok(TokioIo::new(stream)),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no address found for {host}:{port}"),
            )
        }))
    }
}
