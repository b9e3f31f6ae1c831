//! Smol runtime adapters: byte streams and a TCP connector.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use smol::io::{AsyncRead as SmolAsyncRead, AsyncWrite as SmolAsyncWrite};
use smol::net::TcpStream;
use socket2::{Domain, Protocol, Socket, Type};

use crate::io::{AsyncRead, AsyncWrite};
use crate::net::Connector;

/// Adapts any smol stream to the crate's [`AsyncRead`]/[`AsyncWrite`] traits.
#[derive(Debug)]
pub struct SmolIo<T>(T);

impl<T> SmolIo<T> {
    pub const fn new(inner: T) -> Self {
        Self(inner)
    }
}

impl<T> AsyncRead for SmolIo<T>
where
    T: SmolAsyncRead + Unpin + Send,
{
    async fn async_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        smol::io::AsyncReadExt::read(&mut self.0, buf).await
    }
}

impl<T> AsyncWrite for SmolIo<T>
where
    T: SmolAsyncWrite + Unpin + Send,
{
    async fn async_write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        smol::io::AsyncWriteExt::write(&mut self.0, buf).await
    }

    async fn async_shutdown(&mut self) -> std::io::Result<()> {
        smol::io::AsyncWriteExt::close(&mut self.0).await
    }
}

/// TCP connector on the smol runtime.
///
/// [`Connector::connect_with_port`] binds the local port before connecting.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmolConnector;

impl Connector for SmolConnector {
    type Connection = SmolIo<TcpStream>;

    async fn connect(&self, host: &str, port: u16) -> std::io::Result<Self::Connection> {
        let stream = TcpStream::connect((host, port)).await?;
        Ok(SmolIo::new(stream))
    }

    async fn connect_with_port(
        &self,
        host: &str,
        port: u16,
        local_port: u16,
    ) -> std::io::Result<Self::Connection> {
        let mut last_err = None;
        for addr in smol::net::resolve((host, port)).await? {
            // smol has no bind-before-connect, so the socket is set up through socket2
            match smol::unblock(move || bind_and_connect(addr, local_port)).await {
                Ok(stream) => return Ok(SmolIo::new(TcpStream::try_from(stream)?)),
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

fn bind_and_connect(addr: SocketAddr, local_port: u16) -> std::io::Result<std::net::TcpStream> {
    let local: SocketAddr = if addr.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, local_port).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, local_port).into()
    };
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.bind(&local.into())?;
    socket.connect(&addr.into())?;
    Ok(socket.into())
}
