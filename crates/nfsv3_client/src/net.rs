//! Traits for connecting to an endpoint.

use crate::io::{AsyncRead, AsyncWrite};

/// Trait for connecting to a host and port.
pub trait Connector: Send + Sync {
    type Connection: AsyncRead + AsyncWrite + 'static;

    /// Connect to a host and port.
    fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = std::io::Result<Self::Connection>> + Send;

    /// Connect to a host and port from the given local port.
    ///
    /// Used to originate connections from a privileged port, which some servers require.
    fn connect_with_port(
        &self,
        host: &str,
        port: u16,
        local_port: u16,
    ) -> impl Future<Output = std::io::Result<Self::Connection>> + Send;
}
