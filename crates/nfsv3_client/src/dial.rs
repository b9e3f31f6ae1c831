//! Resolving a program through the portmapper and connecting to it.

use std::io::ErrorKind;

use nfsv3_types::portmap::PMAP_PORT;
use tracing::debug;

use crate::error::{Error, PortmapError};
use crate::net::Connector;
use crate::portmapper::PortmapperClient;

const PRIVILEGED_PORT_ATTEMPTS: usize = 16;

/// When to originate connections from a reserved (< 1024) local port.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PrivilegedPort {
    /// Only when the process runs with effective uid 0.
    #[default]
    Auto,
    Always,
    Never,
}

impl PrivilegedPort {
    fn wanted(self) -> bool {
        match self {
            Self::Auto => is_privileged(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DialOptions {
    pub portmapper_port: u16,
    pub privileged_port: PrivilegedPort,
}

impl Default for DialOptions {
    fn default() -> Self {
        Self {
            portmapper_port: PMAP_PORT,
            privileged_port: PrivilegedPort::Auto,
        }
    }
}

/// `true` when the process may bind reserved ports.
#[cfg(unix)]
#[must_use]
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
#[must_use]
pub const fn is_privileged() -> bool {
    false
}

/// Asks the portmapper on `host` for the TCP port of `prog`/`vers`.
pub async fn resolve_port<C: Connector>(
    connector: &C,
    host: &str,
    portmapper_port: u16,
    prog: u32,
    vers: u32,
) -> Result<u16, Error> {
    let io = connector.connect(host, portmapper_port).await?;
    let mut portmapper = PortmapperClient::new(io);
    let port = portmapper.getport(prog, vers).await;
    portmapper.close().await?;
    let port = port?;

    if port == 0 {
        return Err(PortmapError::ProgramUnavailable.into());
    }
    let port = u16::try_from(port).map_err(|_| PortmapError::InvalidPortValue(port))?;
    debug!(prog, vers, port, "resolved port");
    Ok(port)
}

/// Resolves `prog`/`vers` through the portmapper and connects to it.
pub async fn dial_service<C: Connector>(
    connector: &C,
    host: &str,
    prog: u32,
    vers: u32,
    options: &DialOptions,
) -> Result<C::Connection, Error> {
    let port = resolve_port(connector, host, options.portmapper_port, prog, vers).await?;
    connect_to(connector, host, port, options.privileged_port).await
}

/// Connects to `host:port`, from a random reserved local port if `policy` asks for one.
///
/// Reserved ports that are taken or refused are retried a bounded number of times before
/// falling back to an ordinary connection.
pub async fn connect_to<C: Connector>(
    connector: &C,
    host: &str,
    port: u16,
    policy: PrivilegedPort,
) -> Result<C::Connection, Error> {
    if !policy.wanted() {
        return Ok(connector.connect(host, port).await?);
    }

    for _ in 0..PRIVILEGED_PORT_ATTEMPTS {
        let local_port: u16 = rand::random_range(1..1024);
        match connector.connect_with_port(host, port, local_port).await {
            Ok(io) => {
                debug!(port, local_port, "connected from reserved port");
                return Ok(io);
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::AddrInUse | ErrorKind::PermissionDenied | ErrorKind::AddrNotAvailable
                ) =>
            {
                debug!(local_port, error = %e, "reserved port unavailable");
            }
            Err(e) => return Err(e.into()),
        }
    }

    debug!(port, "no reserved port available, connecting from an ephemeral port");
    Ok(connector.connect(host, port).await?)
}
