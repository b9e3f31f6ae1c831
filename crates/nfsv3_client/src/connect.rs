use nfsv3_types::portmap::PMAP_PORT;

use crate::dial::{self, DialOptions, PrivilegedPort};
use crate::error::Error;
use crate::mount::MountSession;
use crate::net::Connector;
use crate::target::Owner;

/// Builder for a [`MountSession`].
///
/// MOUNT and NFS ports are resolved through the portmapper unless set explicitly.
pub struct SessionBuilder<C> {
    connector: C,
    host: String,
    portmapper_port: u16,
    mount_port: Option<u16>,
    nfs3_port: Option<u16>,
    privileged_port: PrivilegedPort,
    owner: Option<Owner>,
}

impl<C: Connector> SessionBuilder<C> {
    pub fn new(connector: C, host: impl Into<String>) -> Self {
        Self {
            connector,
            host: host.into(),
            portmapper_port: PMAP_PORT,
            mount_port: None,
            nfs3_port: None,
            privileged_port: PrivilegedPort::Auto,
            owner: None,
        }
    }

    /// Sets the portmapper port. The default port is 111.
    #[must_use]
    pub const fn portmapper_port(mut self, port: u16) -> Self {
        self.portmapper_port = port;
        self
    }

    /// Sets the mount port. The default port is resolved from the portmapper.
    #[must_use]
    pub const fn mount_port(mut self, port: u16) -> Self {
        self.mount_port = Some(port);
        self
    }

    /// Sets the NFSv3 port. The default port is resolved from the portmapper.
    #[must_use]
    pub const fn nfs3_port(mut self, port: u16) -> Self {
        self.nfs3_port = Some(port);
        self
    }

    /// Sets when connections originate from a reserved port. The default is
    /// [`PrivilegedPort::Auto`].
    #[must_use]
    pub const fn privileged_port(mut self, policy: PrivilegedPort) -> Self {
        self.privileged_port = policy;
        self
    }

    /// Sets the uid/gid given to directories and files the mounted targets create.
    #[must_use]
    pub const fn owner(mut self, uid: u32, gid: u32) -> Self {
        self.owner = Some(Owner { uid, gid });
        self
    }

    /// Connects to the MOUNT service.
    pub async fn connect(self) -> Result<MountSession<C>, Error> {
        let options = DialOptions {
            portmapper_port: self.portmapper_port,
            privileged_port: self.privileged_port,
        };
        let io = match self.mount_port {
            Some(port) => {
                dial::connect_to(&self.connector, &self.host, port, self.privileged_port).await?
            }
            None => {
                dial::dial_service(
                    &self.connector,
                    &self.host,
                    nfsv3_types::mount::PROGRAM,
                    nfsv3_types::mount::VERSION,
                    &options,
                )
                .await?
            }
        };

        Ok(MountSession::new(
            self.connector,
            self.host,
            options,
            self.nfs3_port,
            self.owner,
            io,
        ))
    }
}

/// Connects to the MOUNT service of `host` with default settings.
pub async fn dial_mount<C: Connector>(connector: C, host: &str) -> Result<MountSession<C>, Error> {
    SessionBuilder::new(connector, host).connect().await
}
