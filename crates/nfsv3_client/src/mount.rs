use nfsv3_types::mount::{MOUNT_PROGRAM, PROGRAM, VERSION, dirpath, mountres3};
use nfsv3_types::nfs3::nfs_fh3;
use nfsv3_types::rpc::opaque_auth;
use nfsv3_types::xdr_codec::{Pack, Unpack, Void};
use tracing::debug;

use crate::dial::{self, DialOptions};
use crate::error::Error;
use crate::net::Connector;
use crate::rpc::RpcClient;
use crate::target::{Owner, Target};

#[derive(Debug)]
struct Mounted {
    path: String,
    credential: opaque_auth<'static>,
}

/// Connection to the MOUNT service of one host.
///
/// At most one export is mounted at a time; [`mount`](Self::mount) hands out a [`Target`] that
/// keeps working after the session is unmounted or closed.
pub struct MountSession<C: Connector> {
    connector: C,
    host: String,
    options: DialOptions,
    nfs3_port: Option<u16>,
    owner: Option<Owner>,
    rpc: RpcClient<C::Connection>,
    mounted: Option<Mounted>,
}

impl<C: Connector> std::fmt::Debug for MountSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountSession")
            .field("host", &self.host)
            .field("options", &self.options)
            .field("nfs3_port", &self.nfs3_port)
            .field("mounted", &self.mounted.as_ref().map(|m| m.path.as_str()))
            .finish_non_exhaustive()
    }
}

impl<C: Connector> MountSession<C> {
    pub(crate) fn new(
        connector: C,
        host: String,
        options: DialOptions,
        nfs3_port: Option<u16>,
        owner: Option<Owner>,
        io: C::Connection,
    ) -> Self {
        Self {
            connector,
            host,
            options,
            nfs3_port,
            owner,
            rpc: RpcClient::new(io),
            mounted: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path of the mounted export, if any.
    pub fn mounted_path(&self) -> Option<&str> {
        self.mounted.as_ref().map(|m| m.path.as_str())
    }

    pub async fn null(&mut self) -> Result<(), Error> {
        let auth = opaque_auth::default();
        let _ = self
            .call::<Void, Void>(MOUNT_PROGRAM::MOUNTPROC3_NULL, &auth, &Void)
            .await?;
        Ok(())
    }

    /// Mounts `path`, connects to the NFS service and returns the export root as a [`Target`].
    ///
    /// The credential is used for MNT and for every call the target makes.
    pub async fn mount(
        &mut self,
        path: &str,
        credential: &opaque_auth<'static>,
    ) -> Result<Target<C::Connection>, Error> {
        let args = dirpath::from_path(path);
        let res = self
            .call::<dirpath, mountres3>(MOUNT_PROGRAM::MOUNTPROC3_MNT, credential, &args)
            .await?;
        let ok = match res {
            mountres3::Ok(ok) => ok,
            mountres3::Err(status) => {
                debug!(path, %status, "mount failed");
                return Err(status.into());
            }
        };
        // the flavor list is not used
        let root = nfs_fh3 {
            data: ok.fhandle.0.to_static(),
        };
        debug!(path, "mounted, root {root}");
        self.mounted = Some(Mounted {
            path: path.to_owned(),
            credential: credential.clone(),
        });

        let io = match self.nfs3_port {
            Some(port) => {
                dial::connect_to(&self.connector, &self.host, port, self.options.privileged_port)
                    .await?
            }
            None => {
                dial::dial_service(
                    &self.connector,
                    &self.host,
                    nfsv3_types::nfs3::PROGRAM,
                    nfsv3_types::nfs3::VERSION,
                    &self.options,
                )
                .await?
            }
        };
        Target::new(io, credential.clone(), root, self.owner).await
    }

    /// Unmounts the export mounted by the last successful [`mount`](Self::mount).
    pub async fn unmount(&mut self) -> Result<(), Error> {
        let mounted = self.mounted.take().ok_or(Error::NotMounted)?;
        let args = dirpath::from_path(&mounted.path);
        let _ = self
            .call::<dirpath, Void>(MOUNT_PROGRAM::MOUNTPROC3_UMNT, &mounted.credential, &args)
            .await?;
        debug!(path = %mounted.path, "unmounted");
        Ok(())
    }

    /// Sends EXPORT. The export list is not decoded; the result is always empty.
    pub async fn exports(&mut self) -> Result<Vec<String>, Error> {
        let auth = opaque_auth::default();
        let _ = self
            .rpc
            .call(
                PROGRAM,
                VERSION,
                MOUNT_PROGRAM::MOUNTPROC3_EXPORT as u32,
                &auth,
                &auth,
                &Void,
            )
            .await?;
        Ok(Vec::new())
    }

    /// Closes the connection to the MOUNT service.
    pub async fn close(&mut self) -> Result<(), Error> {
        self.rpc.close().await
    }

    async fn call<A, R>(
        &mut self,
        proc: MOUNT_PROGRAM,
        credential: &opaque_auth<'_>,
        args: &A,
    ) -> Result<R, Error>
    where
        A: Pack,
        R: Unpack,
    {
        self.rpc
            .call_decode::<A, R>(
                PROGRAM,
                VERSION,
                proc as u32,
                credential,
                &opaque_auth::default(),
                args,
            )
            .await
    }
}
