use nfsv3_types::portmap::{IPPROTO_TCP, PMAP_PROG, PROGRAM, VERSION, mapping};
use nfsv3_types::rpc::opaque_auth;
use nfsv3_types::xdr_codec::{Pack, Unpack, Void};

use crate::error::Error;
use crate::io::{AsyncRead, AsyncWrite};
use crate::rpc::RpcClient;

/// Client for the portmapper service
#[derive(Debug)]
pub struct PortmapperClient<IO> {
    rpc: RpcClient<IO>,
}

impl<IO> PortmapperClient<IO>
where
    IO: AsyncRead + AsyncWrite,
{
    pub fn new(io: IO) -> Self {
        Self {
            rpc: RpcClient::new(io),
        }
    }

    pub async fn null(&mut self) -> Result<(), Error> {
        let _ = self
            .call::<Void, Void>(PMAP_PROG::PMAPPROC_NULL, &Void)
            .await?;
        Ok(())
    }

    /// Port of `prog`/`vers` over TCP as reported by the server; 0 means not registered.
    pub async fn getport(&mut self, prog: u32, vers: u32) -> Result<u32, Error> {
        let args = mapping {
            prog,
            vers,
            prot: IPPROTO_TCP,
            port: 0,
        };
        self.call::<mapping, u32>(PMAP_PROG::PMAPPROC_GETPORT, &args)
            .await
    }

    pub async fn close(&mut self) -> Result<(), Error> {
        self.rpc.close().await
    }

    async fn call<C, R>(&mut self, proc: PMAP_PROG, args: &C) -> Result<R, Error>
    where
        R: Unpack,
        C: Pack,
    {
        let auth = opaque_auth::default();
        self.rpc
            .call_decode::<C, R>(PROGRAM, VERSION, proc as u32, &auth, &auth, args)
            .await
    }
}
