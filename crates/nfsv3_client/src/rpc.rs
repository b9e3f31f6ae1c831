//! ONC RPC transport over a record-marked byte stream.

use nfsv3_types::rpc::{
    RPC_VERSION_2, auth_unix, call_body, msg_body, opaque_auth, reply_body, rpc_msg,
};
use nfsv3_types::xdr_codec::{Pack, Unpack, from_bytes};
use tracing::trace;

use crate::error::{Error, RpcError};
use crate::io::{AsyncRead, AsyncWrite};

const LAST_FRAGMENT: u32 = 0x8000_0000;
const MAX_FRAGMENT_SIZE: u32 = !LAST_FRAGMENT;
// Bigger than any READ/READDIRPLUS reply the client asks for.
const MAX_RECORD_SIZE: usize = 64 * 1024 * 1024;

/// Builds an `AUTH_UNIX` credential with a random stamp and `gid` as the only group.
pub fn auth_unix_credential(
    machine_name: &str,
    uid: u32,
    gid: u32,
) -> Result<opaque_auth<'static>, Error> {
    let body = auth_unix {
        stamp: rand::random(),
        machinename: machine_name.to_owned(),
        uid,
        gid,
        gids: vec![gid],
    };
    Ok(opaque_auth::auth_unix(&body)?)
}

/// One RPC connection with one outstanding call at a time.
///
/// A transport failure drops the connection; every later call fails with
/// [`RpcError::ConnectionClosed`].
#[derive(Debug)]
pub struct RpcClient<IO> {
    io: Option<IO>,
    xid: u32,
}

impl<IO> RpcClient<IO>
where
    IO: AsyncRead + AsyncWrite,
{
    pub fn new(io: IO) -> Self {
        Self {
            io: Some(io),
            xid: rand::random(),
        }
    }

    pub const fn is_closed(&self) -> bool {
        self.io.is_none()
    }

    /// Shuts the connection down. Calling it again does nothing.
    pub async fn close(&mut self) -> Result<(), Error> {
        if let Some(mut io) = self.io.take() {
            io.async_shutdown().await?;
        }
        Ok(())
    }

    /// Sends one call and returns the procedure results that follow the reply header.
    pub async fn call(
        &mut self,
        prog: u32,
        vers: u32,
        proc: u32,
        cred: &opaque_auth<'_>,
        verf: &opaque_auth<'_>,
        args: &impl Pack,
    ) -> Result<Vec<u8>, Error> {
        let xid = self.xid;
        self.xid = self.xid.wrapping_add(1);

        let request = encode_call(xid, prog, vers, proc, cred, verf, args)?;
        let io = self.io.as_mut().ok_or(RpcError::ConnectionClosed)?;
        let record = match exchange(io, &request).await {
            Ok(record) => record,
            Err(e) => {
                self.io = None;
                return Err(e);
            }
        };

        let (reply, header_len) = from_bytes::<rpc_msg>(&record)?;
        if reply.xid != xid {
            self.io = None;
            return Err(RpcError::UnexpectedXid {
                expected: xid,
                received: reply.xid,
            }
            .into());
        }
        match reply.body {
            msg_body::REPLY(reply_body::MSG_ACCEPTED(accepted)) => {
                if let Ok(err) = RpcError::try_from(accepted.reply_data) {
                    return Err(err.into());
                }
            }
            msg_body::REPLY(reply_body::MSG_DENIED(rejected)) => return Err(rejected.into()),
            msg_body::CALL(_) => return Err(RpcError::UnexpectedCall.into()),
        }

        let mut payload = record;
        payload.drain(..header_len);
        Ok(payload)
    }

    /// [`call`](Self::call) followed by decoding the whole payload as `R`.
    pub async fn call_decode<C, R>(
        &mut self,
        prog: u32,
        vers: u32,
        proc: u32,
        cred: &opaque_auth<'_>,
        verf: &opaque_auth<'_>,
        args: &C,
    ) -> Result<R, Error>
    where
        C: Pack,
        R: Unpack,
    {
        let payload = self.call(prog, vers, proc, cred, verf, args).await?;
        let (value, consumed) = from_bytes::<R>(&payload)?;
        if consumed != payload.len() {
            return Err(RpcError::NotFullyParsed {
                consumed,
                total: payload.len(),
            }
            .into());
        }
        Ok(value)
    }
}

fn encode_call(
    xid: u32,
    prog: u32,
    vers: u32,
    proc: u32,
    cred: &opaque_auth<'_>,
    verf: &opaque_auth<'_>,
    args: &impl Pack,
) -> Result<Vec<u8>, Error> {
    let msg = rpc_msg {
        xid,
        body: msg_body::CALL(call_body {
            rpcvers: RPC_VERSION_2,
            prog,
            vers,
            proc,
            cred: cred.clone(),
            verf: verf.clone(),
        }),
    };

    let total_len = msg.packed_size() + args.packed_size();
    let fragment_len = u32::try_from(total_len)
        .ok()
        .filter(|len| *len <= MAX_FRAGMENT_SIZE)
        .ok_or(RpcError::WrongLength)?;

    let mut buf = Vec::with_capacity(total_len + 4);
    (fragment_len | LAST_FRAGMENT).pack(&mut buf)?;
    msg.pack(&mut buf)?;
    args.pack(&mut buf)?;
    if buf.len() - 4 != total_len {
        return Err(RpcError::WrongLength.into());
    }
    trace!(xid, prog, vers, proc, len = total_len, "sending call");
    Ok(buf)
}

async fn exchange<IO>(io: &mut IO, request: &[u8]) -> Result<Vec<u8>, Error>
where
    IO: AsyncRead + AsyncWrite,
{
    io.async_write_all(request).await?;
    read_record(io).await
}

/// Reads fragments until the one flagged as last and returns their concatenation.
async fn read_record<IO: AsyncRead>(io: &mut IO) -> Result<Vec<u8>, Error> {
    let mut record = Vec::new();
    loop {
        let mut header = [0u8; 4];
        io.async_read_exact(&mut header).await?;
        let header = u32::from_be_bytes(header);
        let len = (header & MAX_FRAGMENT_SIZE) as usize;
        let last = header & LAST_FRAGMENT != 0;
        if record.len() + len > MAX_RECORD_SIZE {
            return Err(RpcError::WrongLength.into());
        }

        let start = record.len();
        record.resize(start + len, 0);
        io.async_read_exact(&mut record[start..]).await?;
        trace!(len, last, "received fragment");
        if last {
            return Ok(record);
        }
    }
}
