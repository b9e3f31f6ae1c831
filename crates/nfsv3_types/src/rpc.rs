#![allow(non_camel_case_types, clippy::upper_case_acronyms)]

//! ONC RPC message definitions (RFC 5531).

use crate::xdr_codec::{Opaque, Result, XdrCodec, to_bytes};

pub const RPC_VERSION_2: u32 = 2;

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
#[repr(u32)]
pub enum auth_stat {
    AUTH_OK = 0,
    AUTH_BADCRED = 1,
    AUTH_REJECTEDCRED = 2,
    AUTH_BADVERF = 3,
    AUTH_REJECTEDVERF = 4,
    AUTH_TOOWEAK = 5,
    AUTH_INVALIDRESP = 6,
    AUTH_FAILED = 7,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
#[repr(u32)]
pub enum auth_flavor {
    AUTH_NULL = 0,
    AUTH_UNIX = 1,
    AUTH_SHORT = 2,
    AUTH_DES = 3,
    RPCSEC_GSS = 6,
}

/// Credential or verifier: a flavor tag and its XDR-encoded body.
#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct opaque_auth<'a> {
    pub flavor: auth_flavor,
    pub body: Opaque<'a>,
}

impl Default for opaque_auth<'static> {
    fn default() -> Self {
        Self {
            flavor: auth_flavor::AUTH_NULL,
            body: Opaque::borrowed(&[]),
        }
    }
}

impl opaque_auth<'static> {
    /// Wraps an `AUTH_UNIX` body into a credential.
    pub fn auth_unix(auth: &auth_unix) -> Result<Self> {
        Ok(Self {
            flavor: auth_flavor::AUTH_UNIX,
            body: Opaque::owned(to_bytes(auth)?),
        })
    }
}

/// Body of an `AUTH_UNIX` credential.
#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct auth_unix {
    pub stamp: u32,
    pub machinename: String,
    pub uid: u32,
    pub gid: u32,
    pub gids: Vec<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct call_body<'a> {
    pub rpcvers: u32,
    pub prog: u32,
    pub vers: u32,
    pub proc: u32,
    pub cred: opaque_auth<'a>,
    pub verf: opaque_auth<'a>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct mismatch_info {
    pub low: u32,
    pub high: u32,
}

#[derive(Debug, XdrCodec)]
pub struct accepted_reply<'a> {
    pub verf: opaque_auth<'a>,
    pub reply_data: accept_stat_data,
}

/// `accept_stat` with its arm data. The procedure results follow `SUCCESS` on the wire and are
/// decoded by the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
pub enum accept_stat_data {
    #[xdr(0)]
    SUCCESS,
    #[xdr(1)]
    PROG_UNAVAIL,
    #[xdr(2)]
    PROG_MISMATCH(mismatch_info),
    #[xdr(3)]
    PROC_UNAVAIL,
    #[xdr(4)]
    GARBAGE_ARGS,
    #[xdr(5)]
    SYSTEM_ERR,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
pub enum rejected_reply {
    #[xdr(0)]
    RPC_MISMATCH(mismatch_info),
    #[xdr(1)]
    AUTH_ERROR(auth_stat),
}

#[derive(Debug, XdrCodec)]
pub enum reply_body<'a> {
    #[xdr(0)]
    MSG_ACCEPTED(accepted_reply<'a>),
    #[xdr(1)]
    MSG_DENIED(rejected_reply),
}

#[derive(Debug, XdrCodec)]
pub enum msg_body<'a, 'b> {
    #[xdr(0)]
    CALL(call_body<'a>),
    #[xdr(1)]
    REPLY(reply_body<'b>),
}

#[derive(Debug, XdrCodec)]
pub struct rpc_msg<'a, 'b> {
    pub xid: u32,
    pub body: msg_body<'a, 'b>,
}
