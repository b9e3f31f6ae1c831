//! Error types

use std::error::Error as StdError;
use std::fmt;

use nfsv3_types::mount::mountstat3;
use nfsv3_types::nfs3::nfsstat3;
use nfsv3_types::rpc::{accept_stat_data, rejected_reply};

#[derive(Debug)]
pub enum Error {
    /// Transport failure.
    Io(std::io::Error),
    /// Malformed or truncated payload.
    Xdr(nfsv3_types::xdr_codec::Error),
    Rpc(RpcError),
    Portmap(PortmapError),
    /// MNT answered with a status other than `MNT3_OK`.
    Mount(mountstat3),
    /// An NFS procedure answered with a status other than `NFS3_OK`.
    Nfs(nfsstat3),
    /// `unmount` was called without a successful `mount`.
    NotMounted,
    InvalidPath(String),
}

impl Error {
    /// NFS status carried by this error, if any.
    #[must_use]
    pub const fn nfs_status(&self) -> Option<nfsstat3> {
        match self {
            Self::Nfs(status) => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Nfs(nfsstat3::NFS3ERR_NOENT) | Self::Mount(mountstat3::MNT3ERR_NOENT)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Xdr(e) => e.fmt(f),
            Self::Rpc(e) => e.fmt(f),
            Self::Portmap(e) => e.fmt(f),
            Self::Mount(e) => write!(f, "mount failed: {} ({e})", *e as u32),
            Self::Nfs(e) => write!(f, "nfs error: {} ({e})", *e as u32),
            Self::NotMounted => write!(f, "not mounted"),
            Self::InvalidPath(path) => write!(f, "invalid path: {path:?}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Xdr(e) => Some(e),
            Self::Rpc(e) => Some(e),
            Self::Portmap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<nfsv3_types::xdr_codec::Error> for Error {
    fn from(e: nfsv3_types::xdr_codec::Error) -> Self {
        Self::Xdr(e)
    }
}

impl From<RpcError> for Error {
    fn from(e: RpcError) -> Self {
        Self::Rpc(e)
    }
}

impl From<rejected_reply> for Error {
    fn from(e: rejected_reply) -> Self {
        Self::Rpc(e.into())
    }
}

impl From<PortmapError> for Error {
    fn from(e: PortmapError) -> Self {
        Self::Portmap(e)
    }
}

impl From<mountstat3> for Error {
    fn from(e: mountstat3) -> Self {
        Self::Mount(e)
    }
}

impl From<nfsstat3> for Error {
    fn from(e: nfsstat3) -> Self {
        Self::Nfs(e)
    }
}

#[derive(Debug)]
pub enum RpcError {
    UnexpectedCall,
    Auth,
    RpcMismatch,
    WrongLength,
    UnexpectedXid { expected: u32, received: u32 },
    NotFullyParsed { consumed: usize, total: usize },
    /// The connection failed earlier or was closed.
    ConnectionClosed,
    ProgUnavail,
    ProgMismatch,
    ProcUnavail,
    GarbageArgs,
    SystemErr,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCall => write!(f, "Unexpected CALL request"),
            Self::Auth => write!(f, "Authentication error"),
            Self::RpcMismatch => write!(f, "RPC version mismatch"),
            Self::WrongLength => write!(f, "Wrong length in RPC message"),
            Self::UnexpectedXid { expected, received } => {
                write!(f, "Unexpected XID in RPC reply: expected {expected}, got {received}")
            }
            Self::NotFullyParsed { consumed, total } => {
                write!(f, "Not fully parsed: {consumed} of {total} bytes")
            }
            Self::ConnectionClosed => write!(f, "Connection closed"),
            Self::ProgUnavail => write!(f, "Program unavailable"),
            Self::ProgMismatch => write!(f, "Program mismatch"),
            Self::ProcUnavail => write!(f, "Procedure unavailable"),
            Self::GarbageArgs => write!(f, "Garbage arguments"),
            Self::SystemErr => write!(f, "System error"),
        }
    }
}

impl StdError for RpcError {}

impl From<rejected_reply> for RpcError {
    fn from(e: rejected_reply) -> Self {
        match e {
            rejected_reply::RPC_MISMATCH(_) => Self::RpcMismatch,
            rejected_reply::AUTH_ERROR(_) => Self::Auth,
        }
    }
}

impl TryFrom<accept_stat_data> for RpcError {
    type Error = ();

    fn try_from(value: accept_stat_data) -> Result<Self, Self::Error> {
        match value {
            accept_stat_data::SUCCESS => Err(()),
            accept_stat_data::PROG_UNAVAIL => Ok(Self::ProgUnavail),
            accept_stat_data::PROG_MISMATCH(_) => Ok(Self::ProgMismatch),
            accept_stat_data::PROC_UNAVAIL => Ok(Self::ProcUnavail),
            accept_stat_data::GARBAGE_ARGS => Ok(Self::GarbageArgs),
            accept_stat_data::SYSTEM_ERR => Ok(Self::SystemErr),
        }
    }
}

#[derive(Debug)]
pub enum PortmapError {
    /// The program is not registered with the portmapper.
    ProgramUnavailable,
    InvalidPortValue(u32),
}

impl fmt::Display for PortmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramUnavailable => write!(f, "Program unavailable"),
            Self::InvalidPortValue(value) => write!(f, "Invalid port value: {value}"),
        }
    }
}

impl StdError for PortmapError {}
