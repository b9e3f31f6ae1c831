#![doc = include_str!("../README.md")]

mod connect;
pub mod dial;
pub mod error;
pub mod io;
mod mount;
pub mod net;
mod portmapper;
pub mod rpc;
mod stream;
mod target;

#[cfg(feature = "smol")]
pub mod smol;
#[cfg(feature = "tokio")]
pub mod tokio;

pub use connect::*;
pub use mount::*;
pub use nfsv3_types;
pub use portmapper::*;
pub use stream::*;
pub use target::*;
