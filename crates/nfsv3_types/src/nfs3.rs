#![allow(non_camel_case_types, clippy::upper_case_acronyms)]

//! This module contains the definitions of the NFSv3 protocol as defined in RFC 1813.

use std::io::{Read, Write};

use crate::xdr_codec::{
    List, Opaque, Pack, Result, Unpack, XdrCodec, pack_fixed_opaque, unpack_fixed_opaque,
};

pub const PROGRAM: u32 = 100_003;
pub const VERSION: u32 = 3;

pub const FSF3_LINK: u32 = 1;
pub const FSF3_SYMLINK: u32 = 2;
pub const FSF3_HOMOGENEOUS: u32 = 8;
pub const FSF3_CANSETTIME: u32 = 16;

pub const NFS3_COOKIEVERFSIZE: usize = 8;
pub const NFS3_CREATEVERFSIZE: usize = 8;
pub const NFS3_FHSIZE: usize = 64;
pub const NFS3_WRITEVERFSIZE: usize = 8;

/// Result of an NFS procedure: the status word, then the `resok` body for `NFS3_OK` or the
/// `resfail` body for any other status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nfs3Result<T, E> {
    Ok(T),
    Err((nfsstat3, E)),
}

impl<T, E> Nfs3Result<T, E> {
    /// Drops the failure body and keeps the status.
    pub fn into_result(self) -> std::result::Result<T, nfsstat3> {
        match self {
            Self::Ok(val) => Ok(val),
            Self::Err((code, _)) => Err(code),
        }
    }

    pub const fn status(&self) -> nfsstat3 {
        match self {
            Self::Ok(_) => nfsstat3::NFS3_OK,
            Self::Err((code, _)) => *code,
        }
    }
}

impl<T: Pack, E: Pack> Pack for Nfs3Result<T, E> {
    fn packed_size(&self) -> usize {
        4 + match self {
            Self::Ok(v) => v.packed_size(),
            Self::Err((_, fail)) => fail.packed_size(),
        }
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        let len = match self {
            Self::Ok(v) => nfsstat3::NFS3_OK.pack(out)? + v.pack(out)?,
            Self::Err((code, fail)) => code.pack(out)? + fail.pack(out)?,
        };
        Ok(len)
    }
}

impl<T: Unpack, E: Unpack> Unpack for Nfs3Result<T, E> {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (code, code_len) = nfsstat3::unpack(input)?;
        if code != nfsstat3::NFS3_OK {
            let (fail, fail_len) = E::unpack(input)?;
            return Ok((Self::Err((code, fail)), code_len + fail_len));
        }
        let (val, val_len) = T::unpack(input)?;
        Ok((Self::Ok(val), code_len + val_len))
    }
}

pub type COMMIT3res = Nfs3Result<COMMIT3resok, COMMIT3resfail>;
pub type CREATE3res = Nfs3Result<CREATE3resok, CREATE3resfail>;
pub type FSINFO3res = Nfs3Result<FSINFO3resok, FSINFO3resfail>;
pub type LOOKUP3res = Nfs3Result<LOOKUP3resok, LOOKUP3resfail>;
pub type MKDIR3res = Nfs3Result<MKDIR3resok, MKDIR3resfail>;
pub type READ3res<'a> = Nfs3Result<READ3resok<'a>, READ3resfail>;
pub type READDIRPLUS3res<'a> = Nfs3Result<READDIRPLUS3resok<'a>, READDIRPLUS3resfail>;
pub type REMOVE3res = Nfs3Result<REMOVE3resok, REMOVE3resfail>;
pub type RMDIR3res = Nfs3Result<RMDIR3resok, RMDIR3resfail>;
pub type WRITE3res = Nfs3Result<WRITE3resok, WRITE3resfail>;

/// Discriminated "value follows" union used for optional attributes, handles and settable
/// attribute fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nfs3Option<T> {
    Some(T),
    None,
}

impl<T> Default for Nfs3Option<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> Nfs3Option<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Some(v) => Some(v),
            Self::None => None,
        }
    }

    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Some(v) => Some(v),
            Self::None => None,
        }
    }

    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<T> From<Option<T>> for Nfs3Option<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Self::Some)
    }
}

impl<T: Pack> Pack for Nfs3Option<T> {
    fn packed_size(&self) -> usize {
        4 + match self {
            Self::Some(v) => v.packed_size(),
            Self::None => 0,
        }
    }

    fn pack(&self, out: &mut impl Write) -> Result<usize> {
        let len = match self {
            Self::Some(v) => true.pack(out)? + v.pack(out)?,
            Self::None => false.pack(out)?,
        };
        Ok(len)
    }
}

impl<T: Unpack> Unpack for Nfs3Option<T> {
    fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
        let (follows, tag_len) = bool::unpack(input)?;
        if !follows {
            return Ok((Self::None, tag_len));
        }
        let (val, val_len) = T::unpack(input)?;
        Ok((Self::Some(val), tag_len + val_len))
    }
}

pub type pre_op_attr = Nfs3Option<wcc_attr>;
pub type post_op_attr = Nfs3Option<fattr3>;
pub type post_op_fh3 = Nfs3Option<nfs_fh3>;
pub type set_gid3 = Nfs3Option<gid3>;
pub type set_mode3 = Nfs3Option<mode3>;
pub type set_size3 = Nfs3Option<size3>;
pub type set_uid3 = Nfs3Option<uid3>;

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct COMMIT3args {
    pub file: nfs_fh3,
    pub offset: offset3,
    pub count: count3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct COMMIT3resok {
    pub file_wcc: wcc_data,
    pub verf: writeverf3,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct COMMIT3resfail {
    pub file_wcc: wcc_data,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct CREATE3args<'a> {
    pub where_: diropargs3<'a>,
    pub how: createhow3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct CREATE3resok {
    pub obj: post_op_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct CREATE3resfail {
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct FSINFO3args {
    pub fsroot: nfs_fh3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct FSINFO3resok {
    pub obj_attributes: post_op_attr,
    pub rtmax: u32,
    pub rtpref: u32,
    pub rtmult: u32,
    pub wtmax: u32,
    pub wtpref: u32,
    pub wtmult: u32,
    pub dtpref: u32,
    pub maxfilesize: size3,
    pub time_delta: nfstime3,
    pub properties: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct FSINFO3resfail {
    pub obj_attributes: post_op_attr,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct LOOKUP3args<'a> {
    pub what: diropargs3<'a>,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct LOOKUP3resok {
    pub object: nfs_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_attributes: post_op_attr,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct LOOKUP3resfail {
    pub dir_attributes: post_op_attr,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct MKDIR3args<'a> {
    pub where_: diropargs3<'a>,
    pub attributes: sattr3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct MKDIR3resok {
    pub obj: post_op_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct MKDIR3resfail {
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct READ3args {
    pub file: nfs_fh3,
    pub offset: offset3,
    pub count: count3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct READ3resok<'a> {
    pub file_attributes: post_op_attr,
    pub count: count3,
    pub eof: bool,
    pub data: Opaque<'a>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct READ3resfail {
    pub file_attributes: post_op_attr,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct READDIRPLUS3args {
    pub dir: nfs_fh3,
    pub cookie: cookie3,
    pub cookieverf: cookieverf3,
    pub dircount: count3,
    pub maxcount: count3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct READDIRPLUS3resok<'a> {
    pub dir_attributes: post_op_attr,
    pub cookieverf: cookieverf3,
    pub reply: dirlistplus3<'a>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct READDIRPLUS3resfail {
    pub dir_attributes: post_op_attr,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct REMOVE3args<'a> {
    pub object: diropargs3<'a>,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct REMOVE3resok {
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct REMOVE3resfail {
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct RMDIR3args<'a> {
    pub object: diropargs3<'a>,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct RMDIR3resok {
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct RMDIR3resfail {
    pub dir_wcc: wcc_data,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct WRITE3args<'a> {
    pub file: nfs_fh3,
    pub offset: offset3,
    pub count: count3,
    pub stable: stable_how,
    pub data: Opaque<'a>,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct WRITE3resok {
    pub file_wcc: wcc_data,
    pub count: count3,
    pub committed: stable_how,
    pub verf: writeverf3,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct WRITE3resfail {
    pub file_wcc: wcc_data,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct cookieverf3(pub [u8; NFS3_COOKIEVERFSIZE]);

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub enum createhow3 {
    #[xdr(0)]
    UNCHECKED(sattr3),
    #[xdr(1)]
    GUARDED(sattr3),
    #[xdr(2)]
    EXCLUSIVE(createverf3),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct createverf3(pub [u8; NFS3_CREATEVERFSIZE]);

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct dirlistplus3<'a> {
    pub entries: List<entryplus3<'a>>,
    pub eof: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct diropargs3<'a> {
    pub dir: nfs_fh3,
    pub name: filename3<'a>,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct entryplus3<'a> {
    pub fileid: fileid3,
    pub name: filename3<'a>,
    pub cookie: cookie3,
    pub name_attributes: post_op_attr,
    pub name_handle: post_op_fh3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct fattr3 {
    pub type_: ftype3,
    pub mode: mode3,
    pub nlink: u32,
    pub uid: uid3,
    pub gid: gid3,
    pub size: size3,
    pub used: size3,
    pub rdev: specdata3,
    pub fsid: u64,
    pub fileid: fileid3,
    pub atime: nfstime3,
    pub mtime: nfstime3,
    pub ctime: nfstime3,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct filename3<'a>(pub Opaque<'a>);

impl From<Vec<u8>> for filename3<'static> {
    fn from(name: Vec<u8>) -> Self {
        Self(Opaque::owned(name))
    }
}

impl<'a> From<&'a [u8]> for filename3<'a> {
    fn from(name: &'a [u8]) -> Self {
        Self(Opaque::borrowed(name))
    }
}

impl<'a> From<&'a str> for filename3<'a> {
    fn from(name: &'a str) -> Self {
        Self(Opaque::borrowed(name.as_bytes()))
    }
}

impl AsRef<[u8]> for filename3<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl PartialEq<[u8]> for filename3<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.0.as_ref() == other
    }
}

impl filename3<'_> {
    #[must_use]
    pub fn clone_to_owned(&self) -> filename3<'static> {
        filename3(self.0.to_static())
    }

    /// `true` for the `.` and `..` entries every directory listing carries.
    #[must_use]
    pub fn is_dot_or_dotdot(&self) -> bool {
        matches!(self.0.as_ref(), b"." | b"..")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for filename3<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.0.as_ref()))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
#[repr(u32)]
pub enum ftype3 {
    NF3REG = 1,
    NF3DIR = 2,
    NF3BLK = 3,
    NF3CHR = 4,
    NF3LNK = 5,
    NF3SOCK = 6,
    NF3FIFO = 7,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct nfs_fh3 {
    pub data: Opaque<'static>,
}

impl nfs_fh3 {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Opaque::owned(data),
        }
    }
}

impl std::fmt::Display for nfs_fh3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in self.data.as_ref() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
#[repr(u32)]
pub enum nfsstat3 {
    NFS3_OK = 0,
    NFS3ERR_PERM = 1,
    NFS3ERR_NOENT = 2,
    NFS3ERR_IO = 5,
    NFS3ERR_NXIO = 6,
    NFS3ERR_ACCES = 13,
    NFS3ERR_EXIST = 17,
    NFS3ERR_XDEV = 18,
    NFS3ERR_NODEV = 19,
    NFS3ERR_NOTDIR = 20,
    NFS3ERR_ISDIR = 21,
    NFS3ERR_INVAL = 22,
    NFS3ERR_FBIG = 27,
    NFS3ERR_NOSPC = 28,
    NFS3ERR_ROFS = 30,
    NFS3ERR_MLINK = 31,
    NFS3ERR_NAMETOOLONG = 63,
    NFS3ERR_NOTEMPTY = 66,
    NFS3ERR_DQUOT = 69,
    NFS3ERR_STALE = 70,
    NFS3ERR_REMOTE = 71,
    NFS3ERR_BADHANDLE = 10001,
    NFS3ERR_NOT_SYNC = 10002,
    NFS3ERR_BAD_COOKIE = 10003,
    NFS3ERR_NOTSUPP = 10004,
    NFS3ERR_TOOSMALL = 10005,
    NFS3ERR_SERVERFAULT = 10006,
    NFS3ERR_BADTYPE = 10007,
    NFS3ERR_JUKEBOX = 10008,
}

impl std::fmt::Display for nfsstat3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::NFS3_OK => "NFS3_OK",
            Self::NFS3ERR_PERM => "NFS3ERR_PERM",
            Self::NFS3ERR_NOENT => "NFS3ERR_NOENT",
            Self::NFS3ERR_IO => "NFS3ERR_IO",
            Self::NFS3ERR_NXIO => "NFS3ERR_NXIO",
            Self::NFS3ERR_ACCES => "NFS3ERR_ACCES",
            Self::NFS3ERR_EXIST => "NFS3ERR_EXIST",
            Self::NFS3ERR_XDEV => "NFS3ERR_XDEV",
            Self::NFS3ERR_NODEV => "NFS3ERR_NODEV",
            Self::NFS3ERR_NOTDIR => "NFS3ERR_NOTDIR",
            Self::NFS3ERR_ISDIR => "NFS3ERR_ISDIR",
            Self::NFS3ERR_INVAL => "NFS3ERR_INVAL",
            Self::NFS3ERR_FBIG => "NFS3ERR_FBIG",
            Self::NFS3ERR_NOSPC => "NFS3ERR_NOSPC",
            Self::NFS3ERR_ROFS => "NFS3ERR_ROFS",
            Self::NFS3ERR_MLINK => "NFS3ERR_MLINK",
            Self::NFS3ERR_NAMETOOLONG => "NFS3ERR_NAMETOOLONG",
            Self::NFS3ERR_NOTEMPTY => "NFS3ERR_NOTEMPTY",
            Self::NFS3ERR_DQUOT => "NFS3ERR_DQUOT",
            Self::NFS3ERR_STALE => "NFS3ERR_STALE",
            Self::NFS3ERR_REMOTE => "NFS3ERR_REMOTE",
            Self::NFS3ERR_BADHANDLE => "NFS3ERR_BADHANDLE",
            Self::NFS3ERR_NOT_SYNC => "NFS3ERR_NOT_SYNC",
            Self::NFS3ERR_BAD_COOKIE => "NFS3ERR_BAD_COOKIE",
            Self::NFS3ERR_NOTSUPP => "NFS3ERR_NOTSUPP",
            Self::NFS3ERR_TOOSMALL => "NFS3ERR_TOOSMALL",
            Self::NFS3ERR_SERVERFAULT => "NFS3ERR_SERVERFAULT",
            Self::NFS3ERR_BADTYPE => "NFS3ERR_BADTYPE",
            Self::NFS3ERR_JUKEBOX => "NFS3ERR_JUKEBOX",
        };
        write!(f, "{value}")
    }
}

#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, XdrCodec)]
pub struct nfstime3 {
    pub seconds: u32,
    pub nseconds: u32,
}

/// Settable attributes; `Default` leaves everything unchanged.
#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct sattr3 {
    pub mode: set_mode3,
    pub uid: set_uid3,
    pub gid: set_gid3,
    pub size: set_size3,
    pub atime: set_atime,
    pub mtime: set_mtime,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub enum set_atime {
    #[default]
    #[xdr(0)]
    DONT_CHANGE,
    #[xdr(1)]
    SET_TO_SERVER_TIME,
    #[xdr(2)]
    SET_TO_CLIENT_TIME(nfstime3),
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub enum set_mtime {
    #[default]
    #[xdr(0)]
    DONT_CHANGE,
    #[xdr(1)]
    SET_TO_SERVER_TIME,
    #[xdr(2)]
    SET_TO_CLIENT_TIME(nfstime3),
}

#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, XdrCodec)]
pub struct specdata3 {
    pub specdata1: u32,
    pub specdata2: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, XdrCodec)]
#[repr(u32)]
pub enum stable_how {
    UNSTABLE = 0,
    DATA_SYNC = 1,
    FILE_SYNC = 2,
}

#[derive(Clone, Debug, Eq, PartialEq, XdrCodec)]
pub struct wcc_attr {
    pub size: size3,
    pub mtime: nfstime3,
    pub ctime: nfstime3,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, XdrCodec)]
pub struct wcc_data {
    pub before: pre_op_attr,
    pub after: post_op_attr,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct writeverf3(pub [u8; NFS3_WRITEVERFSIZE]);

pub type cookie3 = u64;

pub type count3 = u32;

pub type fileid3 = u64;

pub type gid3 = u32;

pub type mode3 = u32;

pub type offset3 = u64;

pub type size3 = u64;

pub type uid3 = u32;

macro_rules! fixed_opaque_codec {
    ($ty:ident, $size:expr) => {
        impl Pack for $ty {
            fn packed_size(&self) -> usize {
                $size
            }

            fn pack(&self, out: &mut impl Write) -> Result<usize> {
                pack_fixed_opaque(&self.0, out)
            }
        }

        impl Unpack for $ty {
            fn unpack(input: &mut impl Read) -> Result<(Self, usize)> {
                let (buf, len) = unpack_fixed_opaque::<$size>(input)?;
                Ok((Self(buf), len))
            }
        }
    };
}

fixed_opaque_codec!(cookieverf3, NFS3_COOKIEVERFSIZE);
fixed_opaque_codec!(createverf3, NFS3_CREATEVERFSIZE);
fixed_opaque_codec!(writeverf3, NFS3_WRITEVERFSIZE);

#[derive(Debug, Copy, Clone, PartialEq, Eq, XdrCodec)]
#[repr(u32)]
pub enum NFS_PROGRAM {
    NFSPROC3_NULL = 0,
    NFSPROC3_GETATTR = 1,
    NFSPROC3_SETATTR = 2,
    NFSPROC3_LOOKUP = 3,
    NFSPROC3_ACCESS = 4,
    NFSPROC3_READLINK = 5,
    NFSPROC3_READ = 6,
    NFSPROC3_WRITE = 7,
    NFSPROC3_CREATE = 8,
    NFSPROC3_MKDIR = 9,
    NFSPROC3_SYMLINK = 10,
    NFSPROC3_MKNOD = 11,
    NFSPROC3_REMOVE = 12,
    NFSPROC3_RMDIR = 13,
    NFSPROC3_RENAME = 14,
    NFSPROC3_LINK = 15,
    NFSPROC3_READDIR = 16,
    NFSPROC3_READDIRPLUS = 17,
    NFSPROC3_FSSTAT = 18,
    NFSPROC3_FSINFO = 19,
    NFSPROC3_PATHCONF = 20,
    NFSPROC3_COMMIT = 21,
}

impl std::convert::TryFrom<u32> for NFS_PROGRAM {
    type Error = crate::xdr_codec::Error;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NFSPROC3_NULL),
            1 => Ok(Self::NFSPROC3_GETATTR),
            2 => Ok(Self::NFSPROC3_SETATTR),
            3 => Ok(Self::NFSPROC3_LOOKUP),
            4 => Ok(Self::NFSPROC3_ACCESS),
            5 => Ok(Self::NFSPROC3_READLINK),
            6 => Ok(Self::NFSPROC3_READ),
            7 => Ok(Self::NFSPROC3_WRITE),
            8 => Ok(Self::NFSPROC3_CREATE),
            9 => Ok(Self::NFSPROC3_MKDIR),
            10 => Ok(Self::NFSPROC3_SYMLINK),
            11 => Ok(Self::NFSPROC3_MKNOD),
            12 => Ok(Self::NFSPROC3_REMOVE),
            13 => Ok(Self::NFSPROC3_RMDIR),
            14 => Ok(Self::NFSPROC3_RENAME),
            15 => Ok(Self::NFSPROC3_LINK),
            16 => Ok(Self::NFSPROC3_READDIR),
            17 => Ok(Self::NFSPROC3_READDIRPLUS),
            18 => Ok(Self::NFSPROC3_FSSTAT),
            19 => Ok(Self::NFSPROC3_FSINFO),
            20 => Ok(Self::NFSPROC3_PATHCONF),
            21 => Ok(Self::NFSPROC3_COMMIT),
            _ => Err(crate::xdr_codec::Error::InvalidEnumValue(value)),
        }
    }
}
