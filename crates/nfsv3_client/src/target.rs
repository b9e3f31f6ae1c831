use std::pin::Pin;

use nfsv3_types::nfs3::{
    COMMIT3args, COMMIT3res, CREATE3args, CREATE3res, FSINFO3args, FSINFO3res, FSINFO3resok,
    LOOKUP3args, LOOKUP3res, MKDIR3args, MKDIR3res, NFS_PROGRAM, PROGRAM, READ3args, READ3res,
    READ3resok, READDIRPLUS3args, READDIRPLUS3res, REMOVE3args, REMOVE3res, RMDIR3args, RMDIR3res,
    VERSION, WRITE3args, WRITE3res, cookieverf3, createhow3, diropargs3, entryplus3, fattr3,
    filename3, ftype3, nfs_fh3, nfsstat3, sattr3, stable_how,
};
use nfsv3_types::rpc::opaque_auth;
use nfsv3_types::xdr_codec::{Opaque, Pack, Unpack, Void, from_bytes};
use tracing::debug;

use crate::error::{Error, RpcError};
use crate::io::{AsyncRead, AsyncWrite};
use crate::rpc::RpcClient;
use crate::stream::{FileReader, FileWriter};

/// Filesystem limits reported by FSINFO.
pub type FsInfo = FSINFO3resok;

const READDIR_DIRCOUNT: u32 = 512;
const READDIR_MAXCOUNT: u32 = 4096;
const DEFAULT_CHUNK_SIZE: u32 = 8192;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Owner applied to directories and files created through a [`Target`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

/// A mounted export.
///
/// Paths are relative to the export root and separated by `/`. Every operation walks the path
/// one LOOKUP per component; nothing is cached besides the root handle and the FSINFO limits.
#[derive(Debug)]
pub struct Target<IO> {
    rpc: RpcClient<IO>,
    credential: opaque_auth<'static>,
    root: nfs_fh3,
    fsinfo: FsInfo,
    owner: Option<Owner>,
}

impl<IO> Target<IO>
where
    IO: AsyncRead + AsyncWrite,
{
    /// Wraps a connection to the NFS service and fetches the export's FSINFO.
    pub async fn new(
        io: IO,
        credential: opaque_auth<'static>,
        root: nfs_fh3,
        owner: Option<Owner>,
    ) -> Result<Self, Error> {
        let mut rpc = RpcClient::new(io);
        let args = FSINFO3args {
            fsroot: root.clone(),
        };
        let payload = rpc
            .call(
                PROGRAM,
                VERSION,
                NFS_PROGRAM::NFSPROC3_FSINFO as u32,
                &credential,
                &opaque_auth::default(),
                &args,
            )
            .await?;
        let fsinfo = decode_reply::<FSINFO3res>(&payload)?.into_result()?;
        debug!(
            rtpref = fsinfo.rtpref,
            wtpref = fsinfo.wtpref,
            "fsinfo for {root}"
        );

        Ok(Self {
            rpc,
            credential,
            root,
            fsinfo,
            owner,
        })
    }

    pub const fn root(&self) -> &nfs_fh3 {
        &self.root
    }

    /// FSINFO as fetched when the target was opened or by the last [`fsinfo`](Self::fsinfo).
    pub const fn fs_info(&self) -> &FsInfo {
        &self.fsinfo
    }

    pub const fn owner(&self) -> Option<Owner> {
        self.owner
    }

    pub const fn set_owner(&mut self, owner: Option<Owner>) {
        self.owner = owner;
    }

    /// Closes the connection to the NFS service.
    pub async fn close(&mut self) -> Result<(), Error> {
        self.rpc.close().await
    }

    pub async fn null(&mut self) -> Result<(), Error> {
        let _ = self
            .call::<Void, Void>(NFS_PROGRAM::NFSPROC3_NULL, &Void)
            .await?;
        Ok(())
    }

    /// Re-issues FSINFO on the root and refreshes the cached limits.
    pub async fn fsinfo(&mut self) -> Result<FsInfo, Error> {
        let args = FSINFO3args {
            fsroot: self.root.clone(),
        };
        let res = self
            .call::<FSINFO3args, FSINFO3res>(NFS_PROGRAM::NFSPROC3_FSINFO, &args)
            .await?;
        self.fsinfo = res.into_result()?;
        Ok(self.fsinfo.clone())
    }

    /// Resolves `path` from the root. An empty path is the root itself, without attributes.
    ///
    /// `..` is resolved against the preceding component before anything is sent.
    pub async fn lookup(&mut self, path: &str) -> Result<(Option<fattr3>, nfs_fh3), Error> {
        let components = path_components(path)?;
        self.lookup_components(&components).await
    }

    /// Creates a directory. The server may omit the new handle.
    pub async fn mkdir(&mut self, path: &str, mode: u32) -> Result<Option<nfs_fh3>, Error> {
        let (parent, name) = split_path(path)?;
        let (_, dir) = self.lookup_components(&parent).await?;
        let args = MKDIR3args {
            where_: diropargs3 {
                dir,
                name: filename3::from(name),
            },
            attributes: self.attributes(mode),
        };
        let res = self
            .call::<MKDIR3args, MKDIR3res>(NFS_PROGRAM::NFSPROC3_MKDIR, &args)
            .await?
            .into_result()?;
        debug!("mkdir {path}");
        Ok(res.obj.into_option())
    }

    pub async fn rmdir(&mut self, path: &str) -> Result<(), Error> {
        let (parent, name) = split_path(path)?;
        let (_, dir) = self.lookup_components(&parent).await?;
        self.rmdir_in(&dir, name.as_bytes()).await
    }

    pub async fn remove(&mut self, path: &str) -> Result<(), Error> {
        let (parent, name) = split_path(path)?;
        let (_, dir) = self.lookup_components(&parent).await?;
        self.remove_in(&dir, name.as_bytes()).await
    }

    /// Creates a regular file (UNCHECKED) and returns its handle.
    pub async fn create(&mut self, path: &str, mode: u32) -> Result<nfs_fh3, Error> {
        let (parent, name) = split_path(path)?;
        let (_, dir) = self.lookup_components(&parent).await?;
        let args = CREATE3args {
            where_: diropargs3 {
                dir: dir.clone(),
                name: filename3::from(name),
            },
            how: createhow3::UNCHECKED(self.attributes(mode)),
        };
        let res = self
            .call::<CREATE3args, CREATE3res>(NFS_PROGRAM::NFSPROC3_CREATE, &args)
            .await?
            .into_result()?;
        debug!("create {path}");

        match res.obj.into_option() {
            Some(handle) => Ok(handle),
            None => Ok(self.lookup_in(&dir, name.as_bytes()).await?.0),
        }
    }

    /// Lists a directory, `.` and `..` included. Only the first page is returned.
    pub async fn read_dir_plus(&mut self, path: &str) -> Result<Vec<entryplus3<'static>>, Error> {
        let (_, dir) = self.lookup(path).await?;
        let (entries, _) = self.read_dir_page(&dir).await?;
        Ok(entries)
    }

    /// Deletes `path` and, if it is a directory, everything below it.
    ///
    /// A missing path counts as success. Deletion is depth first and stops at the first
    /// failure, leaving whatever was not yet removed.
    pub async fn remove_all(&mut self, path: &str) -> Result<(), Error> {
        let (parent, name) = split_path(path)?;
        let dir = match self.lookup_components(&parent).await {
            Ok((_, dir)) => dir,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        };

        let Err(e) = self.rmdir_in(&dir, name.as_bytes()).await else {
            return Ok(());
        };
        match e.nfs_status() {
            Some(nfsstat3::NFS3ERR_NOENT) => Ok(()),
            Some(nfsstat3::NFS3ERR_NOTDIR) => self.remove_in(&dir, name.as_bytes()).await,
            Some(nfsstat3::NFS3ERR_NOTEMPTY | nfsstat3::NFS3ERR_EXIST) => {
                let (handle, _) = self.lookup_in(&dir, name.as_bytes()).await?;
                self.remove_tree(&dir, name.as_bytes(), handle).await
            }
            _ => Err(e),
        }
    }

    /// Opens `path` for reading from offset 0.
    pub async fn reader(&mut self, path: &str) -> Result<FileReader<'_, IO>, Error> {
        let (_, handle) = self.lookup(path).await?;
        Ok(FileReader::new(self, handle))
    }

    /// Opens `path` for writing from offset 0, creating it with `mode` if it does not exist.
    ///
    /// An existing file is not truncated.
    pub async fn writer(&mut self, path: &str, mode: u32) -> Result<FileWriter<'_, IO>, Error> {
        let handle = match self.lookup(path).await {
            Ok((_, handle)) => handle,
            Err(e) if e.is_not_found() => self.create(path, mode).await?,
            Err(e) => return Err(e),
        };
        Ok(FileWriter::new(self, handle))
    }

    pub(crate) fn read_chunk_size(&self) -> u32 {
        chunk_size(self.fsinfo.rtpref, self.fsinfo.rtmax)
    }

    pub(crate) fn write_chunk_size(&self) -> u32 {
        chunk_size(self.fsinfo.wtpref, self.fsinfo.wtmax)
    }

    pub(crate) async fn read_at(
        &mut self,
        file: &nfs_fh3,
        offset: u64,
        count: u32,
    ) -> Result<READ3resok<'static>, Error> {
        let args = READ3args {
            file: file.clone(),
            offset,
            count,
        };
        let res = self
            .call::<READ3args, READ3res>(NFS_PROGRAM::NFSPROC3_READ, &args)
            .await?
            .into_result()?;
        Ok(res)
    }

    /// Writes `data` at `offset` with `FILE_SYNC` and returns the count the server accepted.
    pub(crate) async fn write_at(
        &mut self,
        file: &nfs_fh3,
        offset: u64,
        data: &[u8],
    ) -> Result<u32, Error> {
        let count = u32::try_from(data.len()).map_err(|_| {
            nfsv3_types::xdr_codec::Error::ObjectTooLarge(data.len())
        })?;
        let args = WRITE3args {
            file: file.clone(),
            offset,
            count,
            stable: stable_how::FILE_SYNC,
            data: Opaque::borrowed(data),
        };
        let res = self
            .call::<WRITE3args, WRITE3res>(NFS_PROGRAM::NFSPROC3_WRITE, &args)
            .await?
            .into_result()?;
        Ok(res.count)
    }

    pub(crate) async fn commit(&mut self, file: &nfs_fh3) -> Result<(), Error> {
        let args = COMMIT3args {
            file: file.clone(),
            offset: 0,
            count: 0,
        };
        let _ = self
            .call::<COMMIT3args, COMMIT3res>(NFS_PROGRAM::NFSPROC3_COMMIT, &args)
            .await?
            .into_result()?;
        Ok(())
    }

    async fn lookup_components(
        &mut self,
        components: &[&str],
    ) -> Result<(Option<fattr3>, nfs_fh3), Error> {
        let mut handle = self.root.clone();
        let mut attrs = None;
        for name in components {
            let (next, next_attrs) = self.lookup_in(&handle, name.as_bytes()).await?;
            handle = next;
            attrs = next_attrs;
        }
        Ok((attrs, handle))
    }

    async fn lookup_in(
        &mut self,
        dir: &nfs_fh3,
        name: &[u8],
    ) -> Result<(nfs_fh3, Option<fattr3>), Error> {
        let args = LOOKUP3args {
            what: diropargs3 {
                dir: dir.clone(),
                name: filename3::from(name),
            },
        };
        let res = self
            .call::<LOOKUP3args, LOOKUP3res>(NFS_PROGRAM::NFSPROC3_LOOKUP, &args)
            .await?;
        match res.into_result() {
            Ok(ok) => Ok((ok.object, ok.obj_attributes.into_option())),
            Err(status) => {
                debug!(name = %String::from_utf8_lossy(name), %status, "lookup failed");
                Err(status.into())
            }
        }
    }

    async fn rmdir_in(&mut self, dir: &nfs_fh3, name: &[u8]) -> Result<(), Error> {
        let args = RMDIR3args {
            object: diropargs3 {
                dir: dir.clone(),
                name: filename3::from(name),
            },
        };
        let _ = self
            .call::<RMDIR3args, RMDIR3res>(NFS_PROGRAM::NFSPROC3_RMDIR, &args)
            .await?
            .into_result()?;
        debug!(name = %String::from_utf8_lossy(name), "rmdir");
        Ok(())
    }

    async fn remove_in(&mut self, dir: &nfs_fh3, name: &[u8]) -> Result<(), Error> {
        let args = REMOVE3args {
            object: diropargs3 {
                dir: dir.clone(),
                name: filename3::from(name),
            },
        };
        let _ = self
            .call::<REMOVE3args, REMOVE3res>(NFS_PROGRAM::NFSPROC3_REMOVE, &args)
            .await?
            .into_result()?;
        debug!(name = %String::from_utf8_lossy(name), "remove");
        Ok(())
    }

    async fn read_dir_page(
        &mut self,
        dir: &nfs_fh3,
    ) -> Result<(Vec<entryplus3<'static>>, bool), Error> {
        let args = READDIRPLUS3args {
            dir: dir.clone(),
            cookie: 0,
            cookieverf: cookieverf3::default(),
            dircount: READDIR_DIRCOUNT,
            maxcount: READDIR_MAXCOUNT,
        };
        let res = self
            .call::<READDIRPLUS3args, READDIRPLUS3res>(NFS_PROGRAM::NFSPROC3_READDIRPLUS, &args)
            .await?
            .into_result()?;
        Ok((res.reply.entries.into_inner(), res.reply.eof))
    }

    /// Empties the directory `handle` (named `name` in `parent`) and removes it.
    fn remove_tree<'a>(
        &'a mut self,
        parent: &'a nfs_fh3,
        name: &'a [u8],
        handle: nfs_fh3,
    ) -> BoxFuture<'a, Result<(), Error>> {
        Box::pin(async move {
            loop {
                let (entries, eof) = self.read_dir_page(&handle).await?;
                let mut removed = 0usize;
                for entry in entries {
                    if entry.name.is_dot_or_dotdot() {
                        continue;
                    }
                    let child_name = entry.name.as_ref();
                    let mut child = entry.name_handle.as_ref().cloned();
                    let is_dir = if let Some(attrs) = entry.name_attributes.as_ref() {
                        attrs.type_ == ftype3::NF3DIR
                    } else {
                        let (found, attrs) = self.lookup_in(&handle, child_name).await?;
                        child = Some(found);
                        attrs.is_some_and(|attrs| attrs.type_ == ftype3::NF3DIR)
                    };

                    if is_dir {
                        let child = match child {
                            Some(child) => child,
                            None => self.lookup_in(&handle, child_name).await?.0,
                        };
                        self.remove_tree(&handle, child_name, child).await?;
                    } else {
                        self.remove_in(&handle, child_name).await?;
                    }
                    removed += 1;
                }

                match self.rmdir_in(parent, name).await {
                    // entries beyond the first page are still there; a page that removed
                    // nothing would be listed the same way again
                    Err(e)
                        if !eof
                            && removed > 0
                            && e.nfs_status() == Some(nfsstat3::NFS3ERR_NOTEMPTY) =>
                    {
                        debug!(removed, "directory not empty, listing again");
                    }
                    result => return result,
                }
            }
        })
    }

    fn attributes(&self, mode: u32) -> sattr3 {
        sattr3 {
            mode: Some(mode).into(),
            uid: self.owner.map(|owner| owner.uid).into(),
            gid: self.owner.map(|owner| owner.gid).into(),
            ..sattr3::default()
        }
    }

    async fn call<C, R>(&mut self, proc: NFS_PROGRAM, args: &C) -> Result<R, Error>
    where
        C: Pack,
        R: Unpack,
    {
        let payload = self
            .rpc
            .call(
                PROGRAM,
                VERSION,
                proc as u32,
                &self.credential,
                &opaque_auth::default(),
                args,
            )
            .await?;
        decode_reply(&payload)
    }
}

/// Decodes a procedure result that must use the whole payload.
///
/// A failed status is reported as [`Error::Nfs`] even when the failure body after it is
/// malformed or longer than expected.
fn decode_reply<R: Unpack>(payload: &[u8]) -> Result<R, Error> {
    let decoded = from_bytes::<R>(payload);
    let complete = matches!(&decoded, Ok((_, consumed)) if *consumed == payload.len());
    if !complete {
        match from_bytes::<nfsstat3>(payload) {
            Ok((status, _)) if status != nfsstat3::NFS3_OK => return Err(status.into()),
            _ => {}
        }
    }

    let (value, consumed) = decoded?;
    if consumed != payload.len() {
        return Err(RpcError::NotFullyParsed {
            consumed,
            total: payload.len(),
        }
        .into());
    }
    Ok(value)
}

fn chunk_size(preferred: u32, max: u32) -> u32 {
    if preferred > 0 {
        preferred
    } else if max > 0 {
        max
    } else {
        DEFAULT_CHUNK_SIZE
    }
}

/// Components of `path` with empty and `.` segments dropped and `..` folded into its parent.
///
/// A `..` that would climb above the export root is an invalid path.
fn path_components(path: &str) -> Result<Vec<&str>, Error> {
    let mut components = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if components.pop().is_none() {
                    return Err(Error::InvalidPath(path.to_owned()));
                }
            }
            name => components.push(name),
        }
    }
    Ok(components)
}

/// Splits `path` into the components of its parent and its final component.
fn split_path(path: &str) -> Result<(Vec<&str>, &str), Error> {
    let mut components = path_components(path)?;
    let name = components
        .pop()
        .ok_or_else(|| Error::InvalidPath(path.to_owned()))?;
    Ok((components, name))
}
