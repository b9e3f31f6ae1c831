// In-memory portmap/MOUNT/NFS responder for client tests
#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use nfsv3_client::{MountSession, SessionBuilder, Target};
use nfsv3_client::dial::{DialOptions, PrivilegedPort};
use nfsv3_client::net::Connector;
use nfsv3_client::tokio::TokioIo;
use nfsv3_types::mount::{MOUNT_PROGRAM, dirpath, fhandle3, mountres3, mountres3_ok, mountstat3};
use nfsv3_types::nfs3::{
    COMMIT3args, COMMIT3res, COMMIT3resok, CREATE3args, CREATE3res, CREATE3resfail,
    CREATE3resok, FSINFO3res, FSINFO3resok, LOOKUP3args, LOOKUP3res, LOOKUP3resfail, LOOKUP3resok,
    MKDIR3args, MKDIR3res, MKDIR3resfail, MKDIR3resok, NFS_PROGRAM, Nfs3Option, Nfs3Result,
    READ3args, READ3res, READ3resfail, READ3resok, READDIRPLUS3args, READDIRPLUS3res,
    READDIRPLUS3resfail, READDIRPLUS3resok, REMOVE3args, REMOVE3res, REMOVE3resfail,
    REMOVE3resok, RMDIR3args, RMDIR3res, RMDIR3resfail, RMDIR3resok, WRITE3args, WRITE3res,
    WRITE3resfail, WRITE3resok, cookieverf3, createhow3, dirlistplus3, entryplus3, fattr3,
    filename3, ftype3, nfs_fh3, nfsstat3, nfstime3, post_op_attr, sattr3, specdata3, stable_how,
    wcc_data, writeverf3,
};
use nfsv3_types::portmap::{PMAP_PROG, mapping};
use nfsv3_types::rpc::{
    accept_stat_data, accepted_reply, msg_body, opaque_auth, reply_body, rpc_msg,
};
use nfsv3_types::xdr_codec::{List, Opaque, Pack, Unpack, from_bytes, to_bytes};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};

pub const MOUNT_PORT: u16 = 20048;
pub const NFS_PORT: u16 = 2049;
pub const EXPORT_PATH: &str = "/export";
pub const ROOT_ID: u64 = 1;

static LOGGING: std::sync::Once = std::sync::Once::new();

pub fn init_logging(level: tracing::Level) {
    LOGGING.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[derive(Debug, Clone)]
pub enum Node {
    Dir(BTreeMap<Vec<u8>, u64>),
    File(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub prog: u32,
    pub proc: u32,
    pub cred: opaque_auth<'static>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub offset: u64,
    pub len: usize,
    pub stable: stable_how,
}

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub rtpref: u32,
    pub wtpref: u32,
    /// Maximum number of children (besides `.` and `..`) per READDIRPLUS page.
    pub page_limit: Option<usize>,
    /// Caps the count acknowledged by WRITE.
    pub max_write_ack: Option<u32>,
    /// Splits every reply into two record fragments.
    pub split_replies: bool,
    pub omit_create_handle: bool,
    pub omit_entry_attrs: bool,
    /// Drops the failure body after a non-OK NFS status.
    pub status_only_failures: bool,
    pub mount_status: Option<mountstat3>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            rtpref: 32,
            wtpref: 32,
            page_limit: None,
            max_write_ack: None,
            split_replies: false,
            omit_create_handle: false,
            omit_entry_attrs: false,
            status_only_failures: false,
            mount_status: None,
        }
    }
}

#[derive(Debug)]
pub struct MockFs {
    pub config: MockConfig,
    pub nodes: HashMap<u64, Node>,
    pub parents: HashMap<u64, u64>,
    next_id: u64,
    /// Registered ports by program number.
    pub ports: HashMap<u32, u32>,
    pub calls: Vec<Call>,
    pub connects: Vec<u16>,
    pub local_ports: Vec<u16>,
    pub writes: Vec<Write>,
    /// Successful REMOVE/RMDIR operations, as `"remove name"` / `"rmdir name"`.
    pub removed: Vec<String>,
    pub last_sattr: Option<sattr3>,
    pub unmounted: Vec<String>,
}

impl MockFs {
    pub fn new(config: MockConfig) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID, Node::Dir(BTreeMap::new()));
        let mut parents = HashMap::new();
        parents.insert(ROOT_ID, ROOT_ID);
        let ports = HashMap::from([
            (nfsv3_types::mount::PROGRAM, u32::from(MOUNT_PORT)),
            (nfsv3_types::nfs3::PROGRAM, u32::from(NFS_PORT)),
        ]);
        Self {
            config,
            nodes,
            parents,
            next_id: ROOT_ID + 1,
            ports,
            calls: Vec::new(),
            connects: Vec::new(),
            local_ports: Vec::new(),
            writes: Vec::new(),
            removed: Vec::new(),
            last_sattr: None,
            unmounted: Vec::new(),
        }
    }

    pub fn add_dir(&mut self, path: &str) -> u64 {
        self.add_node(path, Node::Dir(BTreeMap::new()))
    }

    pub fn add_file(&mut self, path: &str, data: &[u8]) -> u64 {
        self.add_node(path, Node::File(data.to_vec()))
    }

    fn add_node(&mut self, path: &str, node: Node) -> u64 {
        let (parent, name) = path.rsplit_once('/').unwrap_or(("", path));
        let parent = self.resolve(parent).unwrap();
        self.insert(parent, name.as_bytes(), node)
    }

    fn insert(&mut self, parent: u64, name: &[u8], node: Node) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, node);
        self.parents.insert(id, parent);
        let Some(Node::Dir(children)) = self.nodes.get_mut(&parent) else {
            panic!("parent is not a directory");
        };
        children.insert(name.to_vec(), id);
        id
    }

    pub fn resolve(&self, path: &str) -> Option<u64> {
        let mut id = ROOT_ID;
        for name in path.split('/').filter(|name| !name.is_empty()) {
            let Some(Node::Dir(children)) = self.nodes.get(&id) else {
                return None;
            };
            id = *children.get(name.as_bytes())?;
        }
        Some(id)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    pub fn file_data(&self, path: &str) -> Option<Vec<u8>> {
        match self.nodes.get(&self.resolve(path)?)? {
            Node::File(data) => Some(data.clone()),
            Node::Dir(_) => None,
        }
    }

    pub fn count(&self, prog: u32, proc: u32) -> usize {
        self.calls
            .iter()
            .filter(|call| call.prog == prog && call.proc == proc)
            .count()
    }

    pub fn nfs_count(&self, proc: NFS_PROGRAM) -> usize {
        self.count(nfsv3_types::nfs3::PROGRAM, proc as u32)
    }

    pub fn mount_count(&self, proc: MOUNT_PROGRAM) -> usize {
        self.count(nfsv3_types::mount::PROGRAM, proc as u32)
    }

    pub fn portmap_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| call.prog == nfsv3_types::portmap::PROGRAM)
            .count()
    }

    /// Decodes one call record and returns the full reply record body.
    pub fn handle(&mut self, record: &[u8]) -> Vec<u8> {
        let (msg, header_len) = from_bytes::<rpc_msg>(record).unwrap();
        let msg_body::CALL(call) = msg.body else {
            panic!("expected a call");
        };
        self.calls.push(Call {
            prog: call.prog,
            proc: call.proc,
            cred: opaque_auth {
                flavor: call.cred.flavor,
                body: call.cred.body.to_static(),
            },
        });

        let args = &record[header_len..];
        let payload = match call.prog {
            nfsv3_types::portmap::PROGRAM => self.portmap(call.proc, args),
            nfsv3_types::mount::PROGRAM => self.mount(call.proc, args),
            nfsv3_types::nfs3::PROGRAM => self.nfs(call.proc, args),
            prog => panic!("unexpected program {prog}"),
        };

        let reply = rpc_msg {
            xid: msg.xid,
            body: msg_body::REPLY(reply_body::MSG_ACCEPTED(accepted_reply {
                verf: opaque_auth::default(),
                reply_data: accept_stat_data::SUCCESS,
            })),
        };
        let mut out = to_bytes(&reply).unwrap();
        out.extend_from_slice(&payload);
        out
    }

    fn portmap(&self, proc: u32, args: &[u8]) -> Vec<u8> {
        if proc == PMAP_PROG::PMAPPROC_NULL as u32 {
            return Vec::new();
        }
        assert_eq!(proc, PMAP_PROG::PMAPPROC_GETPORT as u32);
        let args: mapping = decode(args);
        assert_eq!(args.prot, nfsv3_types::portmap::IPPROTO_TCP);
        let port = self.ports.get(&args.prog).copied().unwrap_or(0);
        encode(&port)
    }

    fn mount(&mut self, proc: u32, args: &[u8]) -> Vec<u8> {
        match MOUNT_PROGRAM::try_from(proc).unwrap() {
            MOUNT_PROGRAM::MOUNTPROC3_NULL => Vec::new(),
            MOUNT_PROGRAM::MOUNTPROC3_MNT => {
                let path: dirpath = decode(args);
                let res = if let Some(status) = self.config.mount_status {
                    mountres3::Err(status)
                } else if path.0.as_ref() == EXPORT_PATH.as_bytes() {
                    mountres3::Ok(mountres3_ok {
                        fhandle: fhandle3(Opaque::owned(fh(ROOT_ID).data.into_owned())),
                        auth_flavors: vec![0, 1],
                    })
                } else {
                    mountres3::Err(mountstat3::MNT3ERR_NOENT)
                };
                encode(&res)
            }
            MOUNT_PROGRAM::MOUNTPROC3_UMNT => {
                let path: dirpath = decode(args);
                self.unmounted
                    .push(String::from_utf8(path.0.into_owned()).unwrap());
                Vec::new()
            }
            // empty export list
            MOUNT_PROGRAM::MOUNTPROC3_EXPORT => encode(&0u32),
            other => panic!("unexpected mount procedure {other:?}"),
        }
    }

    fn nfs(&mut self, proc: u32, args: &[u8]) -> Vec<u8> {
        let mut payload = self.nfs_payload(proc, args);
        if self.config.status_only_failures && payload.len() > 4 && payload[..4] != [0; 4] {
            payload.truncate(4);
        }
        payload
    }

    fn nfs_payload(&mut self, proc: u32, args: &[u8]) -> Vec<u8> {
        match NFS_PROGRAM::try_from(proc).unwrap() {
            NFS_PROGRAM::NFSPROC3_NULL => Vec::new(),
            NFS_PROGRAM::NFSPROC3_FSINFO => encode(&FSINFO3res::Ok(self.fsinfo())),
            NFS_PROGRAM::NFSPROC3_LOOKUP => encode(&self.lookup(decode(args))),
            NFS_PROGRAM::NFSPROC3_MKDIR => encode(&self.mkdir(decode(args))),
            NFS_PROGRAM::NFSPROC3_CREATE => encode(&self.create(decode(args))),
            NFS_PROGRAM::NFSPROC3_REMOVE => encode(&self.remove(decode(args))),
            NFS_PROGRAM::NFSPROC3_RMDIR => encode(&self.rmdir(decode(args))),
            NFS_PROGRAM::NFSPROC3_READDIRPLUS => encode(&self.readdirplus(&decode(args))),
            NFS_PROGRAM::NFSPROC3_READ => encode(&self.read(&decode(args))),
            NFS_PROGRAM::NFSPROC3_WRITE => encode(&self.write(decode(args))),
            NFS_PROGRAM::NFSPROC3_COMMIT => {
                let _args: COMMIT3args = decode(args);
                encode(&COMMIT3res::Ok(COMMIT3resok {
                    file_wcc: wcc_data::default(),
                    verf: writeverf3::default(),
                }))
            }
            other => panic!("unexpected nfs procedure {other:?}"),
        }
    }

    fn fsinfo(&self) -> FSINFO3resok {
        FSINFO3resok {
            obj_attributes: Nfs3Option::Some(self.attrs(ROOT_ID)),
            rtmax: 1024 * 1024,
            rtpref: self.config.rtpref,
            rtmult: 4096,
            wtmax: 1024 * 1024,
            wtpref: self.config.wtpref,
            wtmult: 4096,
            dtpref: 4096,
            maxfilesize: u64::MAX,
            time_delta: nfstime3 {
                seconds: 0,
                nseconds: 1,
            },
            properties: 0,
        }
    }

    fn attrs(&self, id: u64) -> fattr3 {
        let (type_, mode, size) = match &self.nodes[&id] {
            Node::Dir(_) => (ftype3::NF3DIR, 0o755, 4096),
            Node::File(data) => (ftype3::NF3REG, 0o644, data.len() as u64),
        };
        fattr3 {
            type_,
            mode,
            nlink: 1,
            uid: 0,
            gid: 0,
            size,
            used: size,
            rdev: specdata3::default(),
            fsid: 1,
            fileid: id,
            atime: nfstime3::default(),
            mtime: nfstime3::default(),
            ctime: nfstime3::default(),
        }
    }

    /// Attributes as sent in failure bodies; real servers fill these in.
    fn post_op(&self, handle: &nfs_fh3) -> post_op_attr {
        let id = id_of(handle);
        if self.nodes.contains_key(&id) {
            Nfs3Option::Some(self.attrs(id))
        } else {
            Nfs3Option::None
        }
    }

    fn wcc(&self, handle: &nfs_fh3) -> wcc_data {
        wcc_data {
            before: Nfs3Option::None,
            after: self.post_op(handle),
        }
    }

    fn children(&self, dir: &nfs_fh3) -> Result<&BTreeMap<Vec<u8>, u64>, nfsstat3> {
        match self.nodes.get(&id_of(dir)) {
            Some(Node::Dir(children)) => Ok(children),
            Some(Node::File(_)) => Err(nfsstat3::NFS3ERR_NOTDIR),
            None => Err(nfsstat3::NFS3ERR_STALE),
        }
    }

    fn child(&self, dir: &nfs_fh3, name: &filename3) -> Result<u64, nfsstat3> {
        let parent = id_of(dir);
        let children = self.children(dir)?;
        match name.as_ref() {
            b"." => Ok(parent),
            b".." => Ok(self.parents[&parent]),
            name => children.get(name).copied().ok_or(nfsstat3::NFS3ERR_NOENT),
        }
    }

    fn lookup(&self, args: LOOKUP3args) -> LOOKUP3res {
        match self.child(&args.what.dir, &args.what.name) {
            Ok(id) => Nfs3Result::Ok(LOOKUP3resok {
                object: fh(id),
                obj_attributes: Nfs3Option::Some(self.attrs(id)),
                dir_attributes: Nfs3Option::None,
            }),
            Err(status) => Nfs3Result::Err((
                status,
                LOOKUP3resfail {
                    dir_attributes: self.post_op(&args.what.dir),
                },
            )),
        }
    }

    fn mkdir(&mut self, args: MKDIR3args) -> MKDIR3res {
        self.last_sattr = Some(args.attributes.clone());
        let dir = &args.where_.dir;
        let fail = |status| {
            Nfs3Result::Err((
                status,
                MKDIR3resfail {
                    dir_wcc: self.wcc(dir),
                },
            ))
        };
        if let Err(status) = self.children(dir) {
            return fail(status);
        }
        if self.child(dir, &args.where_.name).is_ok() {
            return fail(nfsstat3::NFS3ERR_EXIST);
        }
        let id = self.insert(
            id_of(dir),
            args.where_.name.as_ref(),
            Node::Dir(BTreeMap::new()),
        );
        Nfs3Result::Ok(MKDIR3resok {
            obj: Nfs3Option::Some(fh(id)),
            obj_attributes: Nfs3Option::Some(self.attrs(id)),
            dir_wcc: wcc_data::default(),
        })
    }

    fn create(&mut self, args: CREATE3args) -> CREATE3res {
        let createhow3::UNCHECKED(attributes) = args.how else {
            panic!("client only creates UNCHECKED");
        };
        self.last_sattr = Some(attributes);
        let dir = &args.where_.dir;
        if let Err(status) = self.children(dir) {
            let dir_wcc = self.wcc(dir);
            return Nfs3Result::Err((status, CREATE3resfail { dir_wcc }));
        }
        let id = match self.child(dir, &args.where_.name) {
            Ok(id) => id,
            Err(_) => self.insert(
                id_of(dir),
                args.where_.name.as_ref(),
                Node::File(Vec::new()),
            ),
        };
        let obj = if self.config.omit_create_handle {
            Nfs3Option::None
        } else {
            Nfs3Option::Some(fh(id))
        };
        Nfs3Result::Ok(CREATE3resok {
            obj,
            obj_attributes: Nfs3Option::None,
            dir_wcc: wcc_data::default(),
        })
    }

    fn unlink(&mut self, dir: &nfs_fh3, name: &filename3, want_dir: bool) -> Result<(), nfsstat3> {
        let id = self.child(dir, name)?;
        match (&self.nodes[&id], want_dir) {
            (Node::Dir(_), false) => return Err(nfsstat3::NFS3ERR_ISDIR),
            (Node::File(_), true) => return Err(nfsstat3::NFS3ERR_NOTDIR),
            (Node::Dir(children), true) if !children.is_empty() => {
                return Err(nfsstat3::NFS3ERR_NOTEMPTY);
            }
            _ => {}
        }
        if let Some(Node::Dir(children)) = self.nodes.get_mut(&id_of(dir)) {
            children.remove(name.as_ref());
        }
        self.nodes.remove(&id);
        let op = if want_dir { "rmdir" } else { "remove" };
        self.removed.push(format!("{op} {name}"));
        Ok(())
    }

    fn remove(&mut self, args: REMOVE3args) -> REMOVE3res {
        match self.unlink(&args.object.dir, &args.object.name, false) {
            Ok(()) => Nfs3Result::Ok(REMOVE3resok {
                dir_wcc: wcc_data::default(),
            }),
            Err(status) => Nfs3Result::Err((
                status,
                REMOVE3resfail {
                    dir_wcc: self.wcc(&args.object.dir),
                },
            )),
        }
    }

    fn rmdir(&mut self, args: RMDIR3args) -> RMDIR3res {
        match self.unlink(&args.object.dir, &args.object.name, true) {
            Ok(()) => Nfs3Result::Ok(RMDIR3resok {
                dir_wcc: wcc_data::default(),
            }),
            Err(status) => Nfs3Result::Err((
                status,
                RMDIR3resfail {
                    dir_wcc: self.wcc(&args.object.dir),
                },
            )),
        }
    }

    fn readdirplus(&self, args: &READDIRPLUS3args) -> READDIRPLUS3res<'static> {
        assert_eq!(args.cookie, 0);
        let children = match self.children(&args.dir) {
            Ok(children) => children,
            Err(status) => {
                let dir_attributes = self.post_op(&args.dir);
                return Nfs3Result::Err((status, READDIRPLUS3resfail { dir_attributes }));
            }
        };
        let dir = id_of(&args.dir);
        let limit = self.config.page_limit.unwrap_or(usize::MAX);

        let mut listed: Vec<(Vec<u8>, u64)> =
            vec![(b".".to_vec(), dir), (b"..".to_vec(), self.parents[&dir])];
        listed.extend(
            children
                .iter()
                .take(limit)
                .map(|(name, id)| (name.clone(), *id)),
        );

        let entries = listed
            .into_iter()
            .enumerate()
            .map(|(index, (name, id))| {
                let (name_attributes, name_handle) = if self.config.omit_entry_attrs {
                    (Nfs3Option::None, Nfs3Option::None)
                } else {
                    (Nfs3Option::Some(self.attrs(id)), Nfs3Option::Some(fh(id)))
                };
                entryplus3 {
                    fileid: id,
                    name: filename3::from(name),
                    cookie: index as u64 + 1,
                    name_attributes,
                    name_handle,
                }
            })
            .collect();

        Nfs3Result::Ok(READDIRPLUS3resok {
            dir_attributes: Nfs3Option::Some(self.attrs(dir)),
            cookieverf: cookieverf3::default(),
            reply: dirlistplus3 {
                entries: List(entries),
                eof: children.len() <= limit,
            },
        })
    }

    fn read(&self, args: &READ3args) -> READ3res<'static> {
        let Some(Node::File(data)) = self.nodes.get(&id_of(&args.file)) else {
            let file_attributes = self.post_op(&args.file);
            return Nfs3Result::Err((nfsstat3::NFS3ERR_ISDIR, READ3resfail { file_attributes }));
        };
        let start = usize::try_from(args.offset).unwrap().min(data.len());
        let end = (start + args.count as usize).min(data.len());
        Nfs3Result::Ok(READ3resok {
            file_attributes: Nfs3Option::None,
            count: u32::try_from(end - start).unwrap(),
            eof: end == data.len(),
            data: Opaque::owned(data[start..end].to_vec()),
        })
    }

    fn write(&mut self, args: WRITE3args) -> WRITE3res {
        let ack = self
            .config
            .max_write_ack
            .map_or(args.data.len(), |max| args.data.len().min(max as usize));
        self.writes.push(Write {
            offset: args.offset,
            len: args.data.len(),
            stable: args.stable,
        });
        let file_wcc = self.wcc(&args.file);
        let Some(Node::File(data)) = self.nodes.get_mut(&id_of(&args.file)) else {
            return Nfs3Result::Err((nfsstat3::NFS3ERR_ISDIR, WRITE3resfail { file_wcc }));
        };
        let offset = usize::try_from(args.offset).unwrap();
        if data.len() < offset + ack {
            data.resize(offset + ack, 0);
        }
        data[offset..offset + ack].copy_from_slice(&args.data.as_ref()[..ack]);
        Nfs3Result::Ok(WRITE3resok {
            file_wcc: wcc_data::default(),
            count: u32::try_from(ack).unwrap(),
            committed: stable_how::FILE_SYNC,
            verf: writeverf3::default(),
        })
    }
}

pub fn fh(id: u64) -> nfs_fh3 {
    nfs_fh3::new(id.to_be_bytes().to_vec())
}

pub fn id_of(handle: &nfs_fh3) -> u64 {
    u64::from_be_bytes(handle.data.as_ref().try_into().unwrap())
}

fn decode<T: Unpack>(args: &[u8]) -> T {
    let (value, len) = from_bytes::<T>(args).unwrap();
    assert_eq!(len, args.len(), "arguments not fully consumed");
    value
}

fn encode(value: &impl Pack) -> Vec<u8> {
    to_bytes(value).unwrap()
}

pub type SharedFs = Arc<Mutex<MockFs>>;

/// Connector whose connections are served by a shared [`MockFs`].
#[derive(Clone)]
pub struct MockConnector {
    pub fs: SharedFs,
    pub refuse_local_ports: bool,
}

impl MockConnector {
    pub fn new(fs: MockFs) -> Self {
        Self {
            fs: Arc::new(Mutex::new(fs)),
            refuse_local_ports: false,
        }
    }

    pub fn fs(&self) -> MutexGuard<'_, MockFs> {
        self.fs.lock().unwrap()
    }
}

impl Connector for MockConnector {
    type Connection = TokioIo<DuplexStream>;

    async fn connect(&self, _host: &str, port: u16) -> std::io::Result<Self::Connection> {
        self.fs().connects.push(port);
        let (client, server) = duplex(1024 * 1024);
        tokio::spawn(serve(server, self.fs.clone()));
        Ok(TokioIo::new(client))
    }

    async fn connect_with_port(
        &self,
        host: &str,
        port: u16,
        local_port: u16,
    ) -> std::io::Result<Self::Connection> {
        if self.refuse_local_ports {
            return Err(std::io::ErrorKind::AddrInUse.into());
        }
        self.fs().local_ports.push(local_port);
        self.connect(host, port).await
    }
}

async fn serve(mut stream: DuplexStream, fs: SharedFs) {
    loop {
        let mut header = [0u8; 4];
        if stream.read_exact(&mut header).await.is_err() {
            return;
        }
        let len = (u32::from_be_bytes(header) & 0x7fff_ffff) as usize;
        let mut record = vec![0u8; len];
        if stream.read_exact(&mut record).await.is_err() {
            return;
        }

        let (reply, split) = {
            let mut fs = fs.lock().unwrap();
            let reply = fs.handle(&record);
            (reply, fs.config.split_replies)
        };

        let fragments = if split {
            let (first, second) = reply.split_at(reply.len() / 2);
            vec![(first, false), (second, true)]
        } else {
            vec![(reply.as_slice(), true)]
        };
        for (fragment, last) in fragments {
            let mut header = u32::try_from(fragment.len()).unwrap();
            if last {
                header |= 0x8000_0000;
            }
            if stream.write_all(&header.to_be_bytes()).await.is_err()
                || stream.write_all(fragment).await.is_err()
            {
                return;
            }
        }
    }
}

/// Builder pointed at the mock with reserved ports disabled.
pub fn builder(connector: &MockConnector) -> SessionBuilder<MockConnector> {
    SessionBuilder::new(connector.clone(), "mockhost").privileged_port(PrivilegedPort::Never)
}

pub fn dial_options() -> DialOptions {
    DialOptions {
        privileged_port: PrivilegedPort::Never,
        ..DialOptions::default()
    }
}

pub fn credential() -> opaque_auth<'static> {
    nfsv3_client::rpc::auth_unix_credential("testhost", 1001, 1001).unwrap()
}

pub type MockTarget = Target<TokioIo<DuplexStream>>;

/// Connects through the portmapper and mounts [`EXPORT_PATH`].
pub async fn mount(
    connector: &MockConnector,
) -> anyhow::Result<(MountSession<MockConnector>, MockTarget)> {
    let mut session = builder(connector).connect().await?;
    let target = session.mount(EXPORT_PATH, &credential()).await?;
    Ok((session, target))
}
