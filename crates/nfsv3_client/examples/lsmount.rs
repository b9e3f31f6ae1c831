//! Exercises a mounted export: mkdir, write and read back a file, list, clean up, unmount.
//!
//! Usage: lsmount <host>:<export> <dir> [size in bytes]

use std::env;

use nfsv3_client::SessionBuilder;
use nfsv3_client::rpc::auth_unix_credential;
use nfsv3_client::tokio::TokioConnector;

const DEFAULT_SIZE: usize = 20 * 1024 * 1024;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let args = env::args().collect::<Vec<_>>();
    if args.len() < 3 {
        eprintln!("Usage: lsmount <host>:<export> <dir> [size]");
        return Ok(());
    }
    let Some((host, export)) = args[1].split_once(':') else {
        eprintln!("expected <host>:<export>, got {}", args[1]);
        return Ok(());
    };
    let dir = args[2].as_str();
    let size = args
        .get(3)
        .and_then(|size| size.parse::<usize>().ok())
        .unwrap_or(DEFAULT_SIZE);

    let mut session = SessionBuilder::new(TokioConnector, host)
        .owner(1001, 1001)
        .connect()
        .await?;
    let credential = auth_unix_credential("lsmount", 1001, 1001)?;
    let mut target = session.mount(export, &credential).await?;

    target.mkdir(dir, 0o775).await?;
    if target.mkdir(dir, 0o775).await.is_ok() {
        return Err("second mkdir of the same directory succeeded".into());
    }

    let data: Vec<u8> = (0..size).map(|_| rand::random::<u8>()).collect();
    let path = format!("{dir}/data");
    let mut writer = target.writer(&path, 0o644).await?;
    writer.write(&data).await?;
    writer.close().await?;

    let mut read_back = Vec::with_capacity(size);
    target.reader(&path).await?.read_to_end(&mut read_back).await?;
    if read_back != data {
        return Err(format!("read back {} bytes, content differs", read_back.len()).into());
    }
    println!("wrote and read back {size} bytes");

    let (attrs, handle) = target.lookup(dir).await?;
    println!("{dir}: handle {handle}, attributes {attrs:?}");

    for entry in target.read_dir_plus(dir).await? {
        match entry.name_attributes.as_ref() {
            Some(attrs) => println!(
                "\t{}\t{}:{}\t{:o}",
                entry.name, attrs.uid, attrs.gid, attrs.mode
            ),
            None => println!("\t{}", entry.name),
        }
    }

    target.remove_all(dir).await?;
    target.close().await?;
    session.unmount().await?;
    session.close().await?;
    Ok(())
}
