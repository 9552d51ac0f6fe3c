//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wasm_site::{HttpServer, Shutdown, SiteConfig};

pub const CORE_JS: &[u8] = b"export default function createFFmpegCore() {}\n";
pub const CORE_WASM: &[u8] = b"\0asm\x01\0\0\0\x01\x04\x01\x60\0\0";
pub const CORE_WORKER: &[u8] = b"self.onmessage = () => {};\n";

/// A scratch directory holding a fake `dist/esm` build of the media library.
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("node_modules/@ffmpeg/core-mt/dist/esm");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("ffmpeg-core.js"), CORE_JS).unwrap();
        fs::write(source.join("ffmpeg-core.wasm"), CORE_WASM).unwrap();
        fs::write(source.join("ffmpeg-core.worker.js"), CORE_WORKER).unwrap();
        Self { root }
    }

    pub fn source(&self) -> PathBuf {
        self.root.path().join("node_modules/@ffmpeg/core-mt/dist/esm")
    }

    pub fn dest(&self) -> PathBuf {
        self.root.path().join("static/wasm")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.path().join("static")
    }
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// A server running on an ephemeral port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Trigger shutdown and wait for the serve loop to return.
    pub async fn stop(self) -> std::io::Result<()> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not stop")
            .unwrap()
    }
}

/// Start the site server. The listener is bound before this returns, so
/// connections are queued by the OS until the serve loop picks them up.
pub async fn start_server(config: SiteConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.listen();

    let task = tokio::spawn(async move { HttpServer::new(config).run(listener, server_shutdown).await });

    RunningServer { addr, shutdown, task }
}
