//! Shared fixtures: a local HTTP server and archive builders.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use flate2::write::GzEncoder;
use flate2::Compression;
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// Serve requests on a random local port; `handler` returns `(status, body)`.
    ///
    /// For 3xx statuses the body is sent as the `Location` header instead (see [`redirect`]).
    pub fn start<H>(handler: H) -> Self
    where
        H: Fn(&RecordedRequest) -> (u16, Vec<u8>) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let entry = RecordedRequest {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    authorization,
                };

                let (status, body) = handler(&entry);
                recorded.lock().unwrap().push(entry);
                let response = if (300..400).contains(&status) {
                    let location = Header::from_bytes(&b"Location"[..], body).unwrap();
                    Response::from_data(Vec::new())
                        .with_status_code(status)
                        .with_header(location)
                } else {
                    Response::from_data(body).with_status_code(status)
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn json(value: serde_json::Value) -> (u16, Vec<u8>) {
    (200, value.to_string().into_bytes())
}

pub fn not_found() -> (u16, Vec<u8>) {
    (404, b"Not Found".to_vec())
}

/// 302 to `location`
pub fn redirect(location: &str) -> (u16, Vec<u8>) {
    (302, location.as_bytes().to_vec())
}

/// Write a `.tar.gz` containing `entries` (path, content)
pub fn tar_gz(path: &Path, entries: &[(&str, &str)]) -> PathBuf {
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, content.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
    path.to_path_buf()
}

/// In-memory `.tar.gz`
pub fn tar_gz_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let dir = tempfile::TempDir::new().unwrap();
    let path = tar_gz(&dir.path().join("archive.tar.gz"), entries);
    std::fs::read(path).unwrap()
}

/// In-memory `.zip`
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Layout of the FMOD Linux tarball
pub const FMOD_LINUX_ENTRIES: &[(&str, &str)] = &[
    ("fmodstudioapi20312linux/api/core/inc/fmod.h", "core header"),
    ("fmodstudioapi20312linux/api/core/inc/fmod_common.h", "common header"),
    ("fmodstudioapi20312linux/api/core/lib/x86_64/libfmod.so", "core lib"),
    ("fmodstudioapi20312linux/api/studio/inc/fmod_studio.h", "studio header"),
    ("fmodstudioapi20312linux/api/studio/lib/x86_64/libfmodstudio.so", "studio lib"),
    ("fmodstudioapi20312linux/plugins/resonance_audio/lib/resonanceaudio.so", "plugin"),
    ("fmodstudioapi20312linux/doc/index.html", "docs"),
];

/// Layout of the raylib Windows zip
pub const RAYLIB_WINDOWS_ENTRIES: &[(&str, &str)] = &[
    ("raylib-5.5_win64_msvc16/include/raylib.h", "raylib header"),
    ("raylib-5.5_win64_msvc16/include/raymath.h", "raymath header"),
    ("raylib-5.5_win64_msvc16/include/rlgl.h", "rlgl header"),
    ("raylib-5.5_win64_msvc16/lib/raylib.lib", "static lib"),
    ("raylib-5.5_win64_msvc16/lib/raylibdll.lib", "import lib"),
    ("raylib-5.5_win64_msvc16/lib/raylib.dll", "dll"),
    ("raylib-5.5_win64_msvc16/README.md", "readme"),
];

/// Number of entries directly under `dir` (0 when it does not exist)
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

/// Number of regular files anywhere under `dir`
pub fn file_count(dir: &Path) -> usize {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}
