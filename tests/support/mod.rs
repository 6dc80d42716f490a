//! Minimal HTTP/1.1 server for exercising the real clients
//!
//! Serves canned responses by path prefix, one request per connection, and
//! records every request target it sees.

#![allow(dead_code)]

use image::{ImageFormat, Rgba, RgbaImage};
use moviedb_explorer::ApiConfig;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub const API_KEY: &str = "test-key-123";

#[derive(Clone)]
pub struct Route {
    prefix: String,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Route {
    pub fn json(prefix: &str, body: serde_json::Value) -> Self {
        Self {
            prefix: prefix.to_string(),
            status: 200,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn raw(prefix: &str, status: u16, content_type: &'static str, body: &[u8]) -> Self {
        Self {
            prefix: prefix.to_string(),
            status,
            content_type,
            body: body.to_vec(),
        }
    }

    pub fn png(prefix: &str, width: u32, height: u32) -> Self {
        Self::raw(prefix, 200, "image/png", &png_bytes(width, height))
    }
}

pub struct FakeServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake server");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = serve(stream, &routes, &seen);
            }
        });

        Self { base, requests }
    }

    /// `http://127.0.0.1:<port>`
    pub fn url(&self) -> &str {
        &self.base
    }

    /// Request targets (path and query) received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Config pointing both endpoints at this server
    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(API_KEY)
            .with_base_url(&format!("{}/3", self.base))
            .expect("base url")
            .with_image_base_url(&format!("{}/t/p/w200", self.base))
            .expect("image base url")
    }
}

fn serve(stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Drain headers; GET requests carry no body
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();
    seen.lock().expect("requests lock").push(target.clone());

    let route = routes.iter().find(|r| target.starts_with(&r.prefix));
    let (status, content_type, body) = match route {
        Some(r) => (r.status, r.content_type, r.body.as_slice()),
        None => (404, "text/plain", b"not found".as_slice()),
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        content_type,
        body.len()
    )?;
    stream.write_all(body)?;
    stream.flush()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// An address nothing listens on
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([30, 185, 84, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}
