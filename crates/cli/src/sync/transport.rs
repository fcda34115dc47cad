// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for board service requests.
//!
//! Provides a trait-based transport layer that enables:
//! - Direct HTTPS requests through a TLS 1.2 client
//! - A curl subprocess fallback for hosts whose TLS stack is too old
//! - In-memory fakes for unit testing
//!
//! Both real transports return the raw status and body; turning those into
//! results happens once, in [`check_response`].

use std::fmt;
use std::fs;
use std::process::Command;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::ACCEPT;
use tracing::{debug, warn};
use url::Url;

use crate::config::TransportMode;
use crate::error::{Error, Result};

const JSON: &str = "application/json";

/// HTTP verbs the board service API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A file sent as the `file` field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A fully prepared request: credentials are already in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub file: Option<FilePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Transport trait for board service requests.
///
/// Implementations only move bytes; status codes are interpreted by
/// [`check_response`].
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Map a raw response onto the service error taxonomy.
///
/// 200 parses the body as JSON. 401 and 404 get their own variants so
/// callers can re-authorize or re-resolve; everything else is a plain HTTP
/// error carrying the body.
pub fn check_response(response: HttpResponse) -> Result<serde_json::Value> {
    match response.status {
        200 => {
            if response.body.trim().is_empty() {
                return Ok(serde_json::Value::Null);
            }
            Ok(serde_json::from_str(&response.body)?)
        }
        401 => Err(Error::Unauthorized(response.body)),
        404 => Err(Error::NotFound(response.body)),
        status => Err(Error::Http {
            status,
            body: response.body,
        }),
    }
}

/// Direct HTTPS transport using a blocking reqwest client.
pub struct DirectTransport {
    client: reqwest::blocking::Client,
}

impl DirectTransport {
    /// Build a client that refuses anything older than TLS 1.2.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(DirectTransport { client })
    }
}

impl Transport for DirectTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .header(ACCEPT, JSON);
        if let Some(file) = &request.file {
            let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            builder = builder.multipart(Form::new().part("file", part));
        }

        let response = builder
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// Subprocess transport that shells out to curl.
///
/// curl only uploads files from disk, so a file payload is written to a
/// temporary directory first. The body goes to a temporary file and the
/// status code is read from curl's stdout.
pub struct CurlTransport {
    binary: String,
}

impl CurlTransport {
    pub fn new(binary: impl Into<String>) -> Self {
        CurlTransport {
            binary: binary.into(),
        }
    }

    /// Arguments for one request, given where the body and upload live.
    pub fn args(request: &HttpRequest, output: &str, upload: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "-s".to_string(),
            "-o".to_string(),
            output.to_string(),
            "-w".to_string(),
            "%{http_code}".to_string(),
            "--header".to_string(),
            format!("Accept: {}", JSON),
            "--request".to_string(),
            request.method.as_str().to_string(),
        ];
        if let Some(path) = upload {
            args.push("--form".to_string());
            args.push(format!("file=@{}", path));
        }
        args.push("--url".to_string());
        args.push(request.url.to_string());
        args
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let scratch = tempfile::tempdir()?;
        let output_path = scratch.path().join("response");
        let upload_path = match &request.file {
            Some(file) => {
                let path = scratch.path().join(&file.file_name);
                fs::write(&path, &file.bytes)?;
                Some(path)
            }
            None => None,
        };

        let output_arg = output_path.to_string_lossy().into_owned();
        let upload_arg = upload_path.as_ref().map(|p| p.to_string_lossy().into_owned());
        let args = Self::args(request, &output_arg, upload_arg.as_deref());

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| Error::Transport(format!("failed to run '{}': {}", self.binary, e)))?;
        if !output.status.success() {
            return Err(Error::Transport(format!(
                "'{}' exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let code = String::from_utf8_lossy(&output.stdout);
        let status = code.trim().parse::<u16>().map_err(|_| {
            Error::Transport(format!("'{}' printed no status code: {}", self.binary, code))
        })?;
        let body = match fs::read_to_string(&output_path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "curl"
    }
}

/// Pick the transport once, at startup.
pub fn select_transport(mode: TransportMode, curl: &str) -> Result<Box<dyn Transport>> {
    let transport: Box<dyn Transport> = match mode {
        TransportMode::Direct => Box::new(DirectTransport::new()?),
        TransportMode::Curl => Box::new(CurlTransport::new(curl)),
        TransportMode::Auto => match DirectTransport::new() {
            Ok(direct) => Box::new(direct),
            Err(e) => {
                warn!(error = %e, "no TLS 1.2 client available, falling back to curl");
                Box::new(CurlTransport::new(curl))
            }
        },
    };
    debug!(transport = transport.name(), "selected transport");
    Ok(transport)
}
