// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated client for the board service REST API.
//!
//! Provides a high-level interface for:
//! - Sending requests with the API key and user token attached
//! - Connecting, with one interactive re-authorization on a 401
//! - Batched reads that fold many GETs into few round-trips

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::auth::{authorization_url, Authorizer};
use super::transport::{check_response, FilePart, HttpRequest, Method, Transport};
use crate::error::{Error, Result};

/// The batch endpoint accepts at most this many routes per call.
pub const BATCH_LIMIT: usize = 10;

/// Key of a successful sub-response in a batch result.
const BATCH_OK: &str = "200";

/// Client for the board service.
pub struct BoardClient<T: Transport = Box<dyn Transport>> {
    transport: T,
    base: Url,
    api_key: String,
    token: Option<String>,
}

impl<T: Transport> BoardClient<T> {
    pub fn new(transport: T, base_url: &str, api_key: &str, token: Option<String>) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(BoardClient {
            transport,
            base,
            api_key: api_key.to_string(),
            token,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Full URL for an endpoint, with parameters and credentials appended.
    pub fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(endpoint.trim_start_matches('/'))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("key", &self.api_key);
            if let Some(token) = &self.token {
                query.append_pair("token", token);
            }
        }
        Ok(url)
    }

    /// Send one request and return the parsed body.
    pub fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        file: Option<FilePart>,
    ) -> Result<Value> {
        let request = HttpRequest {
            method,
            url: self.url(endpoint, params)?,
            file,
        };
        debug!(%method, endpoint, transport = self.transport.name(), "request");
        let response = self.transport.execute(&request)?;
        debug!(%method, endpoint, status = response.status, "response");
        check_response(response)
    }

    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::Get, endpoint, params, None)
    }

    pub fn post(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::Post, endpoint, params, None)
    }

    pub fn put(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::Put, endpoint, params, None)
    }

    pub fn delete(&self, endpoint: &str) -> Result<Value> {
        self.send(Method::Delete, endpoint, &[], None)
    }

    /// Check the session can read the team's boards.
    ///
    /// A 401 runs the authorization flow once and retries. Returns false if
    /// the retry is refused too; other failures are errors.
    pub fn connect(
        &mut self,
        team_id: &str,
        app_name: &str,
        authorizer: &mut dyn Authorizer,
    ) -> Result<bool> {
        let route = format!("organizations/{}/boards", team_id);
        match self.get(&route, &[("fields", "id")]) {
            Ok(_) => return Ok(true),
            Err(Error::Unauthorized(body)) => {
                info!(team = team_id, reason = %body, "token rejected, requesting a new one");
            }
            Err(e) => return Err(e),
        }

        let url = authorization_url(&self.api_key, app_name)?;
        let token = authorizer.request_token(&url)?;
        authorizer.store_token(&token)?;
        self.set_token(token);

        match self.get(&route, &[("fields", "id")]) {
            Ok(_) => Ok(true),
            Err(Error::Unauthorized(body)) => {
                warn!(team = team_id, reason = %body, "new token rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch many GET routes in as few calls as the batch limit allows.
    ///
    /// The result has one entry per route, in order: the body of a
    /// successful sub-request, or `None` for one that failed.
    pub fn batch_get(&self, routes: &[String]) -> Result<Vec<Option<Value>>> {
        let mut results = Vec::with_capacity(routes.len());
        for chunk in routes.chunks(BATCH_LIMIT) {
            let urls = chunk.join(",");
            let body = self.get("batch", &[("urls", urls.as_str())])?;
            let entries = match body {
                Value::Array(entries) => entries,
                other => {
                    return Err(Error::UnexpectedResponse(format!(
                        "batch returned {}",
                        json_kind(&other)
                    )))
                }
            };
            if entries.len() != chunk.len() {
                return Err(Error::BatchMismatch {
                    expected: chunk.len(),
                    actual: entries.len(),
                });
            }
            results.extend(entries.into_iter().map(|mut entry| {
                entry
                    .as_object_mut()
                    .and_then(|o| o.remove(BATCH_OK))
            }));
        }
        Ok(results)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
