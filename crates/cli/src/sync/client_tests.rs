// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the board client.

#![allow(clippy::unwrap_used)]

use super::auth::Authorizer;
use super::client::{BoardClient, BATCH_LIMIT};
use super::test_helpers::{FakeBoardService, BASE_URL, PURPLE, TEAM, TOKEN};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{Error, Result};
use serde_json::json;
use url::Url;

/// Hands out a fixed token and remembers what it was asked.
struct FixedAuthorizer {
    token: String,
    requested: Vec<Url>,
    stored: Vec<String>,
}

impl FixedAuthorizer {
    fn new(token: &str) -> Self {
        FixedAuthorizer {
            token: token.to_string(),
            requested: Vec::new(),
            stored: Vec::new(),
        }
    }
}

impl Authorizer for FixedAuthorizer {
    fn request_token(&mut self, url: &Url) -> Result<String> {
        self.requested.push(url.clone());
        Ok(self.token.clone())
    }

    fn store_token(&mut self, token: &str) -> Result<()> {
        self.stored.push(token.to_string());
        Ok(())
    }
}

/// Answers every request with the same canned response.
struct CannedTransport {
    status: u16,
    body: String,
}

impl Transport for CannedTransport {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

fn canned(body: serde_json::Value) -> BoardClient<CannedTransport> {
    let transport = CannedTransport {
        status: 200,
        body: body.to_string(),
    };
    BoardClient::new(transport, BASE_URL, "key", Some(TOKEN.to_string())).unwrap()
}

#[test]
fn url_appends_params_then_credentials() {
    let client = FakeBoardService::new().client();
    let url = client
        .url("/boards/b1", &[("lists", "open"), ("customFields", "true")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://boards.test/1/boards/b1?lists=open&customFields=true&key=key&token=good-token"
    );
}

#[test]
fn url_without_token_only_carries_key() {
    let client = BoardClient::new(FakeBoardService::new(), BASE_URL, "key", None).unwrap();
    let url = client.url("members/me", &[]).unwrap();
    assert_eq!(url.as_str(), "https://boards.test/1/members/me?key=key");
}

#[test]
fn base_url_without_trailing_slash_keeps_its_path() {
    let client =
        BoardClient::new(FakeBoardService::new(), "https://boards.test/1", "key", None).unwrap();
    let url = client.url("cards/c1", &[]).unwrap();
    assert_eq!(url.path(), "/1/cards/c1");
}

#[test]
fn params_are_percent_encoded() {
    let client = FakeBoardService::new().client();
    let url = client
        .url("cards/c1", &[("desc", "###v0001 by me\nnotes & more")])
        .unwrap();
    let desc = url
        .query_pairs()
        .find(|(k, _)| k == "desc")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert_eq!(desc, "###v0001 by me\nnotes & more");
}

#[test]
fn empty_batch_issues_no_request() {
    let fake = FakeBoardService::new();
    let client = fake.client();

    let results = client.batch_get(&[]).unwrap();

    assert!(results.is_empty());
    assert!(fake.requests().is_empty());
}

#[test]
fn batch_splits_into_chunks_and_keeps_order() {
    let fake = FakeBoardService::new();
    let board = fake.add_board("Props", PURPLE);
    let client = fake.client();

    let mut routes: Vec<String> = (0..BATCH_LIMIT * 2)
        .map(|i| format!("/boards/missing{}/customFields", i))
        .collect();
    routes.push(format!("/boards/{}/customFields", board));

    let results = client.batch_get(&routes).unwrap();

    assert_eq!(results.len(), routes.len());
    assert!(results[..BATCH_LIMIT * 2].iter().all(Option::is_none));
    let fields = results.last().unwrap().as_ref().unwrap();
    assert_eq!(fields.as_array().unwrap().len(), 2);
    assert_eq!(fake.count(Method::Get, "batch"), 3);
}

#[test]
fn batch_length_mismatch_is_an_error() {
    let client = canned(json!([{ "200": [] }]));
    let routes = vec!["/a".to_string(), "/b".to_string()];

    let err = client.batch_get(&routes).unwrap_err();
    assert!(matches!(
        err,
        Error::BatchMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn batch_non_array_is_unexpected() {
    let client = canned(json!({ "message": "nope" }));
    let err = client.batch_get(&["/a".to_string()]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(_)));
}

#[test]
fn connect_with_valid_token_skips_authorization() {
    let fake = FakeBoardService::new();
    let mut client = fake.client();
    let mut authorizer = FixedAuthorizer::new("unused");

    assert!(client.connect(TEAM, "pipeboard", &mut authorizer).unwrap());
    assert!(authorizer.requested.is_empty());
    assert_eq!(fake.requests().len(), 1);
}

#[test]
fn connect_reauthorizes_once_and_retries() {
    let fake = FakeBoardService::new();
    fake.set_token("fresh");
    let mut client = fake.client();
    let mut authorizer = FixedAuthorizer::new("fresh");

    assert!(client.connect(TEAM, "pipeboard", &mut authorizer).unwrap());

    assert_eq!(authorizer.requested.len(), 1);
    let url = &authorizer.requested[0];
    assert!(url.query_pairs().any(|(k, v)| k == "key" && v == "key"));
    assert!(url.query_pairs().any(|(k, v)| k == "expiration" && v == "never"));
    assert_eq!(authorizer.stored, vec!["fresh".to_string()]);
    assert_eq!(fake.requests().len(), 2);

    // The new token sticks for later requests.
    client.get("organizations/team1/boards", &[]).unwrap();
}

#[test]
fn connect_reports_failure_when_retry_is_refused() {
    let fake = FakeBoardService::new();
    fake.set_token("something-else");
    let mut client = fake.client();
    let mut authorizer = FixedAuthorizer::new("still-wrong");

    assert!(!client.connect(TEAM, "pipeboard", &mut authorizer).unwrap());
    assert_eq!(authorizer.requested.len(), 1);
    assert_eq!(fake.requests().len(), 2);
}

#[test]
fn connect_propagates_other_errors() {
    let transport = CannedTransport {
        status: 500,
        body: "down".to_string(),
    };
    let mut client = BoardClient::new(transport, BASE_URL, "key", None).unwrap();
    let mut authorizer = FixedAuthorizer::new("unused");

    let err = client.connect(TEAM, "pipeboard", &mut authorizer).unwrap_err();
    assert!(matches!(err, Error::Http { status: 500, .. }));
    assert!(authorizer.requested.is_empty());
}
