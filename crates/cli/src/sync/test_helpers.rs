// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.
//!
//! [`FakeBoardService`] is an in-memory board service behind the
//! [`Transport`] trait. It answers the endpoints the client uses, keeps a
//! log of every request, and checks the token on each one.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use url::Url;

use pb_core::TaskType;

use super::client::BoardClient;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::TemplateBoards;
use crate::error::Result;

pub const BASE_URL: &str = "https://boards.test/1/";
pub const TEAM: &str = "team1";
pub const TOKEN: &str = "good-token";

pub const PURPLE: &str = "purple";
pub const ORANGE: &str = "orange";

pub const STATUS_OPTIONS: [&str; 3] = ["In Progress", "Review Needed", "Done"];

#[derive(Debug, Clone)]
pub struct FakeBoard {
    pub id: String,
    pub name: String,
    pub closed: bool,
    pub background: String,
    pub custom_fields: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct FakeList {
    pub id: String,
    pub name: String,
    pub id_board: String,
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct FakeCard {
    pub id: String,
    pub name: String,
    pub id_list: String,
    pub id_board: String,
    pub desc: String,
    /// (custom field id, option id)
    pub items: Vec<(String, String)>,
    /// (attachment id, name)
    pub attachments: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRequest {
    pub method: Method,
    pub path: String,
    pub has_file: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    next_id: u64,
    token: String,
    boards: Vec<FakeBoard>,
    lists: Vec<FakeList>,
    cards: Vec<FakeCard>,
    requests: Vec<LoggedRequest>,
    list_bumps: Vec<String>,
    failing_routes: Vec<String>,
}

impl FakeState {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{:04}", prefix, self.next_id)
    }

    fn board(&self, id: &str) -> Option<&FakeBoard> {
        self.boards.iter().find(|b| b.id == id)
    }

    fn list_mut(&mut self, id: &str) -> Option<&mut FakeList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut FakeCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    fn board_json(board: &FakeBoard) -> Value {
        json!({
            "id": board.id,
            "name": board.name,
            "closed": board.closed,
            "prefs": { "background": board.background },
        })
    }

    fn list_json(list: &FakeList) -> Value {
        json!({
            "id": list.id,
            "name": list.name,
            "idBoard": list.id_board,
            "closed": list.closed,
        })
    }

    fn card_json(card: &FakeCard) -> Value {
        json!({
            "id": card.id,
            "name": card.name,
            "idList": card.id_list,
            "idBoard": card.id_board,
            "desc": card.desc,
            "url": format!("https://boards.test/c/{}", card.id),
            "customFieldItems": card.items.iter().enumerate().map(|(i, (field, option))| json!({
                "id": format!("item{}", i),
                "idCustomField": field,
                "idValue": option,
            })).collect::<Vec<_>>(),
            "attachments": card.attachments.iter().map(|(id, name)| json!({
                "id": id,
                "name": name,
                "url": format!("https://boards.test/a/{}", id),
            })).collect::<Vec<_>>(),
        })
    }

    fn open_lists(&self, board_id: &str) -> Vec<Value> {
        self.lists
            .iter()
            .filter(|l| l.id_board == board_id && !l.closed)
            .map(Self::list_json)
            .collect()
    }

    fn open_cards(&self, board_id: &str) -> Vec<Value> {
        let open: Vec<&str> = self
            .lists
            .iter()
            .filter(|l| l.id_board == board_id && !l.closed)
            .map(|l| l.id.as_str())
            .collect();
        self.cards
            .iter()
            .filter(|c| open.contains(&c.id_list.as_str()))
            .map(Self::card_json)
            .collect()
    }

    fn add_board(&mut self, name: &str, background: &str) -> String {
        let id = self.id("board");
        let custom_fields = vec![
            list_field(
                &format!("{}-type", id),
                "Type",
                &TaskType::ALL.map(|t| t.label()),
            ),
            list_field(&format!("{}-status", id), "Status", &STATUS_OPTIONS),
        ];
        self.boards.push(FakeBoard {
            id: id.clone(),
            name: name.to_string(),
            closed: false,
            background: background.to_string(),
            custom_fields,
        });
        id
    }

    fn add_list(&mut self, board_id: &str, name: &str) -> String {
        let id = self.id("list");
        self.lists.push(FakeList {
            id: id.clone(),
            name: name.to_string(),
            id_board: board_id.to_string(),
            closed: false,
        });
        id
    }

    fn add_card(&mut self, list_id: &str, name: &str) -> String {
        let id = self.id("card");
        let id_board = self
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .map(|l| l.id_board.clone())
            .unwrap_or_default();
        self.cards.push(FakeCard {
            id: id.clone(),
            name: name.to_string(),
            id_list: list_id.to_string(),
            id_board,
            desc: String::new(),
            items: Vec::new(),
            attachments: Vec::new(),
        });
        id
    }

    /// Answer one GET, as issued directly or from inside a batch.
    fn get(&self, segments: &[&str], query: &HashMap<String, String>) -> Option<Value> {
        match segments {
            ["organizations", _, "boards"] => Some(Value::Array(
                self.boards.iter().map(Self::board_json).collect(),
            )),
            ["board", id, "lists", "open"] => {
                self.board(id)?;
                Some(Value::Array(self.open_lists(id)))
            }
            ["boards", id, "customFields"] => {
                Some(Value::Array(self.board(id)?.custom_fields.clone()))
            }
            ["board", id, "cards", "open"] | ["boards", id, "cards", "open"] => {
                self.board(id)?;
                Some(Value::Array(self.open_cards(id)))
            }
            ["boards", id] => {
                let board = self.board(id)?;
                let mut body = Self::board_json(board);
                if query.get("lists").map(String::as_str) == Some("open") {
                    body["lists"] = Value::Array(self.open_lists(id));
                }
                if query.get("customFields").map(String::as_str) == Some("true") {
                    body["customFields"] = Value::Array(board.custom_fields.clone());
                }
                Some(body)
            }
            ["cards", id] => self
                .cards
                .iter()
                .find(|c| c.id == *id)
                .map(Self::card_json),
            _ => None,
        }
    }

    fn batch(&self, urls: &str) -> Value {
        let base = Url::parse(BASE_URL).unwrap();
        let entries = urls
            .split(',')
            .map(|route| {
                if self.failing_routes.iter().any(|r| r == route) {
                    return json!({ "500": "internal error" });
                }
                let url = base.join(route.trim_start_matches('/')).unwrap();
                let (segments, query) = split_url(&url);
                let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
                match self.get(&segments, &query) {
                    Some(body) => json!({ "200": body }),
                    None => json!({ "404": "not found" }),
                }
            })
            .collect();
        Value::Array(entries)
    }

    fn handle(&mut self, request: &HttpRequest) -> (u16, Value) {
        let (segments, query) = split_url(&request.url);
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let param = |key: &str| query.get(key).cloned().unwrap_or_default();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["batch"]) => (200, self.batch(&param("urls"))),
            (Method::Get, segs) => match self.get(segs, &query) {
                Some(body) => (200, body),
                None => (404, json!("not found")),
            },
            (Method::Post, ["boards"]) => {
                let Some(template) = self.board(&param("idBoardSource")).cloned() else {
                    return (400, json!("invalid idBoardSource"));
                };
                let id = self.add_board(&param("name"), &template.background);
                let lists: Vec<String> = self
                    .lists
                    .iter()
                    .filter(|l| l.id_board == template.id && !l.closed)
                    .map(|l| l.name.clone())
                    .collect();
                for name in lists {
                    self.add_list(&id, &name);
                }
                (200, json!({ "id": id, "name": param("name") }))
            }
            (Method::Put, ["lists", id, "closed"]) => match self.list_mut(id) {
                Some(list) => {
                    list.closed = param("value") == "true";
                    (200, Self::list_json(list))
                }
                None => (404, json!("not found")),
            },
            (Method::Post, ["lists"]) => {
                let board_id = param("idBoard");
                if self.board(&board_id).is_none() {
                    return (400, json!("invalid idBoard"));
                }
                let id = self.add_list(&board_id, &param("name"));
                let list = self.lists.iter().find(|l| l.id == id).unwrap();
                (200, Self::list_json(list))
            }
            (Method::Put, ["lists", id]) => {
                let id = id.to_string();
                if self.list_mut(&id).is_none() {
                    return (404, json!("not found"));
                }
                self.list_bumps.push(id);
                (200, json!({}))
            }
            (Method::Post, ["cards"]) => {
                let id = self.add_card(&param("idList"), &param("name"));
                (200, json!({ "id": id }))
            }
            (Method::Put, ["cards", id]) => match self.card_mut(id) {
                Some(card) => {
                    if let Some(desc) = query.get("desc") {
                        card.desc = desc.clone();
                    }
                    (200, Self::card_json(card))
                }
                None => (404, json!("not found")),
            },
            (Method::Post, ["cards", id, "attachments"]) => {
                let attachment_id = self.id("att");
                let name = match &request.file {
                    Some(file) => file.file_name.clone(),
                    None => param("name"),
                };
                match self.card_mut(id) {
                    Some(card) => {
                        card.attachments.push((attachment_id.clone(), name.clone()));
                        (200, json!({ "id": attachment_id, "name": name }))
                    }
                    None => (404, json!("not found")),
                }
            }
            (Method::Put, ["cards", id, "attachments", aid]) => match self.card_mut(id) {
                Some(card) => match card.attachments.iter_mut().find(|(a, _)| a.as_str() == *aid) {
                    Some(attachment) => {
                        attachment.1 = param("name");
                        (200, json!({}))
                    }
                    None => (404, json!("not found")),
                },
                None => (404, json!("not found")),
            },
            (Method::Delete, ["cards", id, "attachments", aid]) => match self.card_mut(id) {
                Some(card) => {
                    card.attachments.retain(|(a, _)| a.as_str() != *aid);
                    (200, json!({}))
                }
                None => (404, json!("not found")),
            },
            (Method::Put, ["card", id, "customField", field, "item"]) => {
                let field = field.to_string();
                match self.card_mut(id) {
                    Some(card) => {
                        card.items.retain(|(f, _)| *f != field);
                        card.items.push((field, param("idValue")));
                        (200, json!({}))
                    }
                    None => (404, json!("not found")),
                }
            }
            _ => (404, json!("unknown route")),
        }
    }
}

fn list_field(id: &str, name: &str, options: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "list",
        "options": options.iter().map(|text| json!({
            "id": format!("{}-{}", id, text.to_lowercase().replace(' ', "-")),
            "value": { "text": text },
        })).collect::<Vec<_>>(),
    })
}

/// Path segments below the API root, and the decoded query.
fn split_url(url: &Url) -> (Vec<String>, HashMap<String, String>) {
    let segments = url
        .path_segments()
        .map(|s| {
            s.skip(1)
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let query = url.query_pairs().into_owned().collect();
    (segments, query)
}

/// In-memory board service. Clones share state.
#[derive(Clone, Default)]
pub struct FakeBoardService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBoardService {
    pub fn new() -> Self {
        let fake = FakeBoardService::default();
        fake.state.lock().unwrap().token = TOKEN.to_string();
        fake
    }

    /// A service holding the two template boards, each with one list.
    pub fn with_templates() -> (Self, TemplateBoards) {
        let fake = FakeBoardService::new();
        let assets = fake.add_board("Template - Assets", PURPLE);
        fake.add_list(&assets, "Example Asset");
        let shots = fake.add_board("Template - Shots", ORANGE);
        fake.add_list(&shots, "Example Shot");
        (fake, TemplateBoards { assets, shots })
    }

    pub fn client(&self) -> BoardClient<FakeBoardService> {
        BoardClient::new(self.clone(), BASE_URL, "key", Some(TOKEN.to_string())).unwrap()
    }

    /// Change which token the service accepts.
    pub fn set_token(&self, token: &str) {
        self.state.lock().unwrap().token = token.to_string();
    }

    pub fn add_board(&self, name: &str, background: &str) -> String {
        self.state.lock().unwrap().add_board(name, background)
    }

    pub fn add_list(&self, board_id: &str, name: &str) -> String {
        self.state.lock().unwrap().add_list(board_id, name)
    }

    /// Add a card, optionally with its Type field set.
    pub fn add_card(&self, list_id: &str, name: &str, task_type: Option<TaskType>) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.add_card(list_id, name);
        if let Some(task_type) = task_type {
            let card = state.card_mut(&id).unwrap();
            let field = format!("{}-type", card.id_board);
            let option = format!("{}-{}", field, task_type.label().to_lowercase());
            card.items.push((field, option));
        }
        id
    }

    pub fn add_attachment(&self, card_id: &str, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.id("att");
        state
            .card_mut(card_id)
            .unwrap()
            .attachments
            .push((id.clone(), name.to_string()));
        id
    }

    pub fn set_desc(&self, card_id: &str, desc: &str) {
        self.state.lock().unwrap().card_mut(card_id).unwrap().desc = desc.to_string();
    }

    /// Drop a board's custom field definitions.
    pub fn clear_custom_fields(&self, board_id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(board) = state.boards.iter_mut().find(|b| b.id == board_id) {
            board.custom_fields.clear();
        }
    }

    /// Answer this route with an error whenever it appears in a batch.
    pub fn fail_batched_route(&self, route: &str) {
        self.state.lock().unwrap().failing_routes.push(route.to_string());
    }

    pub fn close_board(&self, board_id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(board) = state.boards.iter_mut().find(|b| b.id == board_id) {
            board.closed = true;
        }
    }

    pub fn remove_card(&self, card_id: &str) {
        self.state.lock().unwrap().cards.retain(|c| c.id != card_id);
    }

    pub fn boards(&self) -> Vec<FakeBoard> {
        self.state.lock().unwrap().boards.clone()
    }

    pub fn board_named(&self, name: &str) -> Option<FakeBoard> {
        self.boards().into_iter().find(|b| b.name == name)
    }

    /// Lists on a board, closed ones included.
    pub fn lists(&self, board_id: &str) -> Vec<FakeList> {
        self.state
            .lock()
            .unwrap()
            .lists
            .iter()
            .filter(|l| l.id_board == board_id)
            .cloned()
            .collect()
    }

    pub fn open_list_names(&self, board_id: &str) -> Vec<String> {
        self.lists(board_id)
            .into_iter()
            .filter(|l| !l.closed)
            .map(|l| l.name)
            .collect()
    }

    pub fn cards(&self) -> Vec<FakeCard> {
        self.state.lock().unwrap().cards.clone()
    }

    pub fn card(&self, card_id: &str) -> Option<FakeCard> {
        self.cards().into_iter().find(|c| c.id == card_id)
    }

    pub fn attachment_names(&self, card_id: &str) -> Vec<String> {
        self.card(card_id)
            .map(|c| c.attachments.into_iter().map(|(_, name)| name).collect())
            .unwrap_or_default()
    }

    pub fn list_bumps(&self) -> Vec<String> {
        self.state.lock().unwrap().list_bumps.clone()
    }

    pub fn requests(&self) -> Vec<LoggedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of logged requests with this method and first path segment.
    pub fn count(&self, method: Method, resource: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path.split('/').next() == Some(resource))
            .count()
    }

    /// Number of logged mutations (anything but GET).
    pub fn mutations(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method != Method::Get)
            .count()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }
}

impl Transport for FakeBoardService {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        let (segments, query) = split_url(&request.url);
        state.requests.push(LoggedRequest {
            method: request.method,
            path: segments.join("/"),
            has_file: request.file.is_some(),
        });

        if query.get("token") != Some(&state.token) {
            return Ok(HttpResponse {
                status: 401,
                body: "invalid token".to_string(),
            });
        }

        let (status, body) = state.handle(request);
        let body = match body {
            Value::String(text) if status != 200 => text,
            other => other.to_string(),
        };
        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
