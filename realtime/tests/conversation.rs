// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Facade tests against a recording mock transport.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use http::StatusCode;
use leancloud_realtime::hash::hex_md5;
use leancloud_realtime::{
    Args, Config, Context, Conversation, ErrorKind, HttpSend, MessageQuery, NewConversation,
    ObjectStore, RealtimeApi, Response, RestObjectStore, Result,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

const CONVID: &str = "58dcd5c31b69e60062aee271";

/// Replies with queued responses in order and records every request.
#[derive(Debug, Clone, Default)]
struct MockHttpSend {
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn reply(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back((status, body.into()));
        self
    }

    fn requests(&self) -> Vec<http::Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");

        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))
            .unwrap())
    }
}

fn init_api(mock: &MockHttpSend) -> RealtimeApi {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_http_send(mock.clone());
    let config = Config {
        app_id: Some("app_id".to_string()),
        app_key: Some("app_key".to_string()),
        master_key: Some("master_key".to_string()),
        ..Default::default()
    };
    RealtimeApi::new(ctx, &config)
        .unwrap()
        .with_time(Utc.timestamp_millis_opt(1490950859958).unwrap())
}

fn query_pairs(req: &http::Request<Bytes>) -> HashMap<String, String> {
    let query = req.uri().query().unwrap_or_default();
    form_pairs(query)
}

fn form_pairs(s: &str) -> HashMap<String, String> {
    s.split('&')
        .filter(|kv| !kv.is_empty())
        .map(|kv| {
            let (k, v) = kv.split_once('=').unwrap_or((kv, ""));
            (k.to_string(), v.to_string())
        })
        .collect()
}

fn json_body(req: &http::Request<Bytes>) -> Value {
    serde_json::from_slice(req.body()).unwrap()
}

#[tokio::test]
async fn test_delete_message() -> Result<()> {
    let mock = MockHttpSend::default().reply(StatusCode::OK, "{}");
    let api = init_api(&mock);

    let resp = api
        .delete_message(
            Args::new()
                .kwarg("convid", "C1")
                .kwarg("msgid", "M1")
                .kwarg("timestamp", "1490950859958"),
        )
        .await?;
    assert_eq!(resp, Response::Empty);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method(), http::Method::DELETE);
    assert_eq!(
        reqs[0].uri().to_string(),
        "https://api.leancloud.cn/1.1/rtm/messages/logs?convid=C1&msgid=M1&timestamp=1490950859958"
    );
    assert_eq!(reqs[0].headers()["x-lc-key"], "master_key,master");
    Ok(())
}

#[tokio::test]
async fn test_query_message_signs_for_peer() -> Result<()> {
    let mock = MockHttpSend::default().reply(StatusCode::OK, r#"[{"msg-id":"a"}]"#);
    let api = init_api(&mock);
    let store = StaticObjectStore::with(CONVID);
    let conv = Conversation::open(&api, &store, CONVID).await?;

    let resp = conv
        .query_message(MessageQuery {
            peerid: Some("p1".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(resp, Response::List(vec![json!({"msg-id": "a"})]));

    let req = mock.requests().remove(0);
    assert_eq!(req.uri().path(), "/1.1/rtm/messages/history");
    let query = query_pairs(&req);
    assert_eq!(query["convid"], CONVID);
    assert_eq!(query["limit"], "20");
    assert_eq!(query["reversed"], "false");
    assert_eq!(query["peerid"], "p1");
    assert_eq!(query["signature_ts"], "1490950859958");
    assert_eq!(query["nonce"], "1490950859958");
    assert!(!query["signature"].is_empty());
    assert_eq!(
        query["signature"],
        hex_md5(format!("app_id:p1:{CONVID}:1490950859958:1490950859958").as_bytes())
    );
    Ok(())
}

#[tokio::test]
async fn test_query_message_keeps_given_nonce() -> Result<()> {
    let mock = MockHttpSend::default().reply(StatusCode::OK, "[]");
    let api = init_api(&mock);
    let store = StaticObjectStore::with(CONVID);
    let conv = Conversation::open(&api, &store, CONVID).await?;

    conv.query_message(MessageQuery {
        peerid: Some("p1".to_string()),
        nonce: Some("n".to_string()),
        signature_ts: Some("1".to_string()),
        ..Default::default()
    })
    .await?;

    let query = query_pairs(&mock.requests()[0]);
    assert_eq!(query["nonce"], "n");
    assert_eq!(query["signature_ts"], "1");
    assert_eq!(
        query["signature"],
        hex_md5(format!("app_id:p1:{CONVID}:n:1").as_bytes())
    );
    Ok(())
}

#[tokio::test]
async fn test_query_message_without_peer_is_unsigned() -> Result<()> {
    let mock = MockHttpSend::default().reply(StatusCode::OK, "[]");
    let api = init_api(&mock);
    let store = StaticObjectStore::with(CONVID);
    let conv = Conversation::open(&api, &store, CONVID).await?;

    conv.query_message(MessageQuery {
        limit: 5,
        max_ts: Some("1490945250921".to_string()),
        msgid: Some("xU9TvbeBQGuaP2KFm3Y9Tg".to_string()),
        ..Default::default()
    })
    .await?;

    let req = mock.requests().remove(0);
    assert_eq!(
        req.uri().query(),
        Some(
            "convid=58dcd5c31b69e60062aee271&max_ts=1490945250921&msgid=xU9TvbeBQGuaP2KFm3Y9Tg&limit=5&reversed=false"
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_query_message_by_from_uses_signed_header() -> Result<()> {
    let mock = MockHttpSend::default().reply(StatusCode::OK, "[]");
    let api = init_api(&mock);

    api.query_message_by_from(
        Args::new()
            .kwarg("from", "nsHaS37yQWOKXVjG3qAAcQ")
            .kwarg("aaa", "bbb"),
    )
    .await?;

    let req = mock.requests().remove(0);
    assert_eq!(req.uri().query(), Some("from=nsHaS37yQWOKXVjG3qAAcQ"));
    assert!(req.headers().get("x-lc-key").is_none());
    assert_eq!(
        req.headers()["x-lc-sign"],
        format!(
            "{},1490950859958,master",
            hex_md5(b"1490950859958master_key")
        )
        .as_str()
    );
    Ok(())
}

#[tokio::test]
async fn test_create_conversation() -> Result<()> {
    let mock = MockHttpSend::default().reply(
        StatusCode::CREATED,
        r#"{"objectId":"5a5d7432bc0ff3a3d9b9f38a","createdAt":"2018-01-16T03:40:32.814Z"}"#,
    );
    let api = init_api(&mock);
    let store = StaticObjectStore::default();

    let conv = Conversation::init(
        &api,
        &store,
        None,
        NewConversation {
            name: Some("SDK_TEST".to_string()),
            members: Some(vec!["BillGates".to_string(), "SteveJobs".to_string()]),
            muted: None,
        },
    )
    .await?;
    assert_eq!(conv.id(), "5a5d7432bc0ff3a3d9b9f38a");

    let req = mock.requests().remove(0);
    assert_eq!(req.method(), http::Method::POST);
    assert_eq!(req.uri().to_string(), "https://api.leancloud.cn/1.1/classes/_Conversation");
    assert_eq!(req.headers()["x-lc-key"], "app_key");
    assert_eq!(
        json_body(&req),
        json!({"name": "SDK_TEST", "m": ["BillGates", "SteveJobs"]})
    );
    Ok(())
}

#[tokio::test]
async fn test_create_conversation_without_object_id() {
    let mock = MockHttpSend::default().reply(StatusCode::CREATED, "{}");
    let api = init_api(&mock);

    let err = Conversation::create(&api, NewConversation::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Client);
}

#[tokio::test]
async fn test_manage_members() -> Result<()> {
    let mock = MockHttpSend::default()
        .reply(StatusCode::OK, r#"{"updatedAt":"2017-04-01T00:00:00.000Z"}"#)
        .reply(StatusCode::OK, r#"{"updatedAt":"2017-04-01T00:00:01.000Z"}"#);
    let api = init_api(&mock);
    let store = StaticObjectStore::with(CONVID);
    let conv = Conversation::open(&api, &store, CONVID).await?;

    conv.add_members(["123", "234", "345", "456"]).await?;
    conv.remove_members(vec!["456".to_string()]).await?;

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 2);
    for req in &reqs {
        assert_eq!(req.method(), http::Method::PUT);
        assert_eq!(
            req.uri().to_string(),
            format!("https://api.leancloud.cn/1.1/classes/_Conversation/{CONVID}")
        );
    }
    assert_eq!(
        json_body(&reqs[0]),
        json!({"m": {"__op": "AddUnique", "objects": ["123", "234", "345", "456"]}})
    );
    assert_eq!(
        json_body(&reqs[1]),
        json!({"m": {"__op": "Remove", "objects": ["456"]}})
    );
    Ok(())
}

#[tokio::test]
async fn test_open_missing_conversation() {
    let mock = MockHttpSend::default();
    let api = init_api(&mock);
    let store = StaticObjectStore::default();

    let err = Conversation::open(&api, &store, "missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), Some("404"));
    assert_eq!(err.to_string(), "(404) Conversation not found");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_rest_object_store() -> Result<()> {
    let mock = MockHttpSend::default()
        .reply(StatusCode::OK, r#"{"objectId":"a","name":"SDK_TEST"}"#)
        .reply(StatusCode::OK, "{}")
        .reply(
            StatusCode::NOT_FOUND,
            r#"{"code":101,"error":"Object not found."}"#,
        )
        .reply(
            StatusCode::BAD_REQUEST,
            r#"{"code":101,"error":"Class or object doesn't exists."}"#,
        )
        .reply(
            StatusCode::UNAUTHORIZED,
            r#"{"code":401,"error":"Unauthorized."}"#,
        );
    let store = RestObjectStore::new(init_api(&mock));

    let obj = store.get("_Conversation", "a").await?;
    assert_eq!(obj, json!({"objectId": "a", "name": "SDK_TEST"}));

    for _ in 0..3 {
        let err = store.get("_Conversation", "b").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    let err = store.get("_Conversation", "c").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.code(), Some("401"));

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 5);
    assert_eq!(
        reqs[0].uri().to_string(),
        "https://api.leancloud.cn/1.1/classes/_Conversation/a"
    );
    assert_eq!(reqs[0].headers()["x-lc-key"], "app_key");
    Ok(())
}

#[tokio::test]
async fn test_open_with_rest_object_store() -> Result<()> {
    let mock = MockHttpSend::default()
        .reply(StatusCode::OK, format!(r#"{{"objectId":"{CONVID}"}}"#))
        .reply(StatusCode::OK, "{}");
    let api = init_api(&mock);
    let store = RestObjectStore::new(api.clone());

    let conv = Conversation::init(&api, &store, Some(CONVID), NewConversation::default()).await?;
    assert_eq!(conv.id(), CONVID);

    let err = Conversation::open(&api, &store, "missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn test_open_does_not_leave_conversation_class() {
    let mock = MockHttpSend::default().reply(
        StatusCode::NOT_FOUND,
        r#"{"code":101,"error":"Object not found."}"#,
    );
    let api = init_api(&mock);
    let store = RestObjectStore::new(api.clone());

    let err = Conversation::open(&api, &store, "../_User/u1")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0].uri().path(),
        "/1.1/classes/_Conversation/..%2F_User%2Fu1"
    );
}

#[tokio::test]
async fn test_rate_limited() {
    let mock = MockHttpSend::default().reply(
        StatusCode::FORBIDDEN,
        r#"{"code":"430","error":"too fast"}"#,
    );
    let api = init_api(&mock);

    let err = api
        .send_message(Args::new().json_body(json!({"from_peer": "a", "message": "hi"})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn test_client_kick_and_update_message() -> Result<()> {
    let mock = MockHttpSend::default()
        .reply(StatusCode::OK, "{}")
        .reply(StatusCode::OK, "{}");
    let api = init_api(&mock);

    api.client_kick(Args::new().json_body(json!({"client_id": "p1", "reason": "bye"})))
        .await?;
    api.update_message(Args::new().json_body(json!({"msg_id": "M1", "message": "edited"})))
        .await?;

    let reqs = mock.requests();
    assert_eq!(reqs[0].uri().path(), "/1.1/rtm/client/kick");
    assert_eq!(reqs[0].headers()["x-lc-key"], "app_key");
    assert_eq!(reqs[1].method(), http::Method::PUT);
    assert_eq!(reqs[1].headers()["x-lc-key"], "master_key,master");
    Ok(())
}

/// Object store that knows a fixed set of conversation ids.
#[derive(Debug, Default)]
struct StaticObjectStore {
    ids: Vec<String>,
}

impl StaticObjectStore {
    fn with(id: &str) -> Self {
        Self {
            ids: vec![id.to_string()],
        }
    }
}

#[async_trait]
impl ObjectStore for StaticObjectStore {
    async fn get(&self, class_name: &str, object_id: &str) -> Result<Value> {
        if self.ids.iter().any(|v| v == object_id) {
            Ok(json!({"objectId": object_id}))
        } else {
            Err(leancloud_realtime::Error::not_found(format!(
                "{class_name} {object_id} does not exist"
            )))
        }
    }
}
