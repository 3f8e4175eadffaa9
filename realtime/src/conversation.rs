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

use crate::{ObjectStore, RealtimeApi};
use leancloud_realtime_core::sign::message_signature;
use leancloud_realtime_core::time::format_timestamp_millis;
use leancloud_realtime_core::{Args, Error, ErrorKind, Response, Result};
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

const CONVERSATION_CLASS: &str = "_Conversation";

/// Attributes of a conversation to create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewConversation {
    /// Conversation name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Client ids of the members.
    #[serde(rename = "m", skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    /// Client ids of the members that muted this conversation.
    #[serde(rename = "mu", skip_serializing_if = "Option::is_none")]
    pub muted: Option<Vec<String>>,
}

/// Options of a history query.
///
/// When `peerid` is set the query is signed for that viewer: `signature_ts`
/// defaults to now in milliseconds and `nonce` defaults to `signature_ts`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageQuery {
    /// Only return messages strictly older than this timestamp.
    pub max_ts: Option<String>,
    /// Message to start from, used together with `max_ts`.
    pub msgid: Option<String>,
    /// Max number of messages, 20 by default.
    pub limit: u32,
    /// Return messages in reversed order.
    pub reversed: bool,
    /// Viewer client id.
    pub peerid: Option<String>,
    /// Signature nonce.
    pub nonce: Option<String>,
    /// Signature timestamp in milliseconds.
    pub signature_ts: Option<String>,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            max_ts: None,
            msgid: None,
            limit: 20,
            reversed: false,
            peerid: None,
            nonce: None,
            signature_ts: None,
        }
    }
}

/// Conversation is a handle on one conversation of the realtime service.
#[derive(Debug, Clone)]
pub struct Conversation {
    api: RealtimeApi,
    id: String,
}

impl Conversation {
    /// Open the existing conversation `id` or create a new one.
    ///
    /// An existing id is checked against `store` first. `new` is only used
    /// when `id` is `None`.
    pub async fn init(
        api: &RealtimeApi,
        store: &dyn ObjectStore,
        id: Option<&str>,
        new: NewConversation,
    ) -> Result<Self> {
        match id {
            Some(id) => Self::open(api, store, id).await,
            None => Self::create(api, new).await,
        }
    }

    /// Open the existing conversation `id`.
    ///
    /// Returns [`ErrorKind::NotFound`] if `store` has no such conversation.
    pub async fn open(api: &RealtimeApi, store: &dyn ObjectStore, id: &str) -> Result<Self> {
        match store.get(CONVERSATION_CLASS, id).await {
            Ok(_) => Ok(Self {
                api: api.clone(),
                id: id.to_string(),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(Error::not_found("Conversation not found")
                    .with_code("404")
                    .with_source(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Create a new conversation.
    pub async fn create(api: &RealtimeApi, new: NewConversation) -> Result<Self> {
        let body = serde_json::to_value(&new)?;
        let created = api
            .create_conversation(Args::new().json_body(body))
            .await?
            .into_value();

        let id = created
            .as_ref()
            .and_then(|v| v.get("objectId"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::client("Missing objectId in created conversation"))?;
        debug!("conversation {id} created");

        Ok(Self {
            api: api.clone(),
            id: id.to_string(),
        })
    }

    /// The conversation id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add `client_ids` to the members.
    pub async fn add_members<I, S>(&self, client_ids: I) -> Result<Response>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manage_members("AddUnique", client_ids).await
    }

    /// Remove `client_ids` from the members.
    pub async fn remove_members<I, S>(&self, client_ids: I) -> Result<Response>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manage_members("Remove", client_ids).await
    }

    async fn manage_members<I, S>(&self, op: &str, client_ids: I) -> Result<Response>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let objects: Vec<String> = client_ids.into_iter().map(Into::into).collect();
        let body = json!({
            "m": {
                "__op": op,
                "objects": objects,
            }
        });

        self.api
            .manage_members(Args::new().kwarg("convid", self.id.as_str()).json_body(body))
            .await
    }

    /// Query the history of this conversation.
    pub async fn query_message(&self, query: MessageQuery) -> Result<Response> {
        let MessageQuery {
            max_ts,
            msgid,
            limit,
            reversed,
            peerid,
            mut nonce,
            mut signature_ts,
        } = query;

        let mut signature = None;
        if let Some(peerid) = &peerid {
            let timestamp = signature_ts
                .take()
                .unwrap_or_else(|| format_timestamp_millis(self.api.client().now()));
            let n = nonce.take().unwrap_or_else(|| timestamp.clone());

            signature = Some(message_signature(
                &self.api.client().credential().app_id,
                peerid,
                &self.id,
                &n,
                &timestamp,
            ));
            nonce = Some(n);
            signature_ts = Some(timestamp);
        }

        let args = Args::new()
            .kwarg("convid", self.id.as_str())
            .kwarg("max_ts", max_ts)
            .kwarg("msgid", msgid)
            .kwarg("limit", limit)
            .kwarg("reversed", reversed)
            .kwarg("peerid", peerid)
            .kwarg("nonce", nonce)
            .kwarg("signature_ts", signature_ts)
            .kwarg("signature", signature);
        self.api.query_message(args).await
    }
}
