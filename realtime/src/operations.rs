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

//! Declared operations of the realtime REST API.
//!
//! Every operation is a [`MethodDescriptor`] constant. Call them through
//! [`crate::RealtimeApi`], or bind them directly:
//!
//! ```no_run
//! use leancloud_realtime::operations::DELETE_MESSAGE;
//! use leancloud_realtime::{bind, Args, RealtimeApi};
//!
//! # async fn example(api: &RealtimeApi) -> leancloud_realtime::Result<()> {
//! bind(&DELETE_MESSAGE)
//!     .call(api.client(), Args::new().arg("C1").arg("M1").arg(1490950859958u64))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use leancloud_realtime_core::{HttpMethod, MethodDescriptor, ResponseType};

/// Create a conversation.
pub const CREATE_CONVERSATION: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Post, "/classes/_Conversation").accepts(&["json_body"]);

/// Add or remove conversation members.
pub const MANAGE_MEMBERS: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Put, "/classes/_Conversation/{convid}")
        .accepts(&["convid", "json_body"]);

/// Query the history of one conversation.
pub const QUERY_MESSAGE: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Get, "/rtm/messages/history")
        .accepts(&[
            "convid",
            "max_ts",
            "msgid",
            "limit",
            "reversed",
            "peerid",
            "nonce",
            "signature_ts",
            "signature",
        ])
        .response(ResponseType::List)
        .master_key();

/// Query the messages sent by one client.
pub const QUERY_MESSAGE_BY_FROM: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Get, "/rtm/messages/history")
        .accepts(&["from", "max_ts", "msgid", "limit"])
        .response(ResponseType::List)
        .master_key()
        .signed_header();

/// Query the messages of the whole app.
pub const QUERY_ALL_MESSAGE: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Get, "/rtm/messages/history")
        .accepts(&["max_ts", "msgid", "limit"])
        .response(ResponseType::List)
        .master_key()
        .signed_header();

/// Send a message.
pub const SEND_MESSAGE: MethodDescriptor = MethodDescriptor::new(HttpMethod::Post, "/rtm/messages")
    .accepts(&["json_body"])
    .master_key();

/// Delete a message.
pub const DELETE_MESSAGE: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Delete, "/rtm/messages/logs")
        .accepts(&["convid", "msgid", "timestamp"])
        .response(ResponseType::Empty)
        .master_key();

/// Replace the content of a message.
pub const UPDATE_MESSAGE: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Put, "/rtm/messages/logs")
        .accepts(&["json_body"])
        .master_key();

/// Kick a client offline.
pub const CLIENT_KICK: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Post, "/rtm/client/kick").accepts(&["json_body"]);

/// Fetch one stored object.
pub const FETCH_OBJECT: MethodDescriptor =
    MethodDescriptor::new(HttpMethod::Get, "/classes/{class_name}/{object_id}")
        .accepts(&["class_name", "object_id"]);
