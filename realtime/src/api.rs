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

use crate::operations::*;
use leancloud_realtime_core::time::DateTime;
use leancloud_realtime_core::{bind, ApiClient, Args, Config, Context, Response, Result};

/// RealtimeApi is the client of the LeanCloud realtime REST API.
///
/// Each method performs exactly one request. Arguments follow the accepted
/// parameters of the matching descriptor in [`crate::operations`]: positional
/// values bind in that order, named values by name, unknown names are
/// ignored.
///
/// ```no_run
/// use leancloud_realtime::{Args, Config, Context, OsEnv, RealtimeApi};
///
/// # async fn example() -> leancloud_realtime::Result<()> {
/// let ctx = Context::new().with_env(OsEnv);
/// let config = Config::default().from_env(&ctx);
/// let api = RealtimeApi::new(ctx, &config)?;
///
/// let messages = api
///     .query_message_by_from(Args::new().kwarg("from", "nsHaS37yQWOKXVjG3qAAcQ"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RealtimeApi {
    client: ApiClient,
}

impl RealtimeApi {
    /// Create a new api from `config`.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(ctx, config)?,
        })
    }

    /// Specify the time used for signing and signature timestamps.
    ///
    /// # Note
    ///
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.client = self.client.with_time(time);
        self
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Create a conversation.
    ///
    /// Accepts `json_body`.
    pub async fn create_conversation(&self, args: Args) -> Result<Response> {
        bind(&CREATE_CONVERSATION).call(&self.client, args).await
    }

    /// Add or remove members of a conversation.
    ///
    /// Accepts `convid`, `json_body`.
    pub async fn manage_members(&self, args: Args) -> Result<Response> {
        bind(&MANAGE_MEMBERS).call(&self.client, args).await
    }

    /// Query the history of a conversation.
    ///
    /// Accepts `convid`, `max_ts`, `msgid`, `limit`, `reversed`, `peerid`,
    /// `nonce`, `signature_ts`, `signature`.
    pub async fn query_message(&self, args: Args) -> Result<Response> {
        bind(&QUERY_MESSAGE).call(&self.client, args).await
    }

    /// Query the messages sent by a client.
    ///
    /// Accepts `from`, `max_ts`, `msgid`, `limit`.
    pub async fn query_message_by_from(&self, args: Args) -> Result<Response> {
        bind(&QUERY_MESSAGE_BY_FROM).call(&self.client, args).await
    }

    /// Query the messages of the whole app.
    ///
    /// Accepts `max_ts`, `msgid`, `limit`.
    pub async fn query_all_message(&self, args: Args) -> Result<Response> {
        bind(&QUERY_ALL_MESSAGE).call(&self.client, args).await
    }

    /// Send a message.
    ///
    /// Accepts `json_body`.
    pub async fn send_message(&self, args: Args) -> Result<Response> {
        bind(&SEND_MESSAGE).call(&self.client, args).await
    }

    /// Delete a message.
    ///
    /// Accepts `convid`, `msgid`, `timestamp`.
    pub async fn delete_message(&self, args: Args) -> Result<Response> {
        bind(&DELETE_MESSAGE).call(&self.client, args).await
    }

    /// Replace the content of a message.
    ///
    /// Accepts `json_body`.
    pub async fn update_message(&self, args: Args) -> Result<Response> {
        bind(&UPDATE_MESSAGE).call(&self.client, args).await
    }

    /// Kick a client offline.
    ///
    /// Accepts `json_body`.
    pub async fn client_kick(&self, args: Args) -> Result<Response> {
        bind(&CLIENT_KICK).call(&self.client, args).await
    }

    /// Fetch one stored object.
    pub async fn fetch_object(&self, class_name: &str, object_id: &str) -> Result<Response> {
        bind(&FETCH_OBJECT)
            .call(&self.client, Args::new().arg(class_name).arg(object_id))
            .await
    }
}
