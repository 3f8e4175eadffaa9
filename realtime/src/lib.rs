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

//! Client for the LeanCloud realtime messaging REST API.
//!
//! ```no_run
//! use leancloud_realtime::{default_api, Args, Conversation, MessageQuery, RestObjectStore};
//!
//! # async fn example() -> leancloud_realtime::Result<()> {
//! let api = default_api()?;
//!
//! api.delete_message(
//!     Args::new()
//!         .kwarg("convid", "58dcd5c31b69e60062aee271")
//!         .kwarg("msgid", "jQTrEDQHQu+UEAzL4vq6dw")
//!         .kwarg("timestamp", "1490950859958"),
//! )
//! .await?;
//!
//! let store = RestObjectStore::new(api.clone());
//! let conv = Conversation::open(&api, &store, "58dcd5c31b69e60062aee271").await?;
//! let messages = conv.query_message(MessageQuery::default()).await?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use leancloud_realtime_core::*;

pub mod operations;

mod api;
pub use api::RealtimeApi;
mod object;
pub use object::{ObjectStore, RestObjectStore};
mod conversation;
pub use conversation::{Conversation, MessageQuery, NewConversation};

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_api, default_context};
