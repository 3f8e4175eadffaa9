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

//! Core components for calling the LeanCloud realtime REST API.
//!
//! Operations are declared as [`MethodDescriptor`] constants. A call binds
//! caller arguments to a descriptor, resolves the path template, signs the
//! request, sends it once through the [`HttpSend`] of the [`Context`] and
//! normalizes the response into a [`Response`] or a typed [`Error`].
//!
//! ## Example
//!
//! ```no_run
//! use leancloud_realtime_core::{ApiClient, Args, Config, Context, HttpMethod, MethodDescriptor, OsEnv};
//!
//! const DELETE_MESSAGE: MethodDescriptor =
//!     MethodDescriptor::new(HttpMethod::Delete, "/rtm/messages/logs")
//!         .accepts(&["convid", "msgid", "timestamp"])
//!         .master_key();
//!
//! # async fn example() -> leancloud_realtime_core::Result<()> {
//! // Plug in an HttpSend implementation, see `leancloud-realtime-http-send-reqwest`.
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let client = ApiClient::new(ctx, &config)?;
//!
//! client
//!     .call(
//!         &DELETE_MESSAGE,
//!         Args::new().arg("58dcd5c31b69e60062aee271").arg("msgid").arg(1490950859958u64),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: md5 and hmac-sha256 helpers
//! - [`time`]: Time helpers
//! - [`sign`]: Header and query signing

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod sign;
pub mod time;

mod constants;
pub use constants::{BODY, JSON_BODY};
mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod config;
pub use config::{Config, Format};
mod credential;
pub use credential::Credential;
mod method;
pub use method::{HttpMethod, MethodDescriptor, PathVariables, ResponseType};
mod request;
pub use request::{Endpoint, Param, PreparedRequest, Preparer};
mod response;
pub use response::{normalize, Response};
mod bind;
pub use bind::{bind, Args, Binding, BoundMethod, Operation};
mod client;
pub use client::ApiClient;
