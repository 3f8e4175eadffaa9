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

use crate::RealtimeApi;
use async_trait::async_trait;
use http::StatusCode;
use leancloud_realtime_core::{Error, ErrorKind, Response, Result};
use log::debug;
use serde_json::Value;
use std::fmt::Debug;

/// Server code for a missing object.
const OBJECT_NOT_FOUND: &str = "101";

/// ObjectStore reads records of the remote data store.
#[async_trait]
pub trait ObjectStore: Debug + Send + Sync + 'static {
    /// Fetch the object `object_id` of `class_name`.
    ///
    /// Returns [`ErrorKind::NotFound`] if the object does not exist.
    async fn get(&self, class_name: &str, object_id: &str) -> Result<Value>;
}

/// RestObjectStore reads objects through `GET /classes/{class_name}/{object_id}`.
#[derive(Debug, Clone)]
pub struct RestObjectStore {
    api: RealtimeApi,
}

impl RestObjectStore {
    /// Create a new store sharing the client of `api`.
    pub fn new(api: RealtimeApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ObjectStore for RestObjectStore {
    async fn get(&self, class_name: &str, object_id: &str) -> Result<Value> {
        let resp = match self.api.fetch_object(class_name, object_id).await {
            Ok(resp) => resp,
            Err(err) if is_missing(&err) => {
                debug!("object {class_name}/{object_id} not found: {err}");
                return Err(not_found(class_name, object_id).with_source(err));
            }
            Err(err) => return Err(err),
        };

        match resp {
            Response::Entry(Value::Object(map)) if map.is_empty() => {
                Err(not_found(class_name, object_id))
            }
            Response::Entry(v) | Response::Raw(v) => Ok(v),
            _ => Err(Error::client("Unexpected response for object")),
        }
    }
}

fn is_missing(err: &Error) -> bool {
    err.status() == Some(StatusCode::NOT_FOUND)
        || (err.kind() == ErrorKind::Remote && err.code() == Some(OBJECT_NOT_FOUND))
}

fn not_found(class_name: &str, object_id: &str) -> Error {
    Error::not_found(format!("{class_name} {object_id} does not exist"))
}
