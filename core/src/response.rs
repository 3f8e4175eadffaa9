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

use crate::constants::RATE_LIMIT_CODES;
use crate::{Error, MethodDescriptor, ResponseType, Result};
use http::StatusCode;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Normalized result of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T = Value> {
    /// The parsed body, returned verbatim because the descriptor does not
    /// objectify responses.
    Raw(Value),
    /// A single entry.
    Entry(T),
    /// A list of entries.
    List(Vec<T>),
    /// Nothing.
    Empty,
}

impl Response<Value> {
    /// Convert every entry with `f`.
    ///
    /// Raw responses are left untouched.
    pub fn objectify<T, F>(self, mut f: F) -> Result<Response<T>>
    where
        F: FnMut(Value) -> Result<T>,
    {
        Ok(match self {
            Response::Raw(v) => Response::Raw(v),
            Response::Entry(v) => Response::Entry(f(v)?),
            Response::List(vs) => Response::List(vs.into_iter().map(f).collect::<Result<_>>()?),
            Response::Empty => Response::Empty,
        })
    }

    /// Convert every entry into `T` with serde.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<Response<T>> {
        self.objectify(|v| serde_json::from_value(v).map_err(Error::from))
    }

    /// Collapse into a single JSON value, `None` for [`Response::Empty`].
    pub fn into_value(self) -> Option<Value> {
        match self {
            Response::Raw(v) | Response::Entry(v) => Some(v),
            Response::List(vs) => Some(Value::Array(vs)),
            Response::Empty => None,
        }
    }
}

impl<T> Response<T> {
    /// Check if there is nothing in this response.
    pub fn is_empty(&self) -> bool {
        matches!(self, Response::Empty)
    }
}

/// Normalize a raw response according to `descriptor`.
///
/// - The body must be JSON, otherwise a client error carrying the status is
///   returned.
/// - Any 2xx status is a success shaped by the descriptor's response type.
/// - Otherwise the `code` and `error` fields of the body decide the error.
pub fn normalize(status: StatusCode, body: &[u8], descriptor: &MethodDescriptor) -> Result<Response> {
    let content: Value = serde_json::from_slice(body).map_err(|e| {
        Error::client("Unable to parse response, not valid JSON.")
            .with_status(status)
            .with_source(e)
    })?;

    if status.is_success() {
        debug!("got {status} for {}", descriptor.path);
        return shape(status, content, descriptor);
    }

    let code = content.get("code").and_then(code_to_string);
    let error = content
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    warn!("got {status} for {}: code={code:?} error={error:?}", descriptor.path);

    match (code, error) {
        (Some(code), _) if RATE_LIMIT_CODES.contains(&code.as_str()) => Err(Error::rate_limited(
            "Rate limited: your client is making too many requests per second",
        )
        .with_status(status)
        .with_code(code)),
        (Some(code), Some(error)) => Err(Error::remote(code, error).with_status(status)),
        _ => Err(Error::client("Malformed error response: missing code or error")
            .with_status(status)),
    }
}

fn shape(status: StatusCode, content: Value, descriptor: &MethodDescriptor) -> Result<Response> {
    if !descriptor.objectify_response {
        return Ok(Response::Raw(content));
    }

    match descriptor.response_type {
        ResponseType::Entry => Ok(Response::Entry(content)),
        ResponseType::List => match content {
            Value::Array(entries) => Ok(Response::List(entries)),
            _ => Err(Error::client("Expected a list response").with_status(status)),
        },
        ResponseType::Empty => Ok(Response::Empty),
    }
}

/// The server sends codes both as numbers and as strings.
fn code_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
