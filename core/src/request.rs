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

use crate::constants::*;
use crate::sign::{AuthMode, RequestSigner};
use crate::{Credential, HttpMethod, Result};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue};
use log::debug;
use serde_json::Value;

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A value already coerced to its string form.
    Text(String),
    /// A body value passed through without encoding.
    Json(Value),
}

impl Param {
    /// The string form of this value.
    ///
    /// JSON strings are used as is, everything else in its JSON text form.
    pub fn to_text(&self) -> String {
        match self {
            Param::Text(v) => v.clone(),
            Param::Json(Value::String(v)) => v.clone(),
            Param::Json(v) => v.to_string(),
        }
    }

    /// The JSON form of this value.
    pub fn into_json(self) -> Value {
        match self {
            Param::Text(v) => Value::String(v),
            Param::Json(v) => v,
        }
    }
}

/// Protocol, host and base path of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `https` or `http`.
    pub protocol: String,
    /// Host with optional port.
    pub host: String,
    /// Version prefix such as `/1.1`.
    pub base_path: String,
}

impl Endpoint {
    /// Build `<protocol>://<host><base_path><path>`.
    pub fn url(&self, path: &str) -> String {
        format!("{}://{}{}{}", self.protocol, self.host, self.base_path, path)
    }
}

/// PreparedRequest is a fully built request waiting to be sent.
#[derive(Debug)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Fully qualified URL including the query string.
    pub url: String,
    /// URL encoded form body.
    pub body: Option<String>,
    /// JSON body, takes precedence over `body` when sending.
    pub json_body: Option<Value>,
    /// Request headers.
    pub headers: HeaderMap,
}

impl PreparedRequest {
    /// Convert into an `http::Request` ready for [`crate::HttpSend`].
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let body = match (self.json_body, self.body) {
            (Some(v), _) => Bytes::from(serde_json::to_vec(&v)?),
            (None, Some(v)) => Bytes::from(v),
            (None, None) => Bytes::new(),
        };

        let mut req = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(self.url.as_str())
            .body(body)?;
        *req.headers_mut() = self.headers;
        Ok(req)
    }
}

/// Preparer turns a method, a resolved path and the remaining parameters
/// into a [`PreparedRequest`].
#[derive(Debug, Clone, Copy)]
pub struct Preparer<'a> {
    /// Where to send requests.
    pub endpoint: &'a Endpoint,
    /// Credentials used for auth.
    pub credential: &'a Credential,
    /// Signer used for auth.
    pub signer: &'a RequestSigner,
    /// Value of the `User-Agent` header.
    pub user_agent: &'a str,
}

impl Preparer<'_> {
    /// Prepare a request.
    ///
    /// GET and DELETE put every parameter in the query. POST and PUT send the
    /// `json_body` parameter as JSON body and url encode the others into the
    /// form body.
    pub fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        params: Vec<(String, Param)>,
        mode: AuthMode,
    ) -> Result<PreparedRequest> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(X_LC_ID, self.credential.app_id.parse()?);
        headers.insert(USER_AGENT, self.user_agent.parse()?);
        self.signer.sign_headers(self.credential, mode, &mut headers)?;

        let mut query = Vec::new();
        let mut body = None;
        let mut json_body = None;
        if method.has_body() {
            let mut form = Vec::new();
            for (k, v) in params {
                if k == JSON_BODY {
                    json_body = Some(v.into_json());
                } else {
                    form.push((k, v.to_text()));
                }
            }
            if !form.is_empty() {
                body = Some(encode_pairs(&form));
            }
        } else {
            query.extend(params.into_iter().map(|(k, v)| (k, v.to_text())));
        }

        if mode == AuthMode::SignedQuery {
            let sig = self.signer.sign_query(self.credential, path, &mut query);
            query.push((SIG.to_string(), sig));
        }

        let mut url = self.endpoint.url(path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_pairs(&query));
        }
        debug!("prepared request: {method} {url}");

        Ok(PreparedRequest {
            method,
            url,
            body,
            json_body,
            headers,
        })
    }
}

/// `application/x-www-form-urlencoded` serialization, in the given order.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
