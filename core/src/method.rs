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

//! Declarative descriptions of API operations.

use std::fmt::{Display, Formatter};

/// HTTP methods used by the realtime REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
}

impl HttpMethod {
    /// Returns `true` if remaining parameters travel in the request body.
    ///
    /// POST and PUT carry a body, GET and DELETE put everything in the query.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Returns the method name in upper case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

/// The shape of a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// A single JSON object.
    Entry,
    /// A JSON array of entries.
    List,
    /// Nothing worth returning.
    Empty,
}

/// MethodDescriptor is the immutable specification of one API operation.
///
/// Descriptors are built once as constants and shared read-only by every
/// invocation:
///
/// ```
/// use leancloud_realtime_core::{HttpMethod, MethodDescriptor};
///
/// const DELETE_MESSAGE: MethodDescriptor =
///     MethodDescriptor::new(HttpMethod::Delete, "/rtm/messages/logs")
///         .accepts(&["convid", "msgid", "timestamp"])
///         .master_key();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Path template with `{name}` placeholders.
    pub path: &'static str,
    /// HTTP method.
    pub method: HttpMethod,
    /// Accepted parameter names, in positional order.
    pub accepts_parameters: &'static [&'static str],
    /// Shape of a successful response.
    pub response_type: ResponseType,
    /// Whether the operation asks for a client IP allowlist signature.
    pub requires_signature: bool,
    /// Authenticate with the master key instead of the app key.
    pub requires_master_key: bool,
    /// Authenticate with `X-LC-Sign` instead of `X-LC-Key`.
    pub requires_signed_header: bool,
    /// Authenticate with a `sig` query parameter instead of headers.
    pub requires_signed_query: bool,
    /// When false, successful bodies are returned verbatim.
    pub objectify_response: bool,
    /// Append `.<format>` to the path.
    pub append_format: bool,
}

impl MethodDescriptor {
    /// Create a descriptor with default settings: no parameters, an
    /// [`ResponseType::Entry`] response, app key header auth, objectified
    /// response and no format suffix.
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            path,
            method,
            accepts_parameters: &[],
            response_type: ResponseType::Entry,
            requires_signature: false,
            requires_master_key: false,
            requires_signed_header: false,
            requires_signed_query: false,
            objectify_response: true,
            append_format: false,
        }
    }

    /// Set the accepted parameters.
    pub const fn accepts(mut self, params: &'static [&'static str]) -> Self {
        self.accepts_parameters = params;
        self
    }

    /// Set the response type.
    pub const fn response(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Require the client IP allowlist signature.
    pub const fn signature(mut self) -> Self {
        self.requires_signature = true;
        self
    }

    /// Authenticate with the master key.
    pub const fn master_key(mut self) -> Self {
        self.requires_master_key = true;
        self
    }

    /// Authenticate with the timestamp signed header.
    pub const fn signed_header(mut self) -> Self {
        self.requires_signed_header = true;
        self
    }

    /// Authenticate with the signed query.
    pub const fn signed_query(mut self) -> Self {
        self.requires_signed_query = true;
        self
    }

    /// Return successful bodies verbatim.
    pub const fn raw_response(mut self) -> Self {
        self.objectify_response = false;
        self
    }

    /// Append the configured format as path suffix.
    pub const fn with_format(mut self) -> Self {
        self.append_format = true;
        self
    }

    /// Check if `name` is an accepted parameter.
    pub fn accepts_parameter(&self, name: &str) -> bool {
        self.accepts_parameters.contains(&name)
    }

    /// Position of `name` in the accepted parameters.
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.accepts_parameters.iter().position(|v| *v == name)
    }

    /// Iterate the `{name}` placeholders of the path template.
    pub fn path_variables(&self) -> PathVariables<'static> {
        PathVariables { rest: self.path }
    }
}

/// Iterator over the placeholder names of a path template.
///
/// A placeholder is `{` followed by one or more word characters and `}`.
/// Braces around anything else are left as literal text.
#[derive(Debug, Clone)]
pub struct PathVariables<'a> {
    rest: &'a str,
}

impl<'a> Iterator for PathVariables<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.rest.find('{')?;
            let after = &self.rest[start + 1..];
            let len = after
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(after.len());

            if len > 0 && after[len..].starts_with('}') {
                self.rest = &after[len + 1..];
                return Some(&after[..len]);
            }
            self.rest = after;
        }
    }
}
