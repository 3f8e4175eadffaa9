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

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for realtime API operations.
///
/// Every error carries a [`ErrorKind`] and a message. Errors that come back
/// from the server also carry the HTTP status and the machine error code the
/// server returned, when those are known.
#[derive(Error, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call was malformed (too many arguments, duplicated or missing
    /// parameters) or the response could not be understood.
    Client,

    /// The server rejected the request with an error code and message.
    Remote,

    /// The server throttled the request.
    RateLimited,

    /// The requested object does not exist.
    NotFound,

    /// The request never produced a response (connection failure, TLS, ...).
    Transport,

    /// Configuration error (missing credentials, unsupported format)
    ConfigInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the HTTP status of the response that produced this error.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the machine error code returned by the server.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without code or status.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Get the server error code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Check if this error was raised by the remote side.
    ///
    /// Transport failures count as remote errors without a status.
    pub fn is_remote(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Remote | ErrorKind::RateLimited | ErrorKind::NotFound | ErrorKind::Transport
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a client error
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Client, message)
    }

    /// Create a remote error from the code and message returned by the server.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Remote, message).with_code(code)
    }

    /// Create a rate limited error
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, self.status) {
            (Some(code), _) => write!(f, "({code}) {}", self.message),
            (None, Some(status)) => write!(f, "({}) {}", status.as_u16(), self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Client => write!(f, "client error"),
            ErrorKind::Remote => write!(f, "remote error"),
            ErrorKind::RateLimited => write!(f, "rate limited"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::client(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::client(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::client(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::client(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::client(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
