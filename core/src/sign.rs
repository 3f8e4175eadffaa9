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

//! Authentication artifacts for the realtime REST API.
//!
//! - `X-LC-Key: <app_key>` or `X-LC-Key: <master_key>,master`
//! - `X-LC-Sign: md5(<timestamp><key>),<timestamp>[,master]`
//! - `?...&sig=hex(hmac_sha256(app_key, "<path>|k1=v1|k2=v2"))`

use crate::constants::*;
use crate::hash::{hex_hmac_sha256, hex_md5};
use crate::time::{format_timestamp_millis, now, DateTime};
use crate::{Credential, Error, MethodDescriptor, Result};
use http::{HeaderMap, HeaderValue};
use log::debug;

/// The authentication scheme applied to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Secret key header: `X-LC-Key`.
    Key {
        /// Use the master key.
        master: bool,
    },
    /// Timestamp signed header: `X-LC-Sign`.
    SignedHeader {
        /// Sign with the master key.
        master: bool,
    },
    /// HMAC signature appended to the query string. Headers carry only the
    /// app id.
    SignedQuery,
}

impl AuthMode {
    /// Pick the auth mode a descriptor asks for.
    ///
    /// Signed query wins over headers, signed header wins over the plain key.
    pub fn of(descriptor: &MethodDescriptor) -> Self {
        if descriptor.requires_signed_query {
            AuthMode::SignedQuery
        } else if descriptor.requires_signed_header {
            AuthMode::SignedHeader {
                master: descriptor.requires_master_key,
            }
        } else {
            AuthMode::Key {
                master: descriptor.requires_master_key,
            }
        }
    }
}

/// RequestSigner computes auth headers and query signatures.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer that uses current time.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The signing time: the fixed time if set, current time otherwise.
    pub fn time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Insert the auth headers for `mode` into `headers`.
    ///
    /// [`AuthMode::SignedQuery`] inserts nothing.
    pub fn sign_headers(
        &self,
        cred: &Credential,
        mode: AuthMode,
        headers: &mut HeaderMap,
    ) -> Result<()> {
        match mode {
            AuthMode::Key { master } => {
                let value = if master {
                    format!("{},{MASTER_SUFFIX}", master_key(cred)?)
                } else {
                    cred.app_key.clone()
                };
                headers.insert(X_LC_KEY, sensitive(&value)?);
            }
            AuthMode::SignedHeader { master } => {
                let timestamp = format_timestamp_millis(self.time());
                let value = if master {
                    let sign = sign_timestamp(&timestamp, master_key(cred)?);
                    format!("{sign},{timestamp},{MASTER_SUFFIX}")
                } else {
                    let sign = sign_timestamp(&timestamp, &cred.app_key);
                    format!("{sign},{timestamp}")
                };
                headers.insert(X_LC_SIGN, sensitive(&value)?);
            }
            AuthMode::SignedQuery => {}
        }

        Ok(())
    }

    /// Add the identity parameter to `query` and return the query signature.
    ///
    /// `access_token` is used when present, `app_id` otherwise. The pairs
    /// must not be percent encoded yet.
    pub fn sign_query(&self, cred: &Credential, path: &str, query: &mut Vec<(String, String)>) -> String {
        match &cred.access_token {
            Some(token) => query.push((ACCESS_TOKEN.to_string(), token.clone())),
            None => query.push((APP_ID.to_string(), cred.app_id.clone())),
        }

        let string_to_sign = canonical_query_string(path, query);
        debug!("string to sign: {string_to_sign}");

        hex_hmac_sha256(cred.app_key.as_bytes(), string_to_sign.as_bytes())
    }
}

/// Build `<path>|k1=v1|k2=v2` with pairs sorted by key.
pub fn canonical_query_string(path: &str, query: &[(String, String)]) -> String {
    let mut pairs = query.iter().collect::<Vec<_>>();
    pairs.sort();

    let mut s = String::with_capacity(path.len() + 16 * pairs.len());
    s.push_str(path);
    for (k, v) in pairs {
        s.push('|');
        s.push_str(k);
        s.push('=');
        s.push_str(v);
    }
    s
}

/// `md5(<timestamp><secret>)` in hex.
pub fn sign_timestamp(timestamp: &str, secret: &str) -> String {
    hex_md5(format!("{timestamp}{secret}").as_bytes())
}

/// Signature that authorizes `peerid` to read the history of `convid`:
/// `md5("<app_id>:<peerid>:<convid>:<nonce>:<timestamp>")` in hex.
pub fn message_signature(
    app_id: &str,
    peerid: &str,
    convid: &str,
    nonce: &str,
    timestamp: &str,
) -> String {
    hex_md5(format!("{app_id}:{peerid}:{convid}:{nonce}:{timestamp}").as_bytes())
}

fn master_key(cred: &Credential) -> Result<&str> {
    cred.master_key
        .as_deref()
        .ok_or_else(|| Error::config_invalid("master_key is required by this operation"))
}

fn sensitive(value: &str) -> Result<HeaderValue> {
    let mut value: HeaderValue = value.parse()?;
    value.set_sensitive(true);
    Ok(value)
}
