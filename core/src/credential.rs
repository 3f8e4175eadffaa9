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

use std::fmt::{Debug, Formatter};

/// Credential holds the application credentials shared by every operation.
///
/// It is immutable after construction, see [`crate::Config::credential`].
#[derive(Default, Clone)]
pub struct Credential {
    /// Application id, sent as `X-LC-Id` on every request.
    pub app_id: String,
    /// Application key.
    pub app_key: String,
    /// Master key, required by operations that bypass access rules.
    pub master_key: Option<String>,
    /// Access token, preferred over the app id in signed query mode.
    pub access_token: Option<String>,
    /// Client IP allowlist.
    pub client_ips: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &self.app_id)
            .field("app_key", &Redacted(&self.app_key))
            .field("master_key", &self.master_key.as_deref().map(Redacted))
            .field("access_token", &self.access_token.as_deref().map(Redacted))
            .field("client_ips", &self.client_ips)
            .finish()
    }
}

/// Prints only the first and last three characters of a secret, and nothing
/// at all of secrets shorter than 12 characters.
struct Redacted<'a>(&'a str);

impl Debug for Redacted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.0;
        match s.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 || !s.is_char_boundary(3) || !s.is_char_boundary(n - 3) => {
                f.write_str("***")
            }
            n => write!(f, "{}***{}", &s[..3], &s[n - 3..]),
        }
    }
}
