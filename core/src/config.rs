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
use crate::{Context, Credential, Error, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Config carries all the configuration for the realtime API client.
#[derive(Clone, Debug)]
pub struct Config {
    /// `app_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`LEANCLOUD_APP_ID`]
    pub app_id: Option<String>,
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`LEANCLOUD_APP_KEY`]
    pub app_key: Option<String>,
    /// `master_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`LEANCLOUD_APP_MASTER_KEY`]
    pub master_key: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`LEANCLOUD_ACCESS_TOKEN`]
    pub access_token: Option<String>,
    /// `client_ips` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`LEANCLOUD_CLIENT_IPS`]
    pub client_ips: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`LEANCLOUD_API_HOST`]
    /// - default to `api.leancloud.cn`
    pub host: Option<String>,
    /// API version prefix, default to `/1.1`.
    pub base_path: String,
    /// URL scheme, default to `https`.
    pub protocol: String,
    /// Response format, default to `json`.
    pub format: String,
    /// API name reported in the `User-Agent`, default to `Realtime`.
    pub api_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            master_key: None,
            access_token: None,
            client_ips: None,
            host: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            format: Format::Json.to_string(),
            api_name: DEFAULT_API_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(LEANCLOUD_APP_ID) {
            self.app_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(LEANCLOUD_APP_KEY) {
            self.app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(LEANCLOUD_APP_MASTER_KEY) {
            self.master_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(LEANCLOUD_ACCESS_TOKEN) {
            self.access_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(LEANCLOUD_CLIENT_IPS) {
            self.client_ips.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(LEANCLOUD_API_HOST) {
            self.host.get_or_insert(v);
        }

        self
    }

    /// Build the immutable credential out of this config.
    pub fn credential(&self) -> Result<Credential> {
        let app_id = self
            .app_id
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("app_id is required"))?;
        let app_key = self
            .app_key
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("app_key is required"))?;

        Ok(Credential {
            app_id,
            app_key,
            master_key: self.master_key.clone(),
            access_token: self.access_token.clone(),
            client_ips: self.client_ips.clone(),
        })
    }

    /// The host to talk to.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }
}

/// Response formats supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON, the only format the server speaks.
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Format::Json),
            v => Err(Error::config_invalid(format!("Unsupported format: {v}"))),
        }
    }
}
