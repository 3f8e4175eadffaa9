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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used by the realtime REST API.
pub const X_LC_ID: &str = "x-lc-id";
pub const X_LC_KEY: &str = "x-lc-key";
pub const X_LC_SIGN: &str = "x-lc-sign";

// Suffix appended to key and sign headers when the master key is used.
pub const MASTER_SUFFIX: &str = "master";

// Query parameters added by signed query mode.
pub const ACCESS_TOKEN: &str = "access_token";
pub const APP_ID: &str = "app_id";
pub const SIG: &str = "sig";

/// Reserved parameter carrying a raw request body.
pub const BODY: &str = "body";
/// Reserved parameter carrying the JSON request body.
pub const JSON_BODY: &str = "json_body";

// Env values used to load config.
pub const LEANCLOUD_APP_ID: &str = "LEANCLOUD_APP_ID";
pub const LEANCLOUD_APP_KEY: &str = "LEANCLOUD_APP_KEY";
pub const LEANCLOUD_APP_MASTER_KEY: &str = "LEANCLOUD_APP_MASTER_KEY";
pub const LEANCLOUD_ACCESS_TOKEN: &str = "LEANCLOUD_ACCESS_TOKEN";
pub const LEANCLOUD_CLIENT_IPS: &str = "LEANCLOUD_CLIENT_IPS";
pub const LEANCLOUD_API_HOST: &str = "LEANCLOUD_API_HOST";

// Defaults of the API endpoint.
pub const DEFAULT_HOST: &str = "api.leancloud.cn";
pub const DEFAULT_BASE_PATH: &str = "/1.1";
pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_API_NAME: &str = "Realtime";

/// Server error codes that mean the caller is being throttled.
pub const RATE_LIMIT_CODES: [&str; 3] = ["529", "430", "431"];

/// AsciiSet for path variables.
///
/// Every byte is encoded except the unreserved characters: 'A'-'Z', 'a'-'z',
/// '0'-'9', '-', '.', '_', '~'. A value always stays inside one segment.
pub static PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
