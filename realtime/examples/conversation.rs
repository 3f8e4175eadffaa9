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

use anyhow::Result;
use leancloud_realtime::{default_api, Args, Conversation, MessageQuery, RestObjectStore};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Build the api from LEANCLOUD_APP_ID, LEANCLOUD_APP_KEY and
    // LEANCLOUD_APP_MASTER_KEY
    let api = default_api()?;

    // Open an existing conversation
    let convid = env::args()
        .nth(1)
        .unwrap_or_else(|| "58dcd5c31b69e60062aee271".to_string());
    let store = RestObjectStore::new(api.clone());
    let conv = Conversation::open(&api, &store, &convid).await?;

    // Read the latest messages as seen by one member
    let messages = conv
        .query_message(MessageQuery {
            limit: 10,
            peerid: Some("BillGates".to_string()),
            ..Default::default()
        })
        .await?;
    println!("history of {}: {:?}", conv.id(), messages.into_value());

    // Messages of the whole app, signed with X-LC-Sign
    let all = api.query_all_message(Args::new().kwarg("limit", 10)).await?;
    println!("latest messages: {:?}", all.into_value());

    Ok(())
}
