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

use crate::bind::BoundMethod;
use crate::request::{Endpoint, PreparedRequest};
use crate::sign::RequestSigner;
use crate::time::DateTime;
use crate::{Args, Config, Context, Credential, Format, MethodDescriptor, Response, Result};
use bytes::Bytes;
use http::StatusCode;
use log::debug;

/// ApiClient holds everything needed to call the realtime REST API.
///
/// It is immutable once built and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    ctx: Context,
    credential: Credential,
    endpoint: Endpoint,
    format: Option<Format>,
    user_agent: String,
    signer: RequestSigner,
}

impl ApiClient {
    /// Create a new client from `config`.
    ///
    /// Returns [`crate::ErrorKind::ConfigInvalid`] if the app id, the app key
    /// or the format is missing or invalid.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        let credential = config.credential()?;
        let format = config.format.parse::<Format>()?;
        let endpoint = Endpoint {
            protocol: config.protocol.clone(),
            host: config.host().to_string(),
            base_path: config.base_path.clone(),
        };
        let user_agent = format!(
            "{} Rust Client/{}",
            config.api_name,
            env!("CARGO_PKG_VERSION")
        );
        debug!("api client for {} built: {credential:?}", endpoint.url(""));

        Ok(Self {
            ctx,
            credential,
            endpoint,
            format: Some(format),
            user_agent,
            signer: RequestSigner::new(),
        })
    }

    /// Specify the time used for signing.
    ///
    /// # Note
    ///
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.signer = self.signer.with_time(time);
        self
    }

    /// The credential of this client.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The format appended to paths that ask for it.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// The `User-Agent` sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Current time as seen by this client, fixed when built `with_time`.
    pub fn now(&self) -> DateTime {
        self.signer.time()
    }

    pub(crate) fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Bind `args` to `descriptor` without sending anything.
    pub fn bind<'a>(&'a self, descriptor: &'a MethodDescriptor, args: Args) -> Result<BoundMethod<'a>> {
        BoundMethod::new(self, descriptor, args)
    }

    /// Bind `args` to `descriptor`, send the request once and normalize the
    /// response.
    pub async fn call(&self, descriptor: &MethodDescriptor, args: Args) -> Result<Response> {
        self.bind(descriptor, args)?.execute().await
    }

    pub(crate) async fn send(&self, req: PreparedRequest) -> Result<(StatusCode, Bytes)> {
        let req = req.into_http()?;
        let resp = self.ctx.http_send(req).await?;

        let (parts, body) = resp.into_parts();
        Ok((parts.status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{X_LC_ID, X_LC_KEY};
    use crate::{ErrorKind, HttpMethod, HttpSend, ResponseType};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    const DELETE_MESSAGE: MethodDescriptor =
        MethodDescriptor::new(HttpMethod::Delete, "/rtm/messages/logs")
            .accepts(&["convid", "msgid", "timestamp"])
            .master_key()
            .response(ResponseType::Empty);
    const UPDATE_MESSAGE: MethodDescriptor =
        MethodDescriptor::new(HttpMethod::Put, "/rtm/messages/logs")
            .accepts(&["json_body"])
            .master_key();

    #[derive(Debug, Clone)]
    struct MockHttpSend {
        status: StatusCode,
        body: &'static str,
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                requests: Arc::default(),
            }
        }

        fn take(&self) -> Vec<http::Request<Bytes>> {
            std::mem::take(&mut *self.requests.lock().unwrap())
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))
                .unwrap())
        }
    }

    fn config() -> Config {
        Config {
            app_id: Some("app_id".to_string()),
            app_key: Some("app_key".to_string()),
            master_key: Some("master_key".to_string()),
            ..Default::default()
        }
    }

    fn client(mock: &MockHttpSend) -> ApiClient {
        let ctx = Context::new().with_http_send(mock.clone());
        ApiClient::new(ctx, &config())
            .unwrap()
            .with_time(Utc.timestamp_millis_opt(1490950859958).unwrap())
    }

    #[tokio::test]
    async fn test_delete_message() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock = MockHttpSend::new(StatusCode::OK, "{}");
        let resp = client(&mock)
            .call(
                &DELETE_MESSAGE,
                Args::new()
                    .kwarg("convid", "C1")
                    .kwarg("msgid", "M1")
                    .kwarg("timestamp", 1490950859958u64),
            )
            .await?;
        assert!(resp.is_empty());

        let reqs = mock.take();
        assert_eq!(reqs.len(), 1);
        let req = &reqs[0];
        assert_eq!(req.method(), http::Method::DELETE);
        assert_eq!(
            req.uri().to_string(),
            "https://api.leancloud.cn/1.1/rtm/messages/logs?convid=C1&msgid=M1&timestamp=1490950859958"
        );
        assert_eq!(req.headers()[X_LC_KEY], "master_key,master");
        assert_eq!(req.headers()[X_LC_ID], "app_id");
        assert_eq!(
            req.headers()[http::header::USER_AGENT],
            format!("Realtime Rust Client/{}", env!("CARGO_PKG_VERSION")).as_str()
        );
        assert!(req.body().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_put_sends_json_body() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"updatedAt":"now"}"#);
        let body = json!({"from_peer": "a", "msg_id": "M1"});

        let resp = client(&mock)
            .call(&UPDATE_MESSAGE, Args::new().json_body(body.clone()))
            .await?;
        assert_eq!(resp, Response::Entry(json!({"updatedAt": "now"})));

        let req = mock.take().remove(0);
        assert_eq!(req.method(), http::Method::PUT);
        assert_eq!(
            req.uri().to_string(),
            "https://api.leancloud.cn/1.1/rtm/messages/logs"
        );
        assert_eq!(serde_json::from_slice::<serde_json::Value>(req.body())?, body);
        Ok(())
    }

    #[tokio::test]
    async fn test_remote_error_is_returned() {
        let mock = MockHttpSend::new(
            StatusCode::BAD_REQUEST,
            r#"{"code":4301,"error":"Conversation not found."}"#,
        );

        let err = client(&mock)
            .call(&DELETE_MESSAGE, Args::new().arg("C1").arg("M1").arg(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "(4301) Conversation not found.");
        assert_eq!(mock.take().len(), 1);
    }

    #[tokio::test]
    async fn test_binding_error_sends_nothing() {
        let mock = MockHttpSend::new(StatusCode::OK, "{}");

        let err = client(&mock)
            .call(&DELETE_MESSAGE, Args::new().arg("C1").kwarg("convid", "C2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Client);
        assert!(mock.take().is_empty());
    }

    #[tokio::test]
    async fn test_missing_master_key_sends_nothing() {
        let mock = MockHttpSend::new(StatusCode::OK, "{}");
        let ctx = Context::new().with_http_send(mock.clone());
        let config = Config {
            master_key: None,
            ..config()
        };

        let err = ApiClient::new(ctx, &config)
            .unwrap()
            .call(&DELETE_MESSAGE, Args::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(mock.take().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let err = ApiClient::new(Context::new(), &config())
            .unwrap()
            .call(&DELETE_MESSAGE, Args::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_invalid_config() {
        let err = ApiClient::new(Context::new(), &Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let config = Config {
            format: "xml".to_string(),
            ..config()
        };
        let err = ApiClient::new(Context::new(), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
