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

//! Binding call arguments to a [`MethodDescriptor`].

use crate::constants::{BODY, JSON_BODY, PATH_ENCODE_SET};
use crate::request::{Param, PreparedRequest, Preparer};
use crate::sign::AuthMode;
use crate::{ApiClient, Error, Format, MethodDescriptor, Response, Result};
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde_json::Value;

/// Call arguments: positional values followed by named values.
///
/// A `null` value means "not provided" and is skipped.
///
/// ```
/// use leancloud_realtime_core::Args;
///
/// let args = Args::new()
///     .arg("58dcd5c31b69e60062aee271")
///     .kwarg("limit", 20)
///     .kwarg("msgid", None::<String>);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
}

impl Args {
    /// Create empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a named argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Append the `json_body` named argument.
    pub fn json_body(self, value: impl Into<Value>) -> Self {
        self.kwarg(JSON_BODY, value)
    }
}

/// The result of binding: a resolved path plus the parameters left over for
/// the query or the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Path with every placeholder substituted.
    pub path: String,
    /// Remaining parameters, in accepted parameter order.
    pub parameters: Vec<(String, Param)>,
}

impl Binding {
    /// Bind `args` against `descriptor`.
    ///
    /// - The i-th positional argument binds to the i-th accepted parameter.
    /// - Named arguments that are not accepted are ignored.
    /// - A parameter may be supplied only once.
    /// - Every path placeholder must be resolved.
    pub fn new(descriptor: &MethodDescriptor, args: Args, format: Option<Format>) -> Result<Self> {
        let mut parameters = build_parameters(descriptor, args)?;
        let path = build_path(descriptor, &mut parameters, format)?;

        parameters.sort_by_key(|(k, _)| descriptor.parameter_index(k));
        Ok(Binding { path, parameters })
    }

    fn get(&self, name: &str) -> Option<&Param> {
        self.parameters
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }
}

fn build_parameters(descriptor: &MethodDescriptor, args: Args) -> Result<Vec<(String, Param)>> {
    let mut parameters: Vec<(String, Param)> = Vec::new();

    for (index, value) in args.positional.into_iter().enumerate() {
        if value.is_null() {
            continue;
        }
        let name = descriptor
            .accepts_parameters
            .get(index)
            .ok_or_else(|| Error::client("Too many arguments supplied"))?;
        parameters.push((name.to_string(), coerce(name, value)));
    }

    for (name, value) in args.keyword {
        if value.is_null() || !descriptor.accepts_parameter(&name) {
            continue;
        }
        if parameters.iter().any(|(k, _)| *k == name) {
            return Err(Error::client(format!("Parameter {name} already supplied")));
        }
        let param = coerce(&name, value);
        parameters.push((name, param));
    }

    Ok(parameters)
}

/// Body parameters pass through, everything else becomes text.
fn coerce(name: &str, value: Value) -> Param {
    if name == BODY || name == JSON_BODY {
        Param::Json(value)
    } else {
        Param::Text(Param::Json(value).to_text())
    }
}

fn build_path(
    descriptor: &MethodDescriptor,
    parameters: &mut Vec<(String, Param)>,
    format: Option<Format>,
) -> Result<String> {
    let mut path = descriptor.path.to_string();

    for name in descriptor.path_variables() {
        let placeholder = format!("{{{name}}}");
        if !path.contains(&placeholder) {
            continue;
        }

        let index = parameters
            .iter()
            .position(|(k, _)| k == name)
            .ok_or_else(|| {
                Error::client(format!(
                    "No parameter value found for path variable: {name}"
                ))
            })?;
        let (_, value) = parameters.remove(index);
        let value = value.to_text();
        // URL parsers resolve dot segments, even percent-encoded ones.
        if value == "." || value == ".." {
            return Err(Error::client(format!(
                "Invalid value for path variable {name}: {value}"
            )));
        }
        let value = utf8_percent_encode(&value, &PATH_ENCODE_SET).to_string();

        path = path.replace(&placeholder, &value);
    }

    if let (true, Some(format)) = (descriptor.append_format, format) {
        path.push('.');
        path.push_str(&format.to_string());
    }

    Ok(path)
}

/// BoundMethod is one call of a descriptor: arguments bound, path resolved,
/// ready to be executed once.
#[derive(Debug)]
pub struct BoundMethod<'a> {
    client: &'a ApiClient,
    descriptor: &'a MethodDescriptor,
    binding: Binding,
}

impl<'a> BoundMethod<'a> {
    /// Bind `args` for a call of `descriptor` through `client`.
    pub fn new(client: &'a ApiClient, descriptor: &'a MethodDescriptor, args: Args) -> Result<Self> {
        let binding = Binding::new(descriptor, args, client.format())?;
        Ok(Self {
            client,
            descriptor,
            binding,
        })
    }

    /// The resolved path.
    pub fn path(&self) -> &str {
        &self.binding.path
    }

    /// The value bound to `name`, if it was not consumed by the path.
    pub fn parameter(&self, name: &str) -> Option<&Param> {
        self.binding.get(name)
    }

    /// Build the request this call would send.
    pub fn prepare(&self) -> Result<PreparedRequest> {
        let preparer = Preparer {
            endpoint: self.client.endpoint(),
            credential: self.client.credential(),
            signer: self.client.signer(),
            user_agent: self.client.user_agent(),
        };

        preparer.prepare(
            self.descriptor.method,
            &self.binding.path,
            self.binding.parameters.clone(),
            AuthMode::of(self.descriptor),
        )
    }

    /// Send the request and normalize the response.
    pub async fn execute(self) -> Result<Response> {
        let req = self.prepare()?;
        let (status, body) = self.client.send(req).await?;
        debug!("{} {} returned {status}", self.descriptor.method, self.binding.path);

        crate::response::normalize(status, &body, self.descriptor)
    }
}

/// Operation is a descriptor turned into something callable.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    descriptor: &'static MethodDescriptor,
}

/// Turn a descriptor into an [`Operation`].
pub const fn bind(descriptor: &'static MethodDescriptor) -> Operation {
    Operation { descriptor }
}

impl Operation {
    /// The descriptor behind this operation.
    pub fn descriptor(&self) -> &'static MethodDescriptor {
        self.descriptor
    }

    /// Bind `args` and execute the call once.
    pub async fn call(&self, client: &ApiClient, args: Args) -> Result<Response> {
        BoundMethod::new(client, self.descriptor, args)?
            .execute()
            .await
    }
}
