use crate::core::client::Client;
use crate::core::errors::{Error, Result};
use crate::lambda::handler::handle_event;
use log::{error, info};
use reqwest::blocking::{RequestBuilder, Response};
use serde_json::json;
use std::env;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Lambda Runtime API Client
-------------------------------------------------------------------------------------------------*/

const RUNTIME_API_ENV_VAR: &str = "AWS_LAMBDA_RUNTIME_API";
const RUNTIME_API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";

/// A pending invocation received from the runtime API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub request_id: String,
    pub event: Vec<u8>,
}

/// Blocking client for the Lambda custom-runtime HTTP API.
#[derive(Debug, Clone)]
pub struct Runtime {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl Runtime {
    /// Create a runtime client for the `host:port` in `AWS_LAMBDA_RUNTIME_API`.
    pub fn from_env() -> Result<Self> {
        let api = env::var(RUNTIME_API_ENV_VAR)
            .map_err(|_| Error::MissingEnvVar(RUNTIME_API_ENV_VAR))?;
        Runtime::new(&api)
    }

    /// Create a runtime client for the runtime API at `api` (`host:port`).
    pub fn new(api: &str) -> Result<Self> {
        let endpoint = format!("http://{api}/{RUNTIME_API_VERSION}/runtime");

        // The next-invocation request blocks until an event arrives.
        let http = reqwest::blocking::Client::builder()
            .timeout(Option::<Duration>::None)
            .build()
            .map_err(|source| Error::Request {
                url: endpoint.clone(),
                source,
            })?;

        Ok(Self { endpoint, http })
    }

    /// Serve invocations until the runtime API fails.
    pub fn run(&self, client: &Client) -> Result<()> {
        loop {
            self.process_next(client)?;
        }
    }

    /// Wait for the next invocation, handle it, and post the response or the handler error.
    ///
    /// Handler failures are reported to the runtime API and do not fail this call; only
    /// failures talking to the runtime API itself are returned.
    pub fn process_next(&self, client: &Client) -> Result<()> {
        let invocation = self.next_invocation()?;
        info!("Invocation {}", invocation.request_id);

        match handle_event(client, &invocation.event) {
            Ok(document) => self.respond(&invocation.request_id, document),
            Err(handler_error) => {
                error!("Invocation {} failed: {handler_error}", invocation.request_id);
                self.report_error(&invocation.request_id, &handler_error)
            }
        }
    }

    pub fn next_invocation(&self) -> Result<Invocation> {
        let url = format!("{}/invocation/next", self.endpoint);
        let response = send(&url, self.http.get(&url))?;

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|request_id| !request_id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::MissingRequestId(url.clone()))?;

        let event = response
            .bytes()
            .map_err(|source| Error::Request {
                url: url.clone(),
                source,
            })?
            .to_vec();

        Ok(Invocation { request_id, event })
    }

    pub fn respond(&self, request_id: &str, document: Vec<u8>) -> Result<()> {
        let url = format!("{}/invocation/{request_id}/response", self.endpoint);
        send(&url, self.http.post(&url).body(document)).map(|_| ())
    }

    pub fn report_error(&self, request_id: &str, handler_error: &Error) -> Result<()> {
        let url = format!("{}/invocation/{request_id}/error", self.endpoint);
        let body = json!({
            "errorMessage": handler_error.to_string(),
            "errorType": format!("{:?}", handler_error.kind()),
        });
        send(
            &url,
            self.http
                .post(&url)
                .header("Lambda-Runtime-Function-Error-Type", "Unhandled")
                .header("content-type", "application/json")
                .body(body.to_string()),
        )
        .map(|_| ())
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn send(url: &str, request: RequestBuilder) -> Result<Response> {
    let response = request.send().map_err(|source| Error::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            url: url.to_string(),
            status,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
