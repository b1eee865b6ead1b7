use crate::core::client::Client;
use crate::core::errors::{Error, Result};
use serde::Deserialize;

/*-------------------------------------------------------------------------------------------------
  Lambda Handler
-------------------------------------------------------------------------------------------------*/

/// Invocation payload, e.g. `{"minify": true}`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct LambdaRequest {
    #[serde(default)]
    pub minify: bool,
}

/// Generate the policy document returned as the invocation response body.
pub fn handle(client: &Client, request: LambdaRequest) -> Result<Vec<u8>> {
    client.generate_policy(request.minify)
}

/// Decode a raw invocation event and [handle] it. An empty or `null` event is treated as the
/// default request.
pub fn handle_event(client: &Client, event: &[u8]) -> Result<Vec<u8>> {
    let request: Option<LambdaRequest> = if event.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice(event).map_err(Error::InvalidEvent)?
    };

    handle(client, request.unwrap_or_default())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
