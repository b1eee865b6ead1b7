use crate::core::errors::{Error, Result};
use log::info;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Fetch Metadata
-------------------------------------------------------------------------------------------------*/

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Retrieve the full response body from `url` with a single blocking GET request.
///
/// The `timeout` bounds the whole request, from connect through reading the body. A response
/// with a non-success status code is returned as [Error::Status] rather than as metadata.
pub fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let request_error = |source| Error::Request {
        url: url.to_string(),
        source,
    };

    info!("GET {url}");
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(request_error)?;

    let response = client.get(url).send().map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        log::error!("GET {url}: HTTP {status}");
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().map_err(request_error)?;
    info!("GET {url}: {status}, {} bytes", body.len());

    Ok(body.to_vec())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
