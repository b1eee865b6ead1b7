use crate::core::errors::{Error, Result};
use log::info;
use serde_json::{Map, Value};

/*-------------------------------------------------------------------------------------------------
  Extract Service CIDRs
-------------------------------------------------------------------------------------------------*/

/// Parse a provider metadata document and return the CIDR strings listed under `service_key`,
/// in document order.
///
/// Sibling fields are ignored. A document without `service_key` is an error
/// ([Error::MissingServiceKey]); an explicitly empty array is a valid, empty result.
pub fn extract_service_cidrs(raw_json: &[u8], service_key: &str) -> Result<Vec<String>> {
    let mut document: Map<String, Value> =
        serde_json::from_slice(raw_json).map_err(Error::InvalidJson)?;

    let value = document
        .remove(service_key)
        .ok_or_else(|| Error::MissingServiceKey(service_key.to_string()))?;

    let cidrs: Vec<String> =
        serde_json::from_value(value).map_err(|source| Error::InvalidServiceValue {
            key: service_key.to_string(),
            source,
        })?;

    info!("Extracted {} CIDR(s) for service `{service_key}`", cidrs.len());

    Ok(cidrs)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
