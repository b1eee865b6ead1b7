use crate::core::errors::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/*-------------------------------------------------------------------------------------------------
  Key-Order Normalizer
-------------------------------------------------------------------------------------------------*/

/// Top-level field order of a generated policy document.
pub const POLICY_KEY_ORDER: [&str; 3] = ["Version", "Id", "Statement"];

/// Serialize `pairs` as a JSON object whose keys appear exactly in the given order.
///
/// Pairs are written verbatim; duplicate keys are not merged. With `minify` the output has no
/// insignificant whitespace, otherwise it is indented by two spaces per nesting level.
///
/// ```
/// use serde_json::json;
///
/// let pairs = [("b", json!(1)), ("a", json!([true]))];
/// let document = ipfilter::reorder_top_level(&pairs, true).unwrap();
/// assert_eq!(document, br#"{"b":1,"a":[true]}"#);
/// ```
pub fn reorder_top_level<K, V>(pairs: &[(K, V)], minify: bool) -> Result<Vec<u8>>
where
    K: AsRef<str>,
    V: Serialize,
{
    let object = OrderedObject(pairs);
    if minify {
        serde_json::to_vec(&object)
    } else {
        serde_json::to_vec_pretty(&object)
    }
    .map_err(Error::Serialization)
}

/// Pull `keys` out of a decoded JSON object, in the order given, as input for
/// [reorder_top_level]. Fields not named in `keys` are left out.
pub fn policy_key_order(
    mut decoded: Map<String, Value>,
    keys: &[&str],
) -> Result<Vec<(String, Value)>> {
    keys.iter()
        .map(|&key| {
            decoded
                .remove(key)
                .map(|value| (key.to_string(), value))
                .ok_or_else(|| Error::MissingPolicyField(key.to_string()))
        })
        .collect()
}

/*--------------------------------------------------------------------------------------
  Ordered Object
--------------------------------------------------------------------------------------*/

struct OrderedObject<'p, K, V>(&'p [(K, V)]);

impl<K, V> Serialize for OrderedObject<'_, K, V>
where
    K: AsRef<str>,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key.as_ref(), value)?;
        }
        map.end()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
