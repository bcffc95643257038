//! # Portal Services
//!
//! One service per portal, each a thin set of typed calls over the shared
//! [`RequestGateway`](crate::gateway::RequestGateway).
//!
//! Authenticated calls pick their bearer token in this order:
//! 1. a token passed to the call
//! 2. the token stored on the service
//! 3. the token stored on the gateway
//!
//! With none of those available the call fails with `AuthMissing`.

pub mod admin;
pub mod endpoints;
pub mod member;
pub mod partner;

pub use admin::AdminPortalService;
pub use member::MemberPortalService;
pub use partner::PartnerPortalService;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HarnessError, Result};
use crate::gateway::RequestGateway;

/// Keys under which list endpoints wrap their items
const LIST_KEYS: [&str; 4] = ["entities", "data", "items", "result"];

/// Bearer token held by a service
#[derive(Debug, Default)]
pub struct TokenSlot(RwLock<Option<String>>);

impl TokenSlot {
    pub fn set(&self, token: impl Into<String>) {
        *self.0.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.0.write() = None;
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }

    /// Token for `operation`: explicit, then stored, then the gateway's
    pub fn resolve(
        &self,
        explicit: Option<&str>,
        gateway: &RequestGateway,
        operation: &str,
    ) -> Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.get())
            .or_else(|| gateway.auth_token())
            .ok_or_else(|| HarnessError::auth_missing(operation))
    }
}

/// Decode a list that may arrive bare or wrapped in a paging object.
///
/// `null` is an empty list. An object without one of the known list keys is
/// a decode error.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value, context: &str) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut fields) => {
            match LIST_KEYS
                .iter()
                .find_map(|key| fields.remove(*key).filter(Value::is_array))
            {
                Some(items) => items,
                None => {
                    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
                    return Err(HarnessError::decode(
                        context,
                        serde::de::Error::custom(format!(
                            "no list under any of {:?}, found keys {:?}",
                            LIST_KEYS, keys
                        )),
                    ));
                }
            }
        }
        Value::Null => Value::Array(Vec::new()),
        other => {
            return Err(HarnessError::decode(
                context,
                serde::de::Error::custom(format!("expected a list, got {}", other)),
            ))
        }
    };
    serde_json::from_value(items).map_err(|err| HarnessError::decode(context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::json;

    fn gateway() -> RequestGateway {
        RequestGateway::new(&ApiConfig {
            base_url: "https://api.portal.example".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_token_precedence() {
        let gateway = gateway();
        let slot = TokenSlot::default();

        assert!(slot.resolve(None, &gateway, "listing").unwrap_err().is_auth_missing());

        gateway.set_auth_token("from-gateway");
        assert_eq!(slot.resolve(None, &gateway, "listing").unwrap(), "from-gateway");

        slot.set("from-service");
        assert_eq!(slot.resolve(None, &gateway, "listing").unwrap(), "from-service");
        assert_eq!(
            slot.resolve(Some("explicit"), &gateway, "listing").unwrap(),
            "explicit"
        );
    }

    #[test]
    fn test_decode_list_shapes() {
        let bare: Vec<u32> = decode_list(json!([1, 2]), "numbers").unwrap();
        let wrapped: Vec<u32> = decode_list(json!({"total": 2, "entities": [3, 4]}), "numbers").unwrap();
        let empty: Vec<u32> = decode_list(json!({"total": 0, "items": []}), "numbers").unwrap();
        let null: Vec<u32> = decode_list(Value::Null, "numbers").unwrap();

        assert_eq!(bare, vec![1, 2]);
        assert_eq!(wrapped, vec![3, 4]);
        assert!(empty.is_empty());
        assert!(null.is_empty());
        assert!(decode_list::<u32>(json!("nope"), "numbers").is_err());
    }

    #[test]
    fn test_decode_list_rejects_unknown_wrapper() {
        let err = decode_list::<u32>(json!({"total": 2, "records": [1, 2]}), "department list")
            .unwrap_err();
        assert!(matches!(err, HarnessError::Decode { .. }), "{:?}", err);
        assert!(err.to_string().contains("department list"));
        assert!(err.to_string().contains("records"));

        let err = decode_list::<u32>(json!({"entities": null}), "numbers").unwrap_err();
        assert!(matches!(err, HarnessError::Decode { .. }));
    }
}
