pub mod auth;
pub mod profile;

use serde::{Deserialize, Serialize};

/// Response envelope used by every admin API endpoint.
///
/// `code == 0` or `code == 200` means success; anything else carries a
/// human-readable `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub data: T,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0 || self.code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn envelope_without_data_defaults() {
        let resp: ApiResponse<Value> =
            serde_json::from_value(json!({"code": 200, "message": "done"})).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.data, Value::Null);
    }

    #[test]
    fn non_zero_code_is_failure() {
        let resp: ApiResponse<Value> =
            serde_json::from_value(json!({"code": 40101, "data": null})).unwrap();
        assert!(!resp.is_success());
        assert!(resp.message.is_empty());
    }
}
