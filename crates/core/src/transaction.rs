use serde::{Deserialize, Serialize};

/// The slice of a transaction the categorizer looks at. Amount, date and the
/// rest of the row stay with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub id: String,
    pub description: String,
}

impl TxInput {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        TxInput {
            id: id.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_ignoring_extra_fields() {
        let tx: TxInput = serde_json::from_str(
            r#"{"id":"t1","description":"UBER TRIP","amount":29.9,"date":"2024-01-15"}"#,
        )
        .unwrap();
        assert_eq!(tx, TxInput::new("t1", "UBER TRIP"));
    }
}
