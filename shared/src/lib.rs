use serde::{Deserialize, Serialize};

/// A user (account) as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Minted identifier, e.g. "user_0192a3b4c5d6e7f80a1b"
    pub id: String,
    pub name: String,
    pub email: String,
    /// RFC 3339 timestamp in UTC with microsecond precision
    pub created_at: String,
}

/// A transaction as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Decimal amount, always a JSON string so no precision is lost
    pub amount: String,
    pub description: String,
    /// RFC 3339 timestamp in UTC with microsecond precision
    pub timestamp: String,
    /// ID of the user this transaction belongs to
    pub user_id: String,
}

/// Body of POST /api/v1/users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Body of POST /api/v1/users/{user_id}/transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

/// Query parameters accepted by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Page size, 1 to 100 by default configuration
    pub limit: Option<i64>,
    /// Cursor: the ID of the last item of the previous page
    pub starting_after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of 404, 409 and 500 responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Body of 422 responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldErrorDetail>,
}

/// One rejected field, located as ["body" | "query" | "path", field]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_amount_serializes_as_string() {
        let tx = Transaction {
            id: "txn_0192a3b4c5d6deadbeef".to_string(),
            amount: "100.00".to_string(),
            description: "Payment for services".to_string(),
            timestamp: "2025-06-14T10:00:00.000000Z".to_string(),
            user_id: "user_0192a3b4c5d6cafebabe".to_string(),
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["amount"], serde_json::Value::String("100.00".to_string()));
        assert_eq!(json["user_id"], "user_0192a3b4c5d6cafebabe");
    }

    #[test]
    fn test_create_transaction_request_description_defaults_to_empty() {
        let request: CreateTransactionRequest =
            serde_json::from_str(r#"{"amount": "5.25"}"#).unwrap();
        assert_eq!(request.amount, "5.25");
        assert_eq!(request.description, "");
    }

    #[test]
    fn test_user_field_names() {
        let user = User {
            id: "user_1".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            created_at: "2025-06-14T10:00:00.000000Z".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["created_at", "email", "id", "name"]);
    }
}
