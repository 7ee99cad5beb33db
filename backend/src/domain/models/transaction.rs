use chrono::{DateTime, Utc};

/// A financial record owned by exactly one user. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    /// Decimal amount kept as text, exactly as submitted
    pub amount: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Owning user. The reverse direction is a query, not a field on `User`.
    pub user_id: String,
}
