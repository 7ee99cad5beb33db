//! Domain-level command and query types.
//! The REST layer maps the public DTOs from the `shared` crate to these.

pub mod users {
    /// Input for creating a new user
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CreateUserCommand {
        pub name: String,
        pub email: String,
    }
}

pub mod transactions {
    /// Input for creating a transaction under an existing user
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CreateTransactionCommand {
        pub user_id: String,
        pub amount: String,
        pub description: String,
    }
}

/// Raw list parameters, validated into a
/// [`PageRequest`](crate::domain::pagination::PageRequest) by the services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub starting_after: Option<String>,
}
