pub mod transaction_mapper;
pub mod user_mapper;

use shared::ListRequest;

use crate::domain::commands::ListQuery;

/// Converts the shared list DTO to the domain list query
pub fn to_list_query(request: ListRequest) -> ListQuery {
    ListQuery {
        limit: request.limit,
        starting_after: request.starting_after,
    }
}
