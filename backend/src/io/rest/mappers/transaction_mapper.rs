//! Maps between shared Transaction DTOs and domain transactions.

use shared::{CreateTransactionRequest, Transaction as SharedTransaction};

use crate::domain::commands::transactions::CreateTransactionCommand;
use crate::domain::models::{format_timestamp, Transaction as DomainTransaction};

pub struct TransactionMapper;

impl TransactionMapper {
    /// Converts a domain Transaction model to a shared Transaction DTO.
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            timestamp: format_timestamp(&domain.timestamp),
            id: domain.id,
            amount: domain.amount,
            description: domain.description,
            user_id: domain.user_id,
        }
    }

    /// The owning user comes from the URL path, not the body
    pub fn to_create_command(user_id: String, request: CreateTransactionRequest) -> CreateTransactionCommand {
        CreateTransactionCommand {
            user_id,
            amount: request.amount,
            description: request.description,
        }
    }
}
