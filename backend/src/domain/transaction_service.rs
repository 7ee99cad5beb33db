use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::{info, warn};

use crate::domain::commands::transactions::CreateTransactionCommand;
use crate::domain::commands::ListQuery;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{EntityKind, IdMinter};
use crate::domain::models::Transaction;
use crate::domain::pagination::{PageLimits, PageRequest};
use crate::domain::validation;
use crate::storage::{DbConnection, TransactionRepository, UserRepository};

/// Service for creating and reading transactions
#[derive(Clone)]
pub struct TransactionService {
    transactions: TransactionRepository,
    users: UserRepository,
    minter: Arc<IdMinter>,
    limits: PageLimits,
}

impl TransactionService {
    pub fn new(db: DbConnection, minter: Arc<IdMinter>, limits: PageLimits) -> Self {
        Self {
            transactions: TransactionRepository::new(db.clone()),
            users: UserRepository::new(db),
            minter,
            limits,
        }
    }

    /// Create a transaction for an existing user. A missing user fails with
    /// `NotFound` and nothing is written.
    pub async fn create_transaction(
        &self,
        command: CreateTransactionCommand,
    ) -> DomainResult<Transaction> {
        info!(
            "Creating transaction: user_id={}, amount={}",
            command.user_id, command.amount
        );

        self.validate_create_request(&command)?;

        let transaction = Transaction {
            id: self.minter.mint(EntityKind::Transaction),
            amount: command.amount.trim().to_string(),
            description: command.description,
            timestamp: Utc::now().trunc_subsecs(6),
            user_id: command.user_id,
        };

        if let Err(e) = self.transactions.store_transaction(&transaction).await {
            warn!("Failed to store transaction for user {}: {}", transaction.user_id, e);
            return Err(e.into());
        }

        info!(
            "Created transaction: {} for user: {}",
            transaction.id, transaction.user_id
        );
        Ok(transaction)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> DomainResult<Transaction> {
        info!("Getting transaction: {}", transaction_id);

        self.transactions
            .get_transaction(transaction_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Transaction))
    }

    /// List one page of all transactions in ID order
    pub async fn list_transactions(&self, query: ListQuery) -> DomainResult<Vec<Transaction>> {
        let page = PageRequest::new(&self.limits, query.limit, query.starting_after)?;
        info!(
            "Listing transactions: limit={}, starting_after={:?}",
            page.limit(),
            page.starting_after()
        );

        let transactions = self.transactions.list_transactions(&page).await?;

        info!("Found {} transactions", transactions.len());
        Ok(transactions)
    }

    /// List one page of a single user's transactions in ID order
    pub async fn list_user_transactions(
        &self,
        user_id: &str,
        query: ListQuery,
    ) -> DomainResult<Vec<Transaction>> {
        let page = PageRequest::new(&self.limits, query.limit, query.starting_after)?;
        info!(
            "Listing transactions for user {}: limit={}, starting_after={:?}",
            user_id,
            page.limit(),
            page.starting_after()
        );

        if self.users.get_user(user_id).await?.is_none() {
            return Err(DomainError::NotFound(EntityKind::User));
        }

        let transactions = self
            .transactions
            .list_transactions_for_user(user_id, &page)
            .await?;

        info!("Found {} transactions for user {}", transactions.len(), user_id);
        Ok(transactions)
    }

    fn validate_create_request(&self, command: &CreateTransactionCommand) -> DomainResult<()> {
        let mut errors = Vec::new();
        validation::check_amount(&command.amount, &mut errors);
        validation::check_description(&command.description, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}
