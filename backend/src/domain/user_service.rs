use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::{info, warn};

use crate::domain::commands::users::CreateUserCommand;
use crate::domain::commands::ListQuery;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{EntityKind, IdMinter};
use crate::domain::models::User;
use crate::domain::pagination::{PageLimits, PageRequest};
use crate::domain::validation;
use crate::storage::{DbConnection, UserRepository};

/// Service for creating and reading users
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    minter: Arc<IdMinter>,
    limits: PageLimits,
}

impl UserService {
    pub fn new(db: DbConnection, minter: Arc<IdMinter>, limits: PageLimits) -> Self {
        Self {
            users: UserRepository::new(db),
            minter,
            limits,
        }
    }

    /// Create a new user
    pub async fn create_user(&self, command: CreateUserCommand) -> DomainResult<User> {
        info!("Creating user: name={}, email={}", command.name, command.email);

        self.validate_create_request(&command)?;

        let user = User {
            id: self.minter.mint(EntityKind::User),
            name: command.name.trim().to_string(),
            email: command.email.trim().to_string(),
            created_at: Utc::now().trunc_subsecs(6),
        };

        if let Err(e) = self.users.store_user(&user).await {
            warn!("Failed to store user {}: {}", user.email, e);
            return Err(e.into());
        }

        info!("Created user: {} with ID: {}", user.name, user.id);
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        info!("Getting user: {}", user_id);

        self.users
            .get_user(user_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::User))
    }

    /// List one page of users in ID order
    pub async fn list_users(&self, query: ListQuery) -> DomainResult<Vec<User>> {
        let page = PageRequest::new(&self.limits, query.limit, query.starting_after)?;
        info!("Listing users: limit={}, starting_after={:?}", page.limit(), page.starting_after());

        let users = self.users.list_users(&page).await?;

        info!("Found {} users", users.len());
        Ok(users)
    }

    fn validate_create_request(&self, command: &CreateUserCommand) -> DomainResult<()> {
        let mut errors = Vec::new();
        validation::check_name(&command.name, &mut errors);
        validation::check_email(&command.email, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}
