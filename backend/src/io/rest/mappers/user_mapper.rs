//! Maps between shared User DTOs and domain users.

use shared::{CreateUserRequest, User as SharedUser};

use crate::domain::commands::users::CreateUserCommand;
use crate::domain::models::{format_timestamp, User as DomainUser};

pub struct UserMapper;

impl UserMapper {
    /// Converts a domain User model to a shared User DTO.
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            created_at: format_timestamp(&domain.created_at),
            id: domain.id,
            name: domain.name,
            email: domain.email,
        }
    }

    pub fn to_create_command(request: CreateUserRequest) -> CreateUserCommand {
        CreateUserCommand {
            name: request.name,
            email: request.email,
        }
    }
}
