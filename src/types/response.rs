use serde::Serialize;
use utoipa::ToSchema;

use crate::types::User as StoredUser;

#[derive(Serialize, ToSchema)]
pub(crate) struct User {
    pub(crate) id: u32,
    pub(crate) username: String,
    pub(crate) role: String,
}

impl From<&StoredUser> for User {
    fn from(user: &StoredUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub(crate) struct Login {
    pub(crate) user: User,
    pub(crate) token: String,
}

#[derive(Serialize, ToSchema)]
pub(crate) struct Me {
    pub(crate) username: String,
    pub(crate) role: String,
}
