//! User entity <-> model mapper

use promo_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity (the password hash stays behind)
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            surname: model.surname,
            email: model.email,
            avatar_url: model.avatar_url,
            other: model.other.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
