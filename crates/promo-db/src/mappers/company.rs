//! Company entity <-> model mapper

use promo_core::entities::Company;

use crate::models::CompanyModel;

/// Convert CompanyModel to Company entity (the password hash stays behind)
impl From<CompanyModel> for Company {
    fn from(model: CompanyModel) -> Self {
        Company {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
