//! Comment entity <-> model mapper

use promo_core::entities::PromoComment;
use promo_core::traits::CommentWithAuthor;

use crate::models::{CommentModel, CommentWithAuthorModel};

/// Convert CommentModel to PromoComment entity
impl From<CommentModel> for PromoComment {
    fn from(model: CommentModel) -> Self {
        PromoComment {
            id: model.id,
            promo_id: model.promo_id,
            author_id: model.author_id,
            text: model.text,
            date: model.date,
        }
    }
}

/// Convert a joined comment row into the read model
impl From<CommentWithAuthorModel> for CommentWithAuthor {
    fn from(model: CommentWithAuthorModel) -> Self {
        CommentWithAuthor {
            comment: PromoComment {
                id: model.id,
                promo_id: model.promo_id,
                author_id: model.author_id,
                text: model.text,
                date: model.date,
            },
            author_name: model.author_name,
            author_surname: model.author_surname,
            author_avatar_url: model.author_avatar_url,
        }
    }
}
