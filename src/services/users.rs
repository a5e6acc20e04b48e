use crate::models::user::PublicUser;
use crate::store::{paths, validate_id, DocumentStore, StoreError};

/// Public profile of `user_id`, or `None` if no such user exists.
pub async fn get_public_user<S>(store: &S, user_id: &str) -> Result<Option<PublicUser>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let doc = store.fetch_document(&paths::user(validate_id(user_id)?)).await?;
    Ok(doc.map(|doc| PublicUser {
        display_name: doc.str_field("displayName").unwrap_or_default().to_string(),
        email: doc.str_field("email").unwrap_or_default().to_string(),
    }))
}
