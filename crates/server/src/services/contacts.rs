//! Contact management.

use rolodex_core::{ContactId, Username};
use sqlx::SqlitePool;

use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::models::contact::{
    ContactPage, ContactRequest, ContactResponse, Paging, SearchContactsQuery,
};
use crate::validation;

const CONTACT_NOT_FOUND: &str = "contact is not found";

/// Contact operations, always scoped to the authenticated user.
pub struct ContactService<'a> {
    contacts: ContactRepository<'a>,
}

impl<'a> ContactService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
        }
    }

    /// Create a contact for the user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad payload.
    pub async fn create(
        &self,
        username: &Username,
        request: ContactRequest,
    ) -> Result<ContactResponse> {
        let contact = request.validate()?;
        let created = self.contacts.create(username, &contact).await?;
        Ok(ContactResponse::from(created))
    }

    /// Fetch one of the user's contacts.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact does not exist under
    /// this user.
    pub async fn get(&self, username: &Username, id: i64) -> Result<ContactResponse> {
        let id = contact_id(id)?;
        let contact = self
            .contacts
            .get(username, id)
            .await?
            .ok_or_else(not_found)?;
        Ok(ContactResponse::from(contact))
    }

    /// Replace a contact with the request payload.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad payload, or a not-found error
    /// when the contact does not exist under this user.
    pub async fn update(
        &self,
        username: &Username,
        id: i64,
        request: ContactRequest,
    ) -> Result<ContactResponse> {
        let id = contact_id(id)?;
        let contact = request.validate()?;
        let updated = self
            .contacts
            .update(username, id, &contact)
            .await?
            .ok_or_else(not_found)?;
        Ok(ContactResponse::from(updated))
    }

    /// Delete a contact and its addresses.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact does not exist under
    /// this user.
    pub async fn remove(&self, username: &Username, id: i64) -> Result<()> {
        let id = contact_id(id)?;
        if self.contacts.delete(username, id).await? {
            Ok(())
        } else {
            Err(not_found())
        }
    }

    /// Search the user's contacts, returning one page plus paging
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page` or `size` is out of range.
    pub async fn search(
        &self,
        username: &Username,
        query: SearchContactsQuery,
    ) -> Result<ContactPage> {
        let filter = query.validate()?;
        let (contacts, total_item) = self.contacts.search(username, &filter).await?;

        let paging = Paging {
            page: filter.page,
            total_item,
            total_page: filter.total_pages(total_item),
        };

        Ok(ContactPage {
            data: contacts.into_iter().map(ContactResponse::from).collect(),
            paging,
        })
    }
}

fn contact_id(id: i64) -> Result<ContactId> {
    validation::positive_id("contact_id", id)?;
    Ok(ContactId::new(id))
}

fn not_found() -> AppError {
    AppError::NotFound(CONTACT_NOT_FOUND.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{UserRepository, test_pool};

    fn username(value: &str) -> Username {
        Username::parse(value).unwrap()
    }

    fn contact_request(first_name: &str) -> ContactRequest {
        ContactRequest {
            first_name: Some(first_name.to_owned()),
            last_name: None,
            email: None,
            phone: None,
        }
    }

    async fn seed_user(pool: &SqlitePool, name: &str) -> Username {
        let user = username(name);
        UserRepository::new(pool)
            .create(&user, "hash", name)
            .await
            .unwrap();
        user
    }

    #[tokio::test]
    async fn test_create_get_round_trip() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        let created = service
            .create(&user, contact_request("Budi"))
            .await
            .unwrap();
        let fetched = service.get(&user, created.id.as_i64()).await.unwrap();
        assert_eq!(fetched.first_name, "Budi");
    }

    #[tokio::test]
    async fn test_get_rejects_non_positive_id() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        let error = service.get(&user, 0).await.unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));

        let error = service.get(&user, -3).await.unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        let error = service.get(&user, 999).await.unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_checks_id_before_payload() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        // An invalid id wins over an invalid payload.
        let error = service
            .update(
                &user,
                0,
                ContactRequest {
                    first_name: None,
                    last_name: None,
                    email: None,
                    phone: None,
                },
            )
            .await
            .unwrap_err();
        let AppError::Validation(errors) = error else {
            panic!("expected validation error");
        };
        assert_eq!(errors.messages(), ["contact_id must be a positive integer"]);
    }

    #[tokio::test]
    async fn test_update_other_users_contact_is_not_found() {
        let pool = test_pool().await;
        let owner = seed_user(&pool, "owner").await;
        let other = seed_user(&pool, "other").await;
        let service = ContactService::new(&pool);

        let created = service
            .create(&owner, contact_request("Budi"))
            .await
            .unwrap();

        let error = service
            .update(&other, created.id.as_i64(), contact_request("Hijacked"))
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));

        let untouched = service.get(&owner, created.id.as_i64()).await.unwrap();
        assert_eq!(untouched.first_name, "Budi");
    }

    #[tokio::test]
    async fn test_remove_then_remove_again() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        let created = service
            .create(&user, contact_request("Budi"))
            .await
            .unwrap();

        service.remove(&user, created.id.as_i64()).await.unwrap();
        let error = service
            .remove(&user, created.id.as_i64())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_paging_metadata() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        for i in 0..15 {
            service
                .create(&user, contact_request(&format!("Contact {i:02}")))
                .await
                .unwrap();
        }

        let page = service
            .search(
                &user,
                SearchContactsQuery {
                    page: Some(2),
                    size: Some(10),
                    ..SearchContactsQuery::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(page.data.len(), 5);
        assert_eq!(page.paging.page, 2);
        assert_eq!(page.paging.total_item, 15);
        assert_eq!(page.paging.total_page, 2);
    }

    #[tokio::test]
    async fn test_search_empty_result() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "eko").await;
        let service = ContactService::new(&pool);

        let page = service
            .search(&user, SearchContactsQuery::default())
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.paging.page, 1);
        assert_eq!(page.paging.total_item, 0);
        assert_eq!(page.paging.total_page, 0);
    }
}
