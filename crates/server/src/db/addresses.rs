//! Address persistence.

use rolodex_core::{AddressId, ContactId};
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::address::{Address, NewAddress};

/// Queries against the `addresses` table.
///
/// Every query is scoped to the owning contact; caller-side ownership of
/// that contact is checked a layer up.
pub struct AddressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AddressRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an address under the given contact.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn create(
        &self,
        contact_id: ContactId,
        address: &NewAddress,
    ) -> Result<Address, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(
            "INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, contact_id, street, city, province, country, postal_code",
        )
        .bind(contact_id)
        .bind(address.street.as_deref())
        .bind(address.city.as_deref())
        .bind(address.province.as_deref())
        .bind(&address.country)
        .bind(&address.postal_code)
        .fetch_one(self.pool)
        .await?;

        Ok(address)
    }

    /// Fetch an address belonging to the given contact.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn get(
        &self,
        contact_id: ContactId,
        id: AddressId,
    ) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, contact_id, street, city, province, country, postal_code
             FROM addresses WHERE id = ? AND contact_id = ?",
        )
        .bind(id)
        .bind(contact_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Overwrite an address in place, returning the new row.
    ///
    /// The linkage check and the write are a single statement. `None`
    /// means the address does not exist under this contact.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn update(
        &self,
        contact_id: ContactId,
        id: AddressId,
        address: &NewAddress,
    ) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(
            "UPDATE addresses
             SET street = ?, city = ?, province = ?, country = ?, postal_code = ?
             WHERE id = ? AND contact_id = ?
             RETURNING id, contact_id, street, city, province, country, postal_code",
        )
        .bind(address.street.as_deref())
        .bind(address.city.as_deref())
        .bind(address.province.as_deref())
        .bind(&address.country)
        .bind(&address.postal_code)
        .bind(id)
        .bind(contact_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Delete an address. Returns `false` when it does not exist under
    /// this contact.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn delete(
        &self,
        contact_id: ContactId,
        id: AddressId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ? AND contact_id = ?")
            .bind(id)
            .bind(contact_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All addresses of a contact, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn list(&self, contact_id: ContactId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT id, contact_id, street, city, province, country, postal_code
             FROM addresses WHERE contact_id = ? ORDER BY id",
        )
        .bind(contact_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rolodex_core::Username;

    use super::*;
    use crate::db::{ContactRepository, UserRepository, test_pool};
    use crate::models::contact::NewContact;

    fn new_address(street: Option<&str>) -> NewAddress {
        NewAddress {
            street: street.map(ToOwned::to_owned),
            city: None,
            province: None,
            country: "Indonesia".to_owned(),
            postal_code: "12190".to_owned(),
        }
    }

    async fn seed_contact(pool: &SqlitePool, first_name: &str) -> ContactId {
        let username = Username::parse("eko").unwrap();
        let users = UserRepository::new(pool);
        if users.get_by_username(&username).await.unwrap().is_none() {
            users.create(&username, "hash", "Eko").await.unwrap();
        }

        let contact = ContactRepository::new(pool)
            .create(
                &username,
                &NewContact {
                    first_name: first_name.to_owned(),
                    last_name: None,
                    email: None,
                    phone: None,
                },
            )
            .await
            .unwrap();
        contact.id
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_pool().await;
        let contact_id = seed_contact(&pool, "Budi").await;
        let repo = AddressRepository::new(&pool);

        let created = repo
            .create(contact_id, &new_address(Some("Jalan Sudirman 1")))
            .await
            .unwrap();
        assert_eq!(created.contact_id, contact_id);

        let fetched = repo.get(contact_id, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.street.as_deref(), Some("Jalan Sudirman 1"));
        assert_eq!(fetched.country, "Indonesia");
        assert_eq!(fetched.postal_code, "12190");
    }

    #[tokio::test]
    async fn test_get_scoped_to_contact() {
        let pool = test_pool().await;
        let first = seed_contact(&pool, "Budi").await;
        let second = seed_contact(&pool, "Santi").await;
        let repo = AddressRepository::new(&pool);

        let address = repo.create(first, &new_address(None)).await.unwrap();

        assert!(repo.get(first, address.id).await.unwrap().is_some());
        assert!(repo.get(second, address.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_scoped_to_contact() {
        let pool = test_pool().await;
        let first = seed_contact(&pool, "Budi").await;
        let second = seed_contact(&pool, "Santi").await;
        let repo = AddressRepository::new(&pool);

        let address = repo.create(first, &new_address(None)).await.unwrap();

        let stolen = repo
            .update(second, address.id, &new_address(Some("Hijacked")))
            .await
            .unwrap();
        assert!(stolen.is_none());

        let updated = repo
            .update(first, address.id, &new_address(Some("Jalan Thamrin 9")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.street.as_deref(), Some("Jalan Thamrin 9"));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let contact_id = seed_contact(&pool, "Budi").await;
        let repo = AddressRepository::new(&pool);

        let address = repo.create(contact_id, &new_address(None)).await.unwrap();

        assert!(repo.delete(contact_id, address.id).await.unwrap());
        assert!(!repo.delete(contact_id, address.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let pool = test_pool().await;
        let contact_id = seed_contact(&pool, "Budi").await;
        let repo = AddressRepository::new(&pool);

        repo.create(contact_id, &new_address(Some("First")))
            .await
            .unwrap();
        repo.create(contact_id, &new_address(Some("Second")))
            .await
            .unwrap();

        let addresses = repo.list(contact_id).await.unwrap();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].street.as_deref(), Some("First"));
        assert_eq!(addresses[1].street.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn test_deleting_contact_cascades() {
        let pool = test_pool().await;
        let contact_id = seed_contact(&pool, "Budi").await;
        let repo = AddressRepository::new(&pool);

        let address = repo.create(contact_id, &new_address(None)).await.unwrap();

        ContactRepository::new(&pool)
            .delete(&Username::parse("eko").unwrap(), contact_id)
            .await
            .unwrap();

        assert!(repo.get(contact_id, address.id).await.unwrap().is_none());
        assert!(repo.list(contact_id).await.unwrap().is_empty());
    }
}
