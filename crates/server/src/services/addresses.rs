//! Address management.
//!
//! Every operation first resolves the contact under the authenticated
//! user, so an address can never be reached through someone else's
//! contact.

use rolodex_core::{AddressId, ContactId, Username};
use sqlx::SqlitePool;

use crate::db::{AddressRepository, ContactRepository};
use crate::error::{AppError, Result};
use crate::models::address::{AddressRequest, AddressResponse};
use crate::validation;

const CONTACT_NOT_FOUND: &str = "contact is not found";
const ADDRESS_NOT_FOUND: &str = "address is not found";

/// Address operations, scoped to a contact owned by the user.
pub struct AddressService<'a> {
    contacts: ContactRepository<'a>,
    addresses: AddressRepository<'a>,
}

impl<'a> AddressService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
            addresses: AddressRepository::new(pool),
        }
    }

    /// Add an address to a contact.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact does not exist under
    /// this user, or a validation error for a bad payload.
    pub async fn create(
        &self,
        username: &Username,
        contact_id: i64,
        request: AddressRequest,
    ) -> Result<AddressResponse> {
        let contact_id = self.check_contact(username, contact_id).await?;
        let address = request.validate()?;
        let created = self.addresses.create(contact_id, &address).await?;
        Ok(AddressResponse::from(created))
    }

    /// Fetch one address of a contact.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact or the address does not
    /// exist under this user.
    pub async fn get(
        &self,
        username: &Username,
        contact_id: i64,
        id: i64,
    ) -> Result<AddressResponse> {
        let contact_id = self.check_contact(username, contact_id).await?;
        let id = address_id(id)?;
        let address = self
            .addresses
            .get(contact_id, id)
            .await?
            .ok_or_else(address_not_found)?;
        Ok(AddressResponse::from(address))
    }

    /// Replace an address with the request payload.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact or the address does not
    /// exist under this user, or a validation error for a bad payload.
    pub async fn update(
        &self,
        username: &Username,
        contact_id: i64,
        id: i64,
        request: AddressRequest,
    ) -> Result<AddressResponse> {
        let contact_id = self.check_contact(username, contact_id).await?;
        let id = address_id(id)?;
        let address = request.validate()?;
        let updated = self
            .addresses
            .update(contact_id, id, &address)
            .await?
            .ok_or_else(address_not_found)?;
        Ok(AddressResponse::from(updated))
    }

    /// Delete one address of a contact.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact or the address does not
    /// exist under this user.
    pub async fn remove(&self, username: &Username, contact_id: i64, id: i64) -> Result<()> {
        let contact_id = self.check_contact(username, contact_id).await?;
        let id = address_id(id)?;
        if self.addresses.delete(contact_id, id).await? {
            Ok(())
        } else {
            Err(address_not_found())
        }
    }

    /// List all addresses of a contact, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the contact does not exist under
    /// this user.
    pub async fn list(
        &self,
        username: &Username,
        contact_id: i64,
    ) -> Result<Vec<AddressResponse>> {
        let contact_id = self.check_contact(username, contact_id).await?;
        let addresses = self.addresses.list(contact_id).await?;
        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    /// Resolve the contact under this user before touching its addresses.
    async fn check_contact(&self, username: &Username, contact_id: i64) -> Result<ContactId> {
        validation::positive_id("contact_id", contact_id)?;
        let contact_id = ContactId::new(contact_id);

        if self.contacts.exists(username, contact_id).await? {
            Ok(contact_id)
        } else {
            Err(AppError::NotFound(CONTACT_NOT_FOUND.to_owned()))
        }
    }
}

fn address_id(id: i64) -> Result<AddressId> {
    validation::positive_id("address_id", id)?;
    Ok(AddressId::new(id))
}

fn address_not_found() -> AppError {
    AppError::NotFound(ADDRESS_NOT_FOUND.to_owned())
}
