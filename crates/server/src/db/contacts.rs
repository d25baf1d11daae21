//! Contact persistence, including filtered search.

use rolodex_core::{ContactId, Email, Username};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepositoryError;
use crate::models::contact::{Contact, ContactFilter, NewContact};

/// Queries against the `contacts` table.
///
/// Every query is scoped to the owning username, so a caller can never
/// observe or modify another user's contacts.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a contact for the given owner.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn create(
        &self,
        username: &Username,
        contact: &NewContact,
    ) -> Result<Contact, RepositoryError> {
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (username, first_name, last_name, email, phone)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, username, first_name, last_name, email, phone",
        )
        .bind(username.as_str())
        .bind(&contact.first_name)
        .bind(contact.last_name.as_deref())
        .bind(contact.email.as_ref().map(Email::as_str))
        .bind(contact.phone.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(contact)
    }

    /// Fetch a contact owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn get(
        &self,
        username: &Username,
        id: ContactId,
    ) -> Result<Option<Contact>, RepositoryError> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT id, username, first_name, last_name, email, phone
             FROM contacts WHERE id = ? AND username = ?",
        )
        .bind(id)
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(contact)
    }

    /// Whether a contact exists under the given owner.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn exists(
        &self,
        username: &Username,
        id: ContactId,
    ) -> Result<bool, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contacts WHERE id = ? AND username = ?",
        )
        .bind(id)
        .bind(username.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Overwrite a contact in place, returning the new row.
    ///
    /// The ownership check and the write are a single statement, so a
    /// concurrent delete cannot slip between them. `None` means the
    /// contact does not exist under this owner.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn update(
        &self,
        username: &Username,
        id: ContactId,
        contact: &NewContact,
    ) -> Result<Option<Contact>, RepositoryError> {
        let contact = sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET first_name = ?, last_name = ?, email = ?, phone = ?
             WHERE id = ? AND username = ?
             RETURNING id, username, first_name, last_name, email, phone",
        )
        .bind(&contact.first_name)
        .bind(contact.last_name.as_deref())
        .bind(contact.email.as_ref().map(Email::as_str))
        .bind(contact.phone.as_deref())
        .bind(id)
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(contact)
    }

    /// Delete a contact and its addresses. Returns `false` when the
    /// contact does not exist under this owner.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn delete(
        &self,
        username: &Username,
        id: ContactId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ? AND username = ?")
            .bind(id)
            .bind(username.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Search the owner's contacts, returning one page of rows plus the
    /// total match count.
    ///
    /// # Errors
    ///
    /// Returns an error when a query fails.
    pub async fn search(
        &self,
        username: &Username,
        filter: &ContactFilter,
    ) -> Result<(Vec<Contact>, u64), RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, username, first_name, last_name, email, phone
             FROM contacts WHERE username = ",
        );
        query.push_bind(username.as_str());
        push_filters(&mut query, filter);
        query.push(" ORDER BY id LIMIT ");
        query.push_bind(i64::from(filter.size));
        query.push(" OFFSET ");
        query.push_bind(filter.offset());

        let contacts = query
            .build_query_as::<Contact>()
            .fetch_all(self.pool)
            .await?;

        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM contacts WHERE username = ",
        );
        count.push_bind(username.as_str());
        push_filters(&mut count, filter);

        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok((contacts, u64::try_from(total).unwrap_or_default()))
    }
}

/// Append the filter clauses. Shared by the row and count queries so both
/// always see identical conditions.
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &ContactFilter) {
    if let Some(name) = &filter.name {
        let pattern = like_pattern(name);
        query.push(" AND (first_name LIKE ");
        query.push_bind(pattern.clone());
        query.push(" ESCAPE '\\' OR last_name LIKE ");
        query.push_bind(pattern);
        query.push(" ESCAPE '\\')");
    }
    if let Some(email) = &filter.email {
        query.push(" AND email LIKE ");
        query.push_bind(like_pattern(email));
        query.push(" ESCAPE '\\'");
    }
    if let Some(phone) = &filter.phone {
        query.push(" AND phone LIKE ");
        query.push_bind(like_pattern(phone));
        query.push(" ESCAPE '\\'");
    }
}

/// Escape LIKE wildcards in a user-supplied term and wrap it for
/// substring matching.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
