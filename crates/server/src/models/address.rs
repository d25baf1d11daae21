//! Address models. Addresses always belong to a contact.

use rolodex_core::{AddressId, ContactId};
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors};

const FIELD_MAX_LENGTH: usize = 200;

/// An address row. Ownership is tracked through `contact_id`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    pub contact_id: ContactId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

/// Raw address payload, shared by create and update since both carry the
/// full schema.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// An address payload that passed validation.
#[derive(Debug)]
pub struct NewAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl AddressRequest {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full message list when `country` or `postal_code` is
    /// missing or any field is over its length limit.
    pub fn validate(self) -> Result<NewAddress, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let street = validation::optional_text(
            &mut errors,
            "street",
            self.street.as_deref(),
            FIELD_MAX_LENGTH,
        );
        let city =
            validation::optional_text(&mut errors, "city", self.city.as_deref(), FIELD_MAX_LENGTH);
        let province = validation::optional_text(
            &mut errors,
            "province",
            self.province.as_deref(),
            FIELD_MAX_LENGTH,
        );
        let country = validation::required_text(
            &mut errors,
            "country",
            self.country.as_deref(),
            FIELD_MAX_LENGTH,
        );
        let postal_code = validation::required_text(
            &mut errors,
            "postal_code",
            self.postal_code.as_deref(),
            FIELD_MAX_LENGTH,
        );

        if let Some(country) = country
            && let Some(postal_code) = postal_code
            && errors.is_empty()
        {
            Ok(NewAddress {
                street,
                city,
                province,
                country,
                postal_code,
            })
        } else {
            Err(errors)
        }
    }
}

/// Public view of an address.
#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub id: AddressId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address_request(
        street: Option<&str>,
        city: Option<&str>,
        province: Option<&str>,
        country: Option<&str>,
        postal_code: Option<&str>,
    ) -> AddressRequest {
        AddressRequest {
            street: street.map(ToOwned::to_owned),
            city: city.map(ToOwned::to_owned),
            province: province.map(ToOwned::to_owned),
            country: country.map(ToOwned::to_owned),
            postal_code: postal_code.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_address_valid_full() {
        let address = address_request(
            Some("Jalan Sudirman 1"),
            Some("Jakarta"),
            Some("DKI Jakarta"),
            Some("Indonesia"),
            Some("12190"),
        )
        .validate()
        .unwrap();
        assert_eq!(address.street.as_deref(), Some("Jalan Sudirman 1"));
        assert_eq!(address.country, "Indonesia");
        assert_eq!(address.postal_code, "12190");
    }

    #[test]
    fn test_address_required_fields_only() {
        let address = address_request(None, None, None, Some("Canada"), Some("K1A 0A6"))
            .validate()
            .unwrap();
        assert!(address.street.is_none());
        assert!(address.city.is_none());
        assert!(address.province.is_none());
    }

    #[test]
    fn test_address_missing_required_fields() {
        let errors = address_request(Some("Jalan Sudirman 1"), None, None, None, None)
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.messages(),
            ["country is required", "postal_code is required"]
        );
    }

    #[test]
    fn test_address_empty_required_fields_rejected() {
        let errors = address_request(None, None, None, Some(""), Some(""))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.messages(),
            ["country is required", "postal_code is required"]
        );
    }

    #[test]
    fn test_address_over_length() {
        let long = "x".repeat(201);
        let errors = address_request(Some(&long), None, None, Some("Canada"), Some(&long))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                "street must be at most 200 characters",
                "postal_code must be at most 200 characters"
            ]
        );
    }

    #[test]
    fn test_address_empty_optionals_treated_as_absent() {
        let address = address_request(Some(""), Some(""), Some(""), Some("Canada"), Some("12345"))
            .validate()
            .unwrap();
        assert!(address.street.is_none());
        assert!(address.city.is_none());
        assert!(address.province.is_none());
    }
}
