//! POS customers and the quick-add form.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::phone::digits;
use crate::types::{CustomerId, Phone};

/// A customer as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
}

impl Customer {
    /// Whether this customer matches a search typed at the counter.
    ///
    /// Names match case-insensitively on any substring. Phones match on
    /// digits only, so `"01711-22"` finds `"01711 223344"`. A blank query
    /// matches everyone.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        if self.name.to_lowercase().contains(&query.to_lowercase()) {
            return true;
        }
        let query_digits = digits(query);
        !query_digits.is_empty() && digits(&self.phone).contains(&query_digits)
    }
}

/// Customers matching `query`, in list order.
#[must_use]
pub fn search_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    customers.iter().filter(|c| c.matches(query)).collect()
}

/// Body of `POST /api/quick-add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCustomer {
    name: String,
    phone: Phone,
}

impl NewCustomer {
    /// Validate the quick-add form.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingCustomerDetails`] if either field is blank,
    /// [`ValidationError::Phone`] if the phone is malformed.
    pub fn new(name: &str, phone: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() || phone.trim().is_empty() {
            return Err(ValidationError::MissingCustomerDetails);
        }
        Ok(Self {
            name: name.to_owned(),
            phone: Phone::parse(phone)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn phone(&self) -> &Phone {
        &self.phone
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::PhoneError;

    #[test]
    fn test_new_customer_trims() {
        let customer = NewCustomer::new("  Rahim Uddin ", " 01711-223344").unwrap();
        assert_eq!(customer.name(), "Rahim Uddin");
        assert_eq!(customer.phone().as_str(), "01711-223344");
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            serde_json::json!({"name": "Rahim Uddin", "phone": "01711-223344"})
        );
    }

    #[test]
    fn test_new_customer_requires_both() {
        for (name, phone) in [("", "01711223344"), ("Rahim", "  "), (" ", "")] {
            let err = NewCustomer::new(name, phone).unwrap_err();
            assert_eq!(err, ValidationError::MissingCustomerDetails);
            assert_eq!(err.to_string(), "Name and Phone are required");
        }
    }

    #[test]
    fn test_new_customer_rejects_bad_phone() {
        assert_eq!(
            NewCustomer::new("Rahim", "01711 abc").unwrap_err(),
            ValidationError::Phone(PhoneError::InvalidCharacter('a'))
        );
    }

    fn stored(id: i32, name: &str, phone: &str) -> Customer {
        Customer {
            customer_id: CustomerId::new(id),
            name: name.to_owned(),
            phone: phone.to_owned(),
            email: None,
            billing_address: None,
        }
    }

    #[test]
    fn test_search_by_name_and_phone() {
        let customers = [
            stored(1, "Rahim Uddin", "01711 223344"),
            stored(2, "Karim Ahmed", "+880-1811-000000"),
            stored(3, "Nasrin", "01911555666"),
        ];
        let ids = |query: &str| -> Vec<i32> {
            search_customers(&customers, query)
                .iter()
                .map(|c| c.customer_id.into())
                .collect()
        };

        assert_eq!(ids("im"), vec![1, 2]);
        assert_eq!(ids("KARIM"), vec![2]);
        assert_eq!(ids("01711-22"), vec![1]);
        assert_eq!(ids("1811 000"), vec![2]);
        assert_eq!(ids("  "), vec![1, 2, 3]);
        assert!(ids("Zaman").is_empty());
        // A query without digits never matches on phone alone.
        assert!(ids("-").is_empty());
    }

    #[test]
    fn test_customer_from_backend() {
        let customer: Customer = serde_json::from_value(serde_json::json!({
            "customerId": 12,
            "name": "Karim",
            "phone": "01811000000",
            "email": null
        }))
        .unwrap();
        assert_eq!(customer.customer_id, CustomerId::new(12));
        assert_eq!(customer.email, None);
    }
}
