use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{MAX_ID_LEN, MAX_TEXT_LEN, exceeds},
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub email: String,
    pub address: String,
    pub products: Vec<CheckoutItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutItem {
    pub id: String,
    pub quantity: i32,
}

impl CheckoutRequest {
    pub fn validate(&self) -> AppResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation("email is invalid".into()));
        }
        if exceeds(&self.email, MAX_TEXT_LEN) {
            return Err(AppError::Validation(format!(
                "email must be at most {MAX_TEXT_LEN} characters"
            )));
        }
        if self.address.trim().is_empty() {
            return Err(AppError::Validation("address is required".into()));
        }
        for item in &self.products {
            if item.id.trim().is_empty() {
                return Err(AppError::Validation("product id is required".into()));
            }
            if exceeds(&item.id, MAX_ID_LEN) {
                return Err(AppError::Validation(format!(
                    "product id must be at most {MAX_ID_LEN} characters"
                )));
            }
            if item.quantity <= 0 {
                return Err(AppError::Validation(format!(
                    "quantity for product {} must be positive",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderRequest {
    pub amount: i64,
    pub bank: String,
    pub account_number: String,
    pub passcode: String,
}

impl ConfirmOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.bank.trim().is_empty() {
            return Err(AppError::Validation("bank is required".into()));
        }
        if exceeds(&self.bank, MAX_TEXT_LEN) {
            return Err(AppError::Validation(format!(
                "bank must be at most {MAX_TEXT_LEN} characters"
            )));
        }
        if self.account_number.trim().is_empty() {
            return Err(AppError::Validation("accountNumber is required".into()));
        }
        if exceeds(&self.account_number, MAX_TEXT_LEN) {
            return Err(AppError::Validation(format!(
                "accountNumber must be at most {MAX_TEXT_LEN} characters"
            )));
        }
        if self.passcode.is_empty() {
            return Err(AppError::Validation("passcode is required".into()));
        }
        Ok(())
    }
}

/// Query string of the passcode-gated order read. A missing passcode is kept
/// empty so it fails verification instead of validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderPasscodeQuery {
    #[serde(default)]
    pub passcode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout(products: Vec<CheckoutItem>) -> CheckoutRequest {
        CheckoutRequest {
            email: "a@b.com".into(),
            address: "X".into(),
            products,
        }
    }

    #[test]
    fn checkout_accepts_positive_quantities() {
        let req = checkout(vec![CheckoutItem {
            id: "p1".into(),
            quantity: 2,
        }]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn checkout_rejects_non_positive_quantity() {
        for quantity in [0, -3] {
            let req = checkout(vec![CheckoutItem {
                id: "p1".into(),
                quantity,
            }]);
            assert!(matches!(req.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn checkout_rejects_bad_contact_fields() {
        let mut req = checkout(vec![]);
        req.email = "not-an-email".into();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let mut req = checkout(vec![]);
        req.address = "   ".into();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn checkout_rejects_values_wider_than_their_columns() {
        let mut req = checkout(vec![]);
        req.email = format!("{}@b.com", "a".repeat(MAX_TEXT_LEN));
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let req = checkout(vec![CheckoutItem {
            id: "p".repeat(MAX_ID_LEN + 1),
            quantity: 1,
        }]);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let mut req = checkout(vec![CheckoutItem {
            id: "p".repeat(MAX_ID_LEN),
            quantity: 1,
        }]);
        req.email = format!("{}@b.co", "a".repeat(MAX_TEXT_LEN - 5));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn confirm_rejects_values_wider_than_their_columns() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let base = ConfirmOrderRequest {
            amount: 2000,
            bank: "BCA".into(),
            account_number: "1234567890".into(),
            passcode: "aB3xZ".into(),
        };

        let mut req = base.clone();
        req.bank = long.clone();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let mut req = base.clone();
        req.account_number = long;
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let mut req = base;
        req.bank = "é".repeat(MAX_TEXT_LEN);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn confirm_payload_uses_camel_case() {
        let req: ConfirmOrderRequest = serde_json::from_value(serde_json::json!({
            "amount": 2000,
            "bank": "BCA",
            "accountNumber": "1234567890",
            "passcode": "aB3xZ"
        }))
        .unwrap();
        assert_eq!(req.account_number, "1234567890");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn confirm_payload_requires_every_field() {
        let missing = serde_json::from_value::<ConfirmOrderRequest>(serde_json::json!({
            "amount": 2000,
            "bank": "BCA",
            "passcode": "aB3xZ"
        }));
        assert!(missing.is_err());

        let blank = ConfirmOrderRequest {
            amount: 2000,
            bank: " ".into(),
            account_number: "1".into(),
            passcode: "aB3xZ".into(),
        };
        assert!(matches!(blank.validate(), Err(AppError::Validation(_))));
    }
}
