use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: i64,
}

/// Soft-delete state of a catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Active,
    Deleted,
}

impl ProductStatus {
    pub fn from_deleted_flag(is_deleted: bool) -> Self {
        if is_deleted {
            ProductStatus::Deleted
        } else {
            ProductStatus::Active
        }
    }

    pub fn is_deleted(self) -> bool {
        self == ProductStatus::Deleted
    }
}

/// Order lifecycle; the only transition is Unpaid -> Paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Unpaid,
    Paid,
}

impl OrderStatus {
    pub fn from_paid_at<T>(paid_at: Option<&T>) -> Self {
        if paid_at.is_some() {
            OrderStatus::Paid
        } else {
            OrderStatus::Unpaid
        }
    }
}

/// Payment recorded by a successful confirmation. The three payment columns of
/// an order are only ever written from one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub paid_at: DateTime<Utc>,
    pub bank: String,
    pub account_number: String,
}

impl Payment {
    pub fn new(paid_at: DateTime<Utc>, bank: String, account_number: String) -> Self {
        Self {
            paid_at,
            bank,
            account_number,
        }
    }

    /// Rebuild a payment from nullable columns; anything short of all three yields `None`.
    pub fn from_columns(
        paid_at: Option<DateTime<Utc>>,
        bank: Option<String>,
        account_number: Option<String>,
    ) -> Option<Self> {
        match (paid_at, bank, account_number) {
            (Some(paid_at), Some(bank), Some(account_number)) => {
                Some(Self::new(paid_at, bank, account_number))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub email: String,
    pub address: String,
    pub grand_total: i64,
    /// Plaintext passcode, present only in the checkout response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_account_number: Option<String>,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_paid_at(self.paid_at.as_ref())
    }

    pub fn apply_payment(&mut self, payment: Payment) {
        self.paid_at = Some(payment.paid_at);
        self.paid_bank = Some(payment.bank);
        self.paid_account_number = Some(payment.account_number);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub details: Vec<OrderDetail>,
}
