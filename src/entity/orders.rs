use sea_orm::entity::prelude::*;

use crate::models::OrderStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    pub address: String,
    /// Argon2 PHC string of the checkout passcode.
    pub passcode: Option<String>,
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub paid_bank: Option<String>,
    pub paid_account: Option<String>,
    pub grand_total: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_details::Entity")]
    OrderDetails,
}

impl Related<super::order_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderDetails.def()
    }
}

impl Model {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_paid_at(self.paid_at.as_ref())
    }
}

impl ActiveModelBehavior for ActiveModel {}
