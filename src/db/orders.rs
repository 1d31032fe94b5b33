//! Order persistence: the atomic order + details write and the guarded
//! unpaid -> paid transition.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};

use crate::{
    entity::{
        order_details::{self, Entity as OrderDetails},
        orders::{self, Entity as Orders},
    },
    models::Payment,
};

/// Insert an unpaid order and all of its details in one transaction. Dropping
/// the transaction on an error rolls every row back.
pub async fn create_with_details<C: TransactionTrait>(
    db: &C,
    order: orders::Model,
    details: Vec<order_details::Model>,
) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    orders::ActiveModel {
        id: Set(order.id),
        email: Set(order.email),
        address: Set(order.address),
        passcode: Set(order.passcode),
        paid_at: Set(None),
        paid_bank: Set(None),
        paid_account: Set(None),
        grand_total: Set(order.grand_total),
    }
    .insert(&txn)
    .await?;

    for detail in details {
        order_details::ActiveModel {
            id: Set(detail.id),
            order_id: Set(detail.order_id),
            product_id: Set(detail.product_id),
            quantity: Set(detail.quantity),
            price: Set(detail.price),
            total: Set(detail.total),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<orders::Model>, DbErr> {
    Orders::find_by_id(id.to_owned()).one(conn).await
}

pub async fn find_details<C: ConnectionTrait>(
    conn: &C,
    order_id: &str,
) -> Result<Vec<order_details::Model>, DbErr> {
    OrderDetails::find()
        .filter(order_details::Column::OrderId.eq(order_id))
        .order_by_asc(order_details::Column::ProductId)
        .all(conn)
        .await
}

/// Record the payment only while `paid_at` is still null. `None` means the
/// order was paid (or vanished) before this update ran.
pub async fn mark_paid<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    payment: &Payment,
) -> Result<Option<orders::Model>, DbErr> {
    let updated = Orders::update_many()
        .col_expr(orders::Column::PaidAt, Expr::value(payment.paid_at.fixed_offset()))
        .col_expr(orders::Column::PaidBank, Expr::value(payment.bank.clone()))
        .col_expr(
            orders::Column::PaidAccount,
            Expr::value(payment.account_number.clone()),
        )
        .filter(orders::Column::Id.eq(id))
        .filter(orders::Column::PaidAt.is_null())
        .exec_with_returning(conn)
        .await?;
    Ok(updated.into_iter().next())
}
