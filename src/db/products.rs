//! Product catalog queries. Every read filters out soft-deleted rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

use crate::entity::products::{ActiveModel, Column, Entity as Products, Model};

pub async fn list_active<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Products::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn find_active<C: ConnectionTrait>(conn: &C, id: &str) -> Result<Option<Model>, DbErr> {
    Products::find_by_id(id.to_owned())
        .filter(Column::IsDeleted.eq(false))
        .one(conn)
        .await
}

pub async fn find_active_in<C: ConnectionTrait>(
    conn: &C,
    ids: &[String],
) -> Result<Vec<Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Products::find()
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .filter(Column::IsDeleted.eq(false))
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    id: String,
    name: String,
    price: i64,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(id),
        name: Set(name),
        price: Set(price),
        is_deleted: Set(false),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: Model,
    name: Option<&str>,
    price: Option<i64>,
) -> Result<Model, DbErr> {
    if name.is_none() && price.is_none() {
        return Ok(existing);
    }
    let mut active: ActiveModel = existing.into();
    if let Some(name) = name {
        active.name = Set(name.to_owned());
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    active.update(conn).await
}

/// Flip the deleted flag. Returns `false` when no active row matched.
pub async fn soft_delete<C: ConnectionTrait>(conn: &C, id: &str) -> Result<bool, DbErr> {
    let result = Products::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .filter(Column::Id.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
