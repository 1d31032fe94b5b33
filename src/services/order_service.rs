use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db,
    dto::orders::{CheckoutItem, CheckoutRequest, ConfirmOrderRequest},
    entity::{
        order_details::Model as OrderDetailModel, orders::Model as OrderModel,
        products::Model as ProductModel,
    },
    error::{AppError, AppResult},
    models::{Order, OrderDetail, OrderStatus, OrderWithDetails, Payment},
    passcode::{self, PASSCODE_LEN},
    state::AppState,
};

/// One distinct product of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: String,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub grand_total: i64,
}

/// Collapse repeated product ids into one line, keeping first-seen order and
/// summing their quantities.
pub fn merge_lines(items: &[CheckoutItem]) -> AppResult<Vec<OrderLine>> {
    let mut lines: Vec<OrderLine> = Vec::with_capacity(items.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match index.get(item.id.as_str()) {
            Some(&i) => {
                let line = &mut lines[i];
                line.quantity = line.quantity.checked_add(item.quantity).ok_or_else(|| {
                    AppError::Validation(format!("quantity for product {} is too large", item.id))
                })?;
            }
            None => {
                index.insert(item.id.as_str(), lines.len());
                lines.push(OrderLine {
                    product_id: item.id.clone(),
                    quantity: item.quantity,
                });
            }
        }
    }

    Ok(lines)
}

/// Price each line against the catalog snapshot. Lines whose product is
/// missing or deleted are dropped without error.
pub fn price_order(lines: &[OrderLine], catalog: &[ProductModel]) -> AppResult<PricedOrder> {
    let by_id: HashMap<&str, &ProductModel> = catalog
        .iter()
        .filter(|p| !p.status().is_deleted())
        .map(|p| (p.id.as_str(), p))
        .collect();

    let mut priced = PricedOrder {
        lines: Vec::new(),
        grand_total: 0,
    };

    for line in lines {
        let Some(product) = by_id.get(line.product_id.as_str()) else {
            tracing::debug!(product_id = %line.product_id, "dropping unknown product from checkout");
            continue;
        };

        let too_large = || AppError::Validation("order total is too large".into());
        let total = product
            .price
            .checked_mul(i64::from(line.quantity))
            .ok_or_else(too_large)?;
        priced.grand_total = priced.grand_total.checked_add(total).ok_or_else(too_large)?;
        priced.lines.push(PricedLine {
            product_id: product.id.clone(),
            quantity: line.quantity,
            price: product.price,
            total,
        });
    }

    Ok(priced)
}

/// Business rules checked after the passcode: once-only payment of the exact total.
pub fn ensure_payable(order: &OrderModel, amount: i64) -> AppResult<()> {
    if order.status() == OrderStatus::Paid {
        return Err(AppError::BadRequest("order already paid".into()));
    }
    if order.grand_total != amount {
        return Err(AppError::BadRequest("amount mismatch".into()));
    }
    Ok(())
}

pub async fn checkout(state: &AppState, payload: CheckoutRequest) -> AppResult<OrderWithDetails> {
    payload.validate()?;
    let lines = merge_lines(&payload.products)?;

    let ids: Vec<String> = lines.iter().map(|l| l.product_id.clone()).collect();
    let catalog = db::products::find_active_in(&state.orm, &ids).await?;
    let priced = price_order(&lines, &catalog)?;

    let plain_passcode = passcode::generate(PASSCODE_LEN);
    let passcode_hash = passcode::hash_blocking(plain_passcode.clone()).await?;

    let order_id = Uuid::new_v4().to_string();
    let order = OrderModel {
        id: order_id.clone(),
        email: payload.email,
        address: payload.address,
        passcode: Some(passcode_hash),
        paid_at: None,
        paid_bank: None,
        paid_account: None,
        grand_total: priced.grand_total,
    };
    let details: Vec<OrderDetailModel> = priced
        .lines
        .into_iter()
        .map(|line| OrderDetailModel {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.clone(),
            product_id: line.product_id,
            quantity: line.quantity,
            price: line.price,
            total: line.total,
        })
        .collect();

    db::orders::create_with_details(&state.orm, order.clone(), details.clone()).await?;

    tracing::info!(
        order_id = %order.id,
        grand_total = order.grand_total,
        details = details.len(),
        dropped = lines.len() - details.len(),
        "order created"
    );

    let mut order = order_from_entity(order);
    order.passcode = Some(plain_passcode);

    Ok(OrderWithDetails {
        order,
        details: details.into_iter().map(order_detail_from_entity).collect(),
    })
}

pub async fn confirm_order(
    state: &AppState,
    id: &str,
    payload: ConfirmOrderRequest,
) -> AppResult<OrderWithDetails> {
    payload.validate()?;
    let order = db::orders::find_by_id(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;

    verify_order_passcode(&order, &payload.passcode).await?;
    if let Err(err) = ensure_payable(&order, payload.amount) {
        tracing::warn!(order_id = %order.id, amount = payload.amount, reason = %err, "confirmation rejected");
        return Err(err);
    }

    let payment = Payment::new(Utc::now(), payload.bank, payload.account_number);
    let order = match db::orders::mark_paid(&state.orm, id, &payment).await? {
        Some(order) => order,
        None => {
            tracing::warn!(order_id = %id, "order was paid by a concurrent confirmation");
            return Err(AppError::BadRequest("order already paid".into()));
        }
    };

    tracing::info!(order_id = %order.id, bank = %payment.bank, "order paid");
    with_details(state, order).await
}

pub async fn get_order(state: &AppState, id: &str, passcode: &str) -> AppResult<OrderWithDetails> {
    let order = db::orders::find_by_id(&state.orm, id)
        .await?
        .ok_or(AppError::NotFound)?;

    verify_order_passcode(&order, passcode).await?;
    with_details(state, order).await
}

async fn verify_order_passcode(order: &OrderModel, passcode: &str) -> AppResult<()> {
    let Some(hash) = order.passcode.clone() else {
        tracing::warn!(order_id = %order.id, "order has no passcode");
        return Err(AppError::BadRequest("order has no passcode".into()));
    };

    if !passcode::verify_blocking(passcode.to_owned(), hash).await? {
        tracing::warn!(order_id = %order.id, "passcode mismatch");
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

async fn with_details(state: &AppState, order: OrderModel) -> AppResult<OrderWithDetails> {
    let details = db::orders::find_details(&state.orm, &order.id)
        .await?
        .into_iter()
        .map(order_detail_from_entity)
        .collect();

    Ok(OrderWithDetails {
        order: order_from_entity(order),
        details,
    })
}

/// The stored hash never leaves the service; callers that must reveal the
/// plaintext passcode set it afterwards.
fn order_from_entity(model: OrderModel) -> Order {
    let mut order = Order {
        id: model.id,
        email: model.email,
        address: model.address,
        grand_total: model.grand_total,
        passcode: None,
        paid_at: None,
        paid_bank: None,
        paid_account_number: None,
    };
    let payment = Payment::from_columns(
        model.paid_at.map(|dt| dt.with_timezone(&Utc)),
        model.paid_bank,
        model.paid_account,
    );
    if let Some(payment) = payment {
        order.apply_payment(payment);
    }
    order
}

fn order_detail_from_entity(model: OrderDetailModel) -> OrderDetail {
    OrderDetail {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price: model.price,
        total: model.total,
    }
}
