use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{MAX_TEXT_LEN, exceeds},
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        if exceeds(&self.name, MAX_TEXT_LEN) {
            return Err(AppError::Validation(format!(
                "name must be at most {MAX_TEXT_LEN} characters"
            )));
        }
        if self.price < 0 {
            return Err(AppError::Validation("price must not be negative".into()));
        }
        Ok(())
    }
}

/// Partial update. An empty name or a zero price counts as "not supplied", so
/// neither can be set explicitly through this request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.price.is_some_and(|p| p < 0) {
            return Err(AppError::Validation("price must not be negative".into()));
        }
        if self.name.as_deref().is_some_and(|n| exceeds(n, MAX_TEXT_LEN)) {
            return Err(AppError::Validation(format!(
                "name must be at most {MAX_TEXT_LEN} characters"
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn price(&self) -> Option<i64> {
        self.price.filter(|p| *p != 0)
    }
}
