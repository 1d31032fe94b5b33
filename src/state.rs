use axum::extract::FromRef;

use crate::{config::AppConfig, db::OrmConn, middleware::admin::AdminSecret};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub orm: OrmConn,
    pub admin_secret: AdminSecret,
}

impl AppState {
    pub fn new(orm: OrmConn, config: &AppConfig) -> Self {
        Self {
            orm,
            admin_secret: AdminSecret::new(config.admin_secret.clone()),
        }
    }
}
