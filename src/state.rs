use std::sync::Arc;

use coursehub_config::{CorsConfig, EmailConfig, JwtConfig, PaginationConfig};
use coursehub_core::{LessonPaginator, PageBounds};
use coursehub_db::{PgPool, init_db_pool};

use crate::notifications::NotificationQueue;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub pagination_config: PaginationConfig,
    pub notifications: Arc<dyn NotificationQueue>,
}

impl AppState {
    pub fn lesson_paginator(&self) -> LessonPaginator {
        LessonPaginator::new(PageBounds::new(
            self.pagination_config.lesson_page_size,
            self.pagination_config.lesson_max_page_size,
        ))
    }
}

pub async fn init_app_state(notifications: Arc<dyn NotificationQueue>) -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        pagination_config: PaginationConfig::from_env(),
        notifications,
    }
}
