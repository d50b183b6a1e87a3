// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::ServiceOrderRepository,
    models::{
        auth::SessionContext,
        dashboard::{Dashboard, DashboardSummary, RECENT_ORDERS_LIMIT},
        service_orders::OrderFilter,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    order_repo: Arc<dyn ServiceOrderRepository>,
}

impl DashboardService {
    pub fn new(order_repo: Arc<dyn ServiceOrderRepository>) -> Self {
        Self { order_repo }
    }

    /// Números do painel e as OS mais recentes do dono.
    pub async fn get_dashboard(&self, session: &SessionContext) -> Result<Dashboard, AppError> {
        // A listagem já vem das mais novas para as mais antigas
        let mut orders = self
            .order_repo
            .list(session.owner_id(), OrderFilter::default())
            .await?;

        let summary = DashboardSummary::from_orders(orders.iter().map(|d| &d.order), Utc::now());
        orders.truncate(RECENT_ORDERS_LIMIT);

        Ok(Dashboard { summary, recent_orders: orders })
    }
}
