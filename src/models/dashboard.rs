// src/models/dashboard.rs

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::service_orders::{
    OrderStatus, PaymentStatus, ServiceOrder, ServiceOrderDetail,
};

pub const RECENT_ORDERS_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub open_orders: i64,
    pub completed_orders: i64,
    pub pending_payments: i64,
    /// Soma das OS pagas criadas no mês corrente
    #[schema(value_type = f64)]
    pub monthly_revenue: Decimal,
}

impl DashboardSummary {
    pub fn from_orders<'a, I>(orders: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a ServiceOrder>,
    {
        let mut summary = Self::default();

        for order in orders {
            summary.total_orders += 1;
            if order.status.is_open() {
                summary.open_orders += 1;
            }
            if matches!(order.status, OrderStatus::Completed | OrderStatus::Delivered) {
                summary.completed_orders += 1;
            }
            match order.payment_status {
                PaymentStatus::Pending => summary.pending_payments += 1,
                PaymentStatus::Paid => {
                    let same_month = order.created_at.year() == now.year()
                        && order.created_at.month() == now.month();
                    if same_month {
                        summary.monthly_revenue += order.value.unwrap_or_default();
                    }
                }
            }
        }

        summary
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub recent_orders: Vec<ServiceOrderDetail>,
}
