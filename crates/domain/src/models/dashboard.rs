//! Dashboard statistics domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Period-comparison statistics for the admin dashboard.
///
/// A transient value computed fresh on every request: the current
/// 30-day window measured against the 30 days before it, plus a few
/// all-time counts. Field names follow the storefront wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of order totals in the current period.
    pub total_sales: Decimal,
    /// Sales change vs the previous period, in percent. 0 when the
    /// previous period had no sales.
    pub sales_growth: f64,
    /// Distinct users with at least one order in the current period.
    pub active_users: i64,
    /// Active-user change vs the previous period, in percent.
    pub user_growth: f64,
    /// All-time product count.
    pub total_products: i64,
    /// Products created in the current period.
    pub new_products: i64,
    /// Orders currently in the pending state, all-time. Intentionally
    /// not period-scoped; the storefront contract reports the live
    /// pending queue under this name.
    pub new_orders: i64,
    /// Share of all-time orders that reached the delivered state, in
    /// percent. Always within [0, 100].
    pub order_completion: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_wire_format_is_camel_case() {
        let stats = DashboardStats {
            total_sales: Decimal::new(125050, 2),
            sales_growth: 12.5,
            active_users: 42,
            user_growth: -5.0,
            total_products: 120,
            new_products: 8,
            new_orders: 3,
            order_completion: 60.0,
        };

        let json = serde_json::to_value(&stats).unwrap();
        for key in [
            "totalSales",
            "salesGrowth",
            "activeUsers",
            "userGrowth",
            "totalProducts",
            "newProducts",
            "newOrders",
            "orderCompletion",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_dashboard_stats_default_is_all_zero() {
        let stats = DashboardStats::default();
        assert_eq!(stats.total_sales, rust_decimal::Decimal::ZERO);
        assert_eq!(stats.sales_growth, 0.0);
        assert_eq!(stats.active_users, 0);
        assert_eq!(stats.order_completion, 0.0);
    }
}
