//! Read-only aggregate queries across project ledgers.

use faena_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::current_account::AccountSums;
use crate::models::report::{AccountLine, ProjectSummary};

/// Aggregates for project dashboards and current account generation.
pub struct ReportRepo;

impl ReportRepo {
    /// Lifetime totals of a project. Returns `None` if the project does not exist.
    pub async fn project_summary(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT p.id AS project_id,
                (SELECT COUNT(*) FROM contracts c WHERE c.project_id = p.id) AS contract_count,
                (SELECT COALESCE(SUM(c.amount), 0) FROM contracts c
                  WHERE c.project_id = p.id AND c.status <> 'cancelled') AS contracted_amount,
                (SELECT COALESCE(SUM(e.amount), 0) FROM expenses e
                  WHERE e.project_id = p.id) AS expense_total,
                (SELECT COALESCE(SUM(pay.amount), 0) FROM payments pay
                  WHERE pay.project_id = p.id) AS payment_total,
                (SELECT COALESCE(SUM(l.total), 0) FROM leases l
                  WHERE l.project_id = p.id) AS lease_total,
                (SELECT COALESCE(SUM(d.total), 0) FROM aggregate_deliveries d
                  WHERE d.project_id = p.id) AS delivery_total,
                (SELECT COALESCE(SUM(d.volume_m3), 0) FROM aggregate_deliveries d
                  WHERE d.project_id = p.id) AS delivered_volume_m3,
                (SELECT COALESCE(SUM(r.hours_worked), 0) FROM labor_reports r
                  WHERE r.project_id = p.id) AS labor_hours,
                (SELECT COUNT(*) FROM machines m WHERE m.project_id = p.id) AS machine_count
             FROM projects p
             WHERE p.id = $1",
        )
        .bind(project_id)
        .fetch_optional(pool)
        .await
    }

    /// Charges and payments of a project within `[from, to]` (inclusive).
    ///
    /// Labor is billed at each machine's current hourly rate.
    pub async fn account_sums(
        pool: &PgPool,
        project_id: DbId,
        from: Date,
        to: Date,
    ) -> Result<AccountSums, sqlx::Error> {
        sqlx::query_as::<_, AccountSums>(
            "SELECT
                (SELECT COALESCE(SUM(l.total), 0) FROM leases l
                  WHERE l.project_id = $1 AND l.start_date BETWEEN $2 AND $3) AS lease_charges,
                (SELECT COALESCE(SUM(d.total), 0) FROM aggregate_deliveries d
                  WHERE d.project_id = $1
                    AND d.delivered_at::date BETWEEN $2 AND $3) AS delivery_charges,
                (SELECT COALESCE(SUM(ROUND(r.hours_worked * m.hourly_rate, 2)), 0)
                   FROM labor_reports r JOIN machines m ON m.id = r.machine_id
                  WHERE r.project_id = $1 AND r.report_date BETWEEN $2 AND $3) AS labor_charges,
                (SELECT COALESCE(SUM(pay.amount), 0) FROM payments pay
                  WHERE pay.project_id = $1
                    AND pay.payment_date BETWEEN $2 AND $3) AS total_payments",
        )
        .bind(project_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
    }

    /// Itemised charges and payments behind [`Self::account_sums`], by date.
    pub async fn account_lines(
        pool: &PgPool,
        project_id: DbId,
        from: Date,
        to: Date,
    ) -> Result<Vec<AccountLine>, sqlx::Error> {
        sqlx::query_as::<_, AccountLine>(
            "SELECT kind, occurred_on, description, amount FROM (
                SELECT 'lease' AS kind, l.start_date AS occurred_on,
                       m.code || ' ' || l.quantity::TEXT || ' x ' || l.rate_type AS description,
                       l.total AS amount
                  FROM leases l JOIN machines m ON m.id = l.machine_id
                 WHERE l.project_id = $1 AND l.start_date BETWEEN $2 AND $3
                UNION ALL
                SELECT 'delivery', d.delivered_at::date,
                       d.material || ' ' || d.volume_m3::TEXT || ' m3',
                       d.total
                  FROM aggregate_deliveries d
                 WHERE d.project_id = $1 AND d.delivered_at::date BETWEEN $2 AND $3
                UNION ALL
                SELECT 'labor', r.report_date,
                       m.code || ' ' || r.hours_worked::TEXT || ' h',
                       ROUND(r.hours_worked * m.hourly_rate, 2)
                  FROM labor_reports r JOIN machines m ON m.id = r.machine_id
                 WHERE r.project_id = $1 AND r.report_date BETWEEN $2 AND $3
                UNION ALL
                SELECT 'payment', pay.payment_date,
                       pay.method || COALESCE(' ' || pay.reference, ''),
                       pay.amount
                  FROM payments pay
                 WHERE pay.project_id = $1 AND pay.payment_date BETWEEN $2 AND $3
             ) lines
             ORDER BY occurred_on, kind",
        )
        .bind(project_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
