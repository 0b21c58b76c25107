//! Download endpoints under `/exports`.
//!
//! Each handler loads rows through the repositories, lays them out as
//! [`Table`]s and streams the rendered file back as an attachment.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use faena_core::error::CoreError;
use faena_core::payroll::validate_period;
use faena_core::types::DbId;
use faena_db::models::current_account::CurrentAccountReport;
use faena_db::repositories::{
    CurrentAccountReportRepo, PayrollSummaryRepo, ProjectRepo, ReportRepo, UserRepo,
    WorkShiftRepo,
};

use super::check;
use crate::error::{AppError, AppResult};
use crate::export::{self, attachment, pdf, xlsx, Cell, Table};
use crate::middleware::rbac::RequireManager;
use crate::query::{DateRangeParams, PeriodParams};
use crate::state::AppState;

type Download = (StatusCode, [(axum::http::HeaderName, String); 2], Vec<u8>);

fn download(content_type: &str, file_name: &str, body: Vec<u8>) -> Download {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CONTENT_DISPOSITION, attachment(file_name)),
        ],
        body,
    )
}

fn render_xlsx(tables: &[Table]) -> AppResult<Vec<u8>> {
    xlsx::render(tables).map_err(|e| AppError::InternalError(format!("xlsx export failed: {e}")))
}

async fn user_names(state: &AppState, ids: Vec<DbId>) -> AppResult<HashMap<DbId, String>> {
    Ok(UserRepo::names_by_id(&state.pool, &ids)
        .await?
        .into_iter()
        .collect())
}

fn name_cell(names: &HashMap<DbId, String>, id: DbId) -> Cell {
    names
        .get(&id)
        .map_or_else(|| Cell::text(format!("#{id}")), |n| Cell::text(n.as_str()))
}

/// GET /api/v1/exports/shifts.xlsx?from=&to=&user_id=
///
/// Completed shifts started within the range.
pub async fn shifts_xlsx(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(params): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    check(validate_period(params.from, params.to))?;
    let shifts =
        WorkShiftRepo::list_completed_in_period(&state.pool, params.user_id, params.from, params.to)
            .await?;
    let names = user_names(&state, shifts.iter().map(|s| s.user_id).collect()).await?;

    let mut table = Table::new(
        "Shifts",
        format!("Shifts {} to {}", params.from, params.to),
        vec![
            "Shift",
            "Worker",
            "Started",
            "Ended",
            "Rest (min)",
            "Regular (h)",
            "Overtime (h)",
            "Overtime",
            "Auto-closed",
        ],
    );
    for shift in &shifts {
        let overtime = match shift.overtime_confirmed {
            Some(true) => "confirmed",
            Some(false) => "rejected",
            None => "",
        };
        table.push(vec![
            Cell::Number(shift.id as f64),
            name_cell(&names, shift.user_id),
            Cell::timestamp(shift.started_at),
            Cell::opt_timestamp(shift.ended_at),
            Cell::Number(shift.rest_minutes as f64),
            Cell::hours(shift.regular_minutes),
            Cell::hours(shift.overtime_minutes),
            Cell::text(overtime),
            Cell::text(if shift.auto_finalized { "yes" } else { "no" }),
        ]);
    }

    let body = render_xlsx(&[table])?;
    tracing::info!(rows = shifts.len(), bytes = body.len(), "Shift export rendered");
    Ok(download(
        export::XLSX_CONTENT_TYPE,
        &format!("shifts-{}-{}.xlsx", params.from, params.to),
        body,
    ))
}

/// GET /api/v1/exports/payroll.xlsx?period_start=&period_end=&user_id=
///
/// Exports summaries previously generated for exactly this period.
pub async fn payroll_xlsx(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    check(validate_period(params.period_start, params.period_end))?;
    let mut summaries =
        PayrollSummaryRepo::list_for_period(&state.pool, params.period_start, params.period_end)
            .await?;
    if let Some(user_id) = params.user_id {
        summaries.retain(|s| s.user_id == user_id);
    }
    let names = user_names(&state, summaries.iter().map(|s| s.user_id).collect()).await?;

    let mut table = Table::new(
        "Payroll",
        format!("Payroll {} to {}", params.period_start, params.period_end),
        vec![
            "Worker",
            "Shifts",
            "Regular (h)",
            "Overtime (h)",
            "Hourly rate",
            "Regular pay",
            "Overtime pay",
            "Total",
        ],
    );
    for summary in &summaries {
        table.push(vec![
            name_cell(&names, summary.user_id),
            Cell::Number(summary.shift_count as f64),
            Cell::hours(summary.regular_minutes),
            Cell::hours(summary.overtime_minutes),
            Cell::Money(summary.hourly_rate),
            Cell::Money(summary.regular_pay),
            Cell::Money(summary.overtime_pay),
            Cell::Money(summary.total_pay),
        ]);
    }

    let body = render_xlsx(&[table])?;
    Ok(download(
        export::XLSX_CONTENT_TYPE,
        &format!(
            "payroll-{}-{}.xlsx",
            params.period_start, params.period_end
        ),
        body,
    ))
}

/// The report plus its itemised lines, as a summary table and a detail table.
async fn current_account_tables(
    state: &AppState,
    id: DbId,
) -> AppResult<(CurrentAccountReport, Table, Table)> {
    let report = CurrentAccountReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CurrentAccountReport",
            id,
        }))?;
    let project_name = ProjectRepo::find_by_id(&state.pool, report.project_id)
        .await?
        .map_or_else(|| format!("#{}", report.project_id), |p| p.name);
    let lines = ReportRepo::account_lines(
        &state.pool,
        report.project_id,
        report.period_start,
        report.period_end,
    )
    .await?;

    let title = format!(
        "Cuenta corriente {project_name} ({} to {})",
        report.period_start, report.period_end
    );

    let mut summary = Table::new("Summary", title.clone(), vec!["Concept", "Amount"]);
    for (concept, amount) in [
        ("Leases", report.lease_charges),
        ("Deliveries", report.delivery_charges),
        ("Labor", report.labor_charges),
        ("Total charges", report.total_charges),
        ("Payments", report.total_payments),
        ("Balance", report.balance),
    ] {
        summary.push(vec![Cell::text(concept), Cell::Money(amount)]);
    }

    let mut detail = Table::new("Detail", title, vec!["Date", "Kind", "Description", "Amount"]);
    for line in lines {
        detail.push(vec![
            Cell::date(line.occurred_on),
            Cell::text(line.kind),
            Cell::text(line.description),
            Cell::Money(line.amount),
        ]);
    }

    Ok((report, summary, detail))
}

fn current_account_xlsx(summary: Table, detail: Table, id: DbId) -> AppResult<Download> {
    let body = render_xlsx(&[summary, detail])?;
    Ok(download(
        export::XLSX_CONTENT_TYPE,
        &format!("current-account-{id}.xlsx"),
        body,
    ))
}

fn current_account_pdf(report: &CurrentAccountReport, detail: &Table) -> Download {
    let footer = [
        format!("Total charges: {:.2}", report.total_charges),
        format!("Payments: {:.2}", report.total_payments),
        format!("Balance: {:.2}", report.balance),
    ];
    download(
        export::PDF_CONTENT_TYPE,
        &format!("current-account-{}.pdf", report.id),
        pdf::render(detail, &footer),
    )
}

/// Split `"42.pdf"` into `(42, "pdf")`. Route segments cannot mix a parameter
/// with a literal suffix, so the extension is matched here.
fn parse_file_name(segment: &str) -> AppResult<(DbId, &str)> {
    segment
        .rsplit_once('.')
        .and_then(|(id, ext)| Some((id.parse().ok()?, ext)))
        .filter(|(_, ext)| matches!(*ext, "xlsx" | "pdf"))
        .ok_or_else(|| AppError::BadRequest("Expected /<id>.xlsx or /<id>.pdf".into()))
}

/// GET /api/v1/exports/current-accounts/{id}.xlsx
/// GET /api/v1/exports/current-accounts/{id}.pdf
pub async fn current_account(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(file): Path<String>,
) -> AppResult<Download> {
    let (id, extension) = parse_file_name(&file)?;
    let (report, summary, detail) = current_account_tables(&state, id).await?;
    tracing::info!(report_id = id, extension, "Current account export requested");
    if extension == "pdf" {
        Ok(current_account_pdf(&report, &detail))
    } else {
        current_account_xlsx(summary, detail, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn file_names_carry_id_and_format() {
        assert_eq!(parse_file_name("42.pdf").unwrap(), (42, "pdf"));
        assert_eq!(parse_file_name("7.xlsx").unwrap(), (7, "xlsx"));
        assert_matches!(parse_file_name("42.csv"), Err(AppError::BadRequest(_)));
        assert_matches!(parse_file_name("abc.pdf"), Err(AppError::BadRequest(_)));
        assert_matches!(parse_file_name("42"), Err(AppError::BadRequest(_)));
    }
}
