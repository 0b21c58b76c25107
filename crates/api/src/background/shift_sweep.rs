//! Periodic auto-pause / auto-finalize of open work shifts.
//!
//! Every tick loads all active and paused shifts, asks
//! [`faena_core::shift::evaluate`] whether one crossed a threshold (9 h regular,
//! 13 h ceiling, 4 h overtime decision window) and persists the resulting
//! transition. Writes are conditional on the row version that was read, so a
//! worker acting on the same shift in between simply wins; the shift is
//! looked at again on the next tick.

use std::time::Duration;

use chrono::Utc;
use faena_core::shift::{self, SweepAction};
use faena_core::types::Timestamp;
use faena_db::repositories::WorkShiftRepo;
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Outcome of one sweep pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub examined: usize,
    pub paused: usize,
    pub finalized: usize,
    /// Transitions skipped because the row changed after it was read.
    pub lost_races: usize,
}

/// Run one sweep at `now`.
pub async fn sweep_once(pool: &PgPool, now: Timestamp) -> Result<SweepReport, sqlx::Error> {
    let open = WorkShiftRepo::list_open(pool).await?;
    let mut report = SweepReport {
        examined: open.len(),
        ..SweepReport::default()
    };

    for row in open {
        let clock = match row.clock() {
            Ok(clock) => clock,
            Err(e) => {
                tracing::warn!(shift_id = row.id, error = %e, "Shift sweep: unreadable row");
                continue;
            }
        };
        let action = shift::evaluate(&clock, now);
        let Some(next) = shift::apply_sweep(&clock, action, now) else {
            continue;
        };

        match WorkShiftRepo::apply_transition(pool, &row, &next).await? {
            Some(updated) => {
                match action {
                    SweepAction::AutoPause { .. } => report.paused += 1,
                    SweepAction::AutoFinalize { .. } => report.finalized += 1,
                    SweepAction::None => {}
                }
                tracing::info!(
                    shift_id = updated.id,
                    user_id = updated.user_id,
                    status = %updated.status,
                    regular_minutes = updated.regular_minutes,
                    overtime_minutes = updated.overtime_minutes,
                    "Shift sweep: transition applied"
                );
            }
            None => {
                report.lost_races += 1;
                tracing::debug!(
                    shift_id = row.id,
                    "Shift sweep: row changed concurrently, retrying next tick"
                );
            }
        }
    }

    Ok(report)
}

/// Run the sweep loop every `interval_secs` until `cancel` is triggered.
pub async fn run(pool: PgPool, interval_secs: u64, cancel: CancellationToken) {
    let period = Duration::from_secs(interval_secs.max(1));
    tracing::info!(interval_secs = period.as_secs(), "Shift sweep started");

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Shift sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep_once(&pool, Utc::now()).await {
                    Ok(report) if report.paused + report.finalized > 0 => {
                        tracing::info!(
                            examined = report.examined,
                            paused = report.paused,
                            finalized = report.finalized,
                            lost_races = report.lost_races,
                            "Shift sweep: pass complete"
                        );
                    }
                    Ok(report) => {
                        tracing::debug!(examined = report.examined, "Shift sweep: nothing to do");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Shift sweep: pass failed");
                    }
                }
            }
        }
    }
}
