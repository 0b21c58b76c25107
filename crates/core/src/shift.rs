//! Work-shift (jornada laboral) engine.
//!
//! Pure logic, no database access. The caller loads a shift row, turns it
//! into a [`ShiftClock`], asks this module what the row should become, and
//! persists the returned [`ShiftTransition`].
//!
//! A shift moves through these states:
//!
//! ```text
//! active --(9h worked, sweep)--> paused --(confirm)--> active (overtime)
//!   |                              |                        |
//!   |                              +--(reject / 4h idle)--> completed
//!   +--(clock out)---------------> completed <--(13h, sweep)+
//! active | paused --(cancel)--> cancelled
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Minutes of regular time in a shift (9 hours).
pub const REGULAR_LIMIT_MINUTES: i64 = 9 * 60;

/// Minutes of overtime allowed on top of regular time (4 hours).
pub const OVERTIME_LIMIT_MINUTES: i64 = 4 * 60;

/// Hard ceiling of worked minutes in a single shift (13 hours).
pub const MAX_SHIFT_MINUTES: i64 = REGULAR_LIMIT_MINUTES + OVERTIME_LIMIT_MINUTES;

/// How long a shift may sit paused waiting for an overtime decision before
/// the sweep closes it with regular hours only.
pub const OVERTIME_DECISION_WINDOW_MINUTES: i64 = OVERTIME_LIMIT_MINUTES;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_PAUSED: &str = "paused";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid `work_shifts.status` values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_ACTIVE,
    STATUS_PAUSED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftStatus::Active => STATUS_ACTIVE,
            ShiftStatus::Paused => STATUS_PAUSED,
            ShiftStatus::Completed => STATUS_COMPLETED,
            ShiftStatus::Cancelled => STATUS_CANCELLED,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_ACTIVE => Ok(ShiftStatus::Active),
            STATUS_PAUSED => Ok(ShiftStatus::Paused),
            STATUS_COMPLETED => Ok(ShiftStatus::Completed),
            STATUS_CANCELLED => Ok(ShiftStatus::Cancelled),
            other => Err(CoreError::Internal(format!(
                "Unknown shift status '{other}'"
            ))),
        }
    }

    /// Active and paused shifts are still open; the rest are final.
    pub fn is_open(self) -> bool {
        matches!(self, ShiftStatus::Active | ShiftStatus::Paused)
    }
}

/// Temporal state of one shift row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftClock {
    pub status: ShiftStatus,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub paused_at: Option<Timestamp>,
    /// Minutes excluded from worked time (breaks and time spent paused).
    pub rest_minutes: i64,
    /// `None` until the worker decides; `Some(true)` once overtime is accepted.
    pub overtime_confirmed: Option<bool>,
    pub auto_paused: bool,
    pub auto_finalized: bool,
}

impl ShiftClock {
    /// A freshly clocked-in shift.
    pub fn started(at: Timestamp) -> Self {
        Self {
            status: ShiftStatus::Active,
            started_at: at,
            ended_at: None,
            paused_at: None,
            rest_minutes: 0,
            overtime_confirmed: None,
            auto_paused: false,
            auto_finalized: false,
        }
    }
}

/// Worked time split into regular and overtime buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HoursBreakdown {
    /// Minutes that count towards pay (`regular + overtime`).
    pub worked_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
}

/// What the periodic sweep should do with a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAction {
    None,
    /// Regular time is used up and overtime was never confirmed.
    AutoPause { paused_at: Timestamp },
    /// The shift hit its ceiling or its overtime decision window expired.
    AutoFinalize {
        ended_at: Timestamp,
        overtime_confirmed: bool,
    },
}

/// Column values to persist after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftTransition {
    pub status: ShiftStatus,
    pub ended_at: Option<Timestamp>,
    pub paused_at: Option<Timestamp>,
    pub rest_minutes: i64,
    pub overtime_confirmed: Option<bool>,
    pub auto_paused: bool,
    pub auto_finalized: bool,
    pub hours: HoursBreakdown,
}

impl ShiftTransition {
    /// The clock as it will look once this transition is persisted.
    pub fn clock(&self, started_at: Timestamp) -> ShiftClock {
        ShiftClock {
            status: self.status,
            started_at,
            ended_at: self.ended_at,
            paused_at: self.paused_at,
            rest_minutes: self.rest_minutes,
            overtime_confirmed: self.overtime_confirmed,
            auto_paused: self.auto_paused,
            auto_finalized: self.auto_finalized,
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

fn minutes_between(from: Timestamp, to: Timestamp) -> i64 {
    (to - from).num_minutes().max(0)
}

/// Elapsed minutes minus rest, not clamped. The sweep uses the overshoot to
/// back-date transitions to the instant a threshold was crossed.
fn raw_worked_minutes(clock: &ShiftClock, now: Timestamp) -> i64 {
    let until = match clock.status {
        ShiftStatus::Active => now,
        ShiftStatus::Paused => clock.paused_at.unwrap_or(now),
        ShiftStatus::Completed | ShiftStatus::Cancelled => clock.ended_at.unwrap_or(now),
    };
    minutes_between(clock.started_at, until) - clock.rest_minutes
}

/// Worked minutes so far, in `0..=MAX_SHIFT_MINUTES`.
pub fn worked_minutes(clock: &ShiftClock, now: Timestamp) -> i64 {
    raw_worked_minutes(clock, now).clamp(0, MAX_SHIFT_MINUTES)
}

/// Split worked minutes into regular and overtime buckets.
///
/// Overtime only counts once the worker confirmed it; anything beyond the
/// regular limit is otherwise dropped.
pub fn split_hours(worked: i64, overtime_confirmed: Option<bool>) -> HoursBreakdown {
    let worked = worked.clamp(0, MAX_SHIFT_MINUTES);
    let regular_minutes = worked.min(REGULAR_LIMIT_MINUTES);
    let overtime_minutes = if overtime_confirmed == Some(true) {
        (worked - REGULAR_LIMIT_MINUTES).clamp(0, OVERTIME_LIMIT_MINUTES)
    } else {
        0
    };
    HoursBreakdown {
        worked_minutes: regular_minutes + overtime_minutes,
        regular_minutes,
        overtime_minutes,
    }
}

/// Hours breakdown of a shift as of `now`.
pub fn breakdown(clock: &ShiftClock, now: Timestamp) -> HoursBreakdown {
    split_hours(worked_minutes(clock, now), clock.overtime_confirmed)
}

// ---------------------------------------------------------------------------
// Periodic sweep
// ---------------------------------------------------------------------------

/// Decide whether an open shift crossed a threshold.
pub fn evaluate(clock: &ShiftClock, now: Timestamp) -> SweepAction {
    match clock.status {
        ShiftStatus::Active => {
            let raw = raw_worked_minutes(clock, now);
            if clock.overtime_confirmed == Some(true) {
                if raw >= MAX_SHIFT_MINUTES {
                    return SweepAction::AutoFinalize {
                        ended_at: now - Duration::minutes(raw - MAX_SHIFT_MINUTES),
                        overtime_confirmed: true,
                    };
                }
            } else if raw >= REGULAR_LIMIT_MINUTES {
                return SweepAction::AutoPause {
                    paused_at: now - Duration::minutes(raw - REGULAR_LIMIT_MINUTES),
                };
            }
            SweepAction::None
        }
        ShiftStatus::Paused => match clock.paused_at {
            Some(paused_at)
                if clock.overtime_confirmed.is_none()
                    && minutes_between(paused_at, now) >= OVERTIME_DECISION_WINDOW_MINUTES =>
            {
                SweepAction::AutoFinalize {
                    ended_at: paused_at,
                    overtime_confirmed: false,
                }
            }
            _ => SweepAction::None,
        },
        ShiftStatus::Completed | ShiftStatus::Cancelled => SweepAction::None,
    }
}

/// Turn a sweep decision into the transition to persist.
pub fn apply_sweep(clock: &ShiftClock, action: SweepAction, now: Timestamp) -> Option<ShiftTransition> {
    let mut next = carry(clock);
    match action {
        SweepAction::None => return None,
        SweepAction::AutoPause { paused_at } => {
            next.status = ShiftStatus::Paused;
            next.paused_at = Some(paused_at);
            next.auto_paused = true;
        }
        SweepAction::AutoFinalize {
            ended_at,
            overtime_confirmed,
        } => {
            next.status = ShiftStatus::Completed;
            next.ended_at = Some(ended_at);
            next.paused_at = None;
            next.overtime_confirmed = Some(overtime_confirmed);
            next.auto_finalized = true;
        }
    }
    Some(finish(next, clock.started_at, now))
}

// ---------------------------------------------------------------------------
// Explicit transitions
// ---------------------------------------------------------------------------

/// Copy the current clock into a transition, hours filled in by [`finish`].
fn carry(clock: &ShiftClock) -> ShiftTransition {
    ShiftTransition {
        status: clock.status,
        ended_at: clock.ended_at,
        paused_at: clock.paused_at,
        rest_minutes: clock.rest_minutes,
        overtime_confirmed: clock.overtime_confirmed,
        auto_paused: clock.auto_paused,
        auto_finalized: clock.auto_finalized,
        hours: HoursBreakdown::default(),
    }
}

fn finish(mut next: ShiftTransition, started_at: Timestamp, now: Timestamp) -> ShiftTransition {
    next.hours = breakdown(&next.clock(started_at), now);
    next
}

fn closed_conflict(clock: &ShiftClock) -> CoreError {
    CoreError::Conflict(format!("Shift is already {}", clock.status.as_str()))
}

/// Worker clocks out.
///
/// An active shift ends now. A paused shift ends at the moment it was paused
/// and its pending overtime is treated as rejected.
pub fn clock_out(clock: &ShiftClock, now: Timestamp) -> Result<ShiftTransition, CoreError> {
    let mut next = carry(clock);
    match clock.status {
        ShiftStatus::Active => {
            next.ended_at = Some(now);
        }
        ShiftStatus::Paused => {
            next.ended_at = Some(clock.paused_at.unwrap_or(now));
            next.overtime_confirmed = Some(clock.overtime_confirmed.unwrap_or(false));
        }
        ShiftStatus::Completed | ShiftStatus::Cancelled => return Err(closed_conflict(clock)),
    }
    next.status = ShiftStatus::Completed;
    next.paused_at = None;
    Ok(finish(next, clock.started_at, now))
}

/// Worker accepts overtime on a shift paused at the regular limit.
///
/// The shift resumes; the time spent paused is booked as rest.
pub fn confirm_overtime(clock: &ShiftClock, now: Timestamp) -> Result<ShiftTransition, CoreError> {
    if clock.status != ShiftStatus::Paused {
        return Err(CoreError::Conflict(format!(
            "Overtime can only be confirmed on a paused shift (shift is {})",
            clock.status.as_str()
        )));
    }
    if clock.overtime_confirmed.is_some() {
        return Err(CoreError::Conflict(
            "Overtime was already decided for this shift".into(),
        ));
    }
    let paused_at = clock.paused_at.unwrap_or(now);
    let mut next = carry(clock);
    next.status = ShiftStatus::Active;
    next.rest_minutes = clock.rest_minutes + minutes_between(paused_at, now);
    next.paused_at = None;
    next.overtime_confirmed = Some(true);
    Ok(finish(next, clock.started_at, now))
}

/// Worker declines overtime; the shift closes with regular hours only.
pub fn reject_overtime(clock: &ShiftClock, now: Timestamp) -> Result<ShiftTransition, CoreError> {
    if clock.status != ShiftStatus::Paused {
        return Err(CoreError::Conflict(format!(
            "Overtime can only be rejected on a paused shift (shift is {})",
            clock.status.as_str()
        )));
    }
    let mut next = carry(clock);
    next.status = ShiftStatus::Completed;
    next.ended_at = Some(clock.paused_at.unwrap_or(now));
    next.paused_at = None;
    next.overtime_confirmed = Some(false);
    Ok(finish(next, clock.started_at, now))
}

/// Discard an open shift. Cancelled shifts are never paid.
pub fn cancel(clock: &ShiftClock, now: Timestamp) -> Result<ShiftTransition, CoreError> {
    if !clock.status.is_open() {
        return Err(closed_conflict(clock));
    }
    let mut next = carry(clock);
    next.status = ShiftStatus::Cancelled;
    next.ended_at = Some(clock.paused_at.unwrap_or(now));
    next.paused_at = None;
    Ok(finish(next, clock.started_at, now))
}

/// Book a break on an active shift.
pub fn add_rest(
    clock: &ShiftClock,
    minutes: i64,
    now: Timestamp,
) -> Result<ShiftTransition, CoreError> {
    if clock.status != ShiftStatus::Active {
        return Err(CoreError::Conflict(format!(
            "Rest can only be added to an active shift (shift is {})",
            clock.status.as_str()
        )));
    }
    if minutes <= 0 {
        return Err(CoreError::Validation(
            "Rest minutes must be greater than zero".into(),
        ));
    }
    let total_rest = clock.rest_minutes + minutes;
    if total_rest > minutes_between(clock.started_at, now) {
        return Err(CoreError::Validation(
            "Rest time cannot exceed the time elapsed since clock-in".into(),
        ));
    }
    let mut next = carry(clock);
    next.rest_minutes = total_rest;
    Ok(finish(next, clock.started_at, now))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
