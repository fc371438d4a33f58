//! Work-time reconciliation: pairs clock events into work intervals,
//! flags malformed attendance sequences, and reconciles physical work
//! time against approved leave and the monthly duty quota.
//!
//! Everything here is pure and synchronous. Handlers call these
//! functions per employee; invocations share no state and are safe to
//! run concurrently.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::database::models::{
    AttendanceEvent, EventKind, LeaveKind, LeaveRequest, LeaveStatus, WorkSummary,
};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Minutes credited against the quota for one approved daily-leave day.
const FULL_DAY_MINUTES: f64 = 8.0 * 60.0;

/// Whether one day's clock sequence is malformed: a clock-in while
/// already in, a clock-out while out, or a day ending on an open
/// clock-in. Pass events do not participate in the clock state machine.
///
/// All events must share one calendar date; grouping is the caller's job.
pub fn is_incomplete(day_events: &[AttendanceEvent]) -> bool {
    let mut sorted: Vec<&AttendanceEvent> = day_events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp_ms);

    scan_clock_state(&sorted)
}

fn scan_clock_state(sorted: &[&AttendanceEvent]) -> bool {
    let mut clocked_in = false;

    for event in sorted {
        match event.kind {
            EventKind::ClockIn => {
                if clocked_in {
                    return true;
                }
                clocked_in = true;
            }
            EventKind::ClockOut => {
                if !clocked_in {
                    return true;
                }
                clocked_in = false;
            }
            EventKind::PassStart | EventKind::PassEnd => {}
        }
    }

    // a day ending clocked-in has no matching clock-out
    clocked_in
}

/// Sums the minutes between each `start` event and the nearest following
/// `end` event by sorted position. Matched end markers are consumed; a
/// start with no following end contributes nothing.
fn paired_minutes(sorted: &[&AttendanceEvent], start: EventKind, end: EventKind) -> f64 {
    let mut total = 0.0;
    let mut i = 0;

    while i < sorted.len() {
        if sorted[i].kind != start {
            i += 1;
            continue;
        }
        match sorted[i + 1..].iter().position(|e| e.kind == end) {
            Some(offset) => {
                let j = i + 1 + offset;
                total += (sorted[j].timestamp_ms - sorted[i].timestamp_ms) as f64 / MS_PER_MINUTE;
                i = j + 1;
            }
            None => break,
        }
    }

    total
}

/// Reconcile a person's events against the monthly duty quota and their
/// approved leave requests.
///
/// Requests are re-filtered to approved internally, so passing an
/// unfiltered list is safe. The result is a pure function of the three
/// inputs and is invariant under reordering of `events` and `requests`.
pub fn reconcile(
    events: &[AttendanceEvent],
    duty_hours_per_month: f64,
    requests: &[LeaveRequest],
) -> WorkSummary {
    let mut days: HashMap<NaiveDate, Vec<&AttendanceEvent>> = HashMap::new();
    for event in events {
        days.entry(event.calendar_date).or_default().push(event);
    }

    let mut incomplete = false;
    let mut physical_work_minutes = 0.0;
    let mut pass_event_minutes = 0.0;
    let mut has_pass_events = false;

    for day in days.values() {
        let mut sorted = day.clone();
        sorted.sort_by_key(|e| e.timestamp_ms);

        incomplete |= scan_clock_state(&sorted);
        physical_work_minutes += paired_minutes(&sorted, EventKind::ClockIn, EventKind::ClockOut);
        pass_event_minutes += paired_minutes(&sorted, EventKind::PassStart, EventKind::PassEnd);
        has_pass_events |= sorted
            .iter()
            .any(|e| matches!(e.kind, EventKind::PassStart | EventKind::PassEnd));
    }

    let mut remote_minutes = 0.0;
    let mut requested_pass_minutes = 0.0;
    let mut daily_leave_days: i64 = 0;

    for request in requests.iter().filter(|r| r.status == LeaveStatus::Approved) {
        match request.kind {
            LeaveKind::RemoteWork => remote_minutes += request.amount * 60.0,
            LeaveKind::HourlyPass => requested_pass_minutes += request.amount * 60.0,
            // one day per request; `amount` is not consulted for the count
            LeaveKind::DailyLeave => daily_leave_days += 1,
        }
    }

    // Pass events on the clock are the source of truth for time away.
    // Approved hourly-pass requests stand in only when no pass events
    // were recorded, so the same absence is never subtracted twice.
    let pass_minutes = if has_pass_events {
        pass_event_minutes
    } else {
        requested_pass_minutes
    };

    let net_work_minutes = (physical_work_minutes - pass_minutes + remote_minutes).max(0.0);
    let adjusted_duty_minutes =
        (duty_hours_per_month * 60.0 - daily_leave_days as f64 * FULL_DAY_MINUTES).max(0.0);
    let overtime_minutes = (net_work_minutes - adjusted_duty_minutes).max(0.0);
    let deficit_minutes = (adjusted_duty_minutes - net_work_minutes).max(0.0);

    WorkSummary {
        physical_work_minutes,
        pass_minutes,
        remote_minutes,
        net_work_minutes,
        overtime_minutes,
        deficit_minutes,
        daily_leave_days,
        is_incomplete: incomplete,
        net_work: format_minutes(net_work_minutes),
        overtime: format_minutes(overtime_minutes),
        deficit: format_minutes(deficit_minutes),
    }
}

/// `"<hours>h <minutes>m"`: whole hours by integer floor, leftover
/// minutes rounded. Deterministic for a given input.
pub fn format_minutes(total_minutes: f64) -> String {
    let hours = (total_minutes / 60.0).floor() as i64;
    let minutes = (total_minutes - hours as f64 * 60.0).round() as i64;
    format!("{}h {}m", hours, minutes)
}
