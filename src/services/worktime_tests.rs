#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use crate::database::models::{
        AttendanceEvent, EventKind, LeaveKind, LeaveRequest, LeaveStatus,
    };
    use crate::services::worktime::{format_minutes, is_incomplete, reconcile};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn event(day: u32, hour: u32, minute: u32, kind: EventKind) -> AttendanceEvent {
        let calendar_date = date(day);
        let timestamp_ms = calendar_date
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();

        AttendanceEvent {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            timestamp_ms,
            kind,
            calendar_date,
            display_time: format!("{:02}:{:02}", hour, minute),
            created_at: Utc::now(),
        }
    }

    fn request(kind: LeaveKind, amount: f64, status: LeaveStatus) -> LeaveRequest {
        let now = Utc::now();
        LeaveRequest {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            kind,
            amount,
            status,
            calendar_date: date(10),
            description: None,
            reviewed_by: None,
            review_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn alternating_pairs_are_complete() {
        let events = vec![
            event(1, 9, 0, EventKind::ClockIn),
            event(1, 12, 0, EventKind::ClockOut),
            event(1, 13, 0, EventKind::ClockIn),
            event(1, 17, 0, EventKind::ClockOut),
        ];

        assert!(!is_incomplete(&events));
    }

    #[test]
    fn empty_day_is_complete() {
        assert!(!is_incomplete(&[]));
    }

    #[test]
    fn dangling_clock_in_is_incomplete() {
        let events = vec![
            event(1, 9, 0, EventKind::ClockIn),
            event(1, 12, 0, EventKind::ClockOut),
            event(1, 13, 0, EventKind::ClockIn),
        ];

        assert!(is_incomplete(&events));
    }

    #[test]
    fn double_clock_in_is_incomplete() {
        // the later valid pair does not redeem the sequence
        let events = vec![
            event(1, 9, 0, EventKind::ClockIn),
            event(1, 10, 0, EventKind::ClockIn),
            event(1, 12, 0, EventKind::ClockOut),
        ];

        assert!(is_incomplete(&events));
    }

    #[test]
    fn clock_out_without_in_is_incomplete() {
        let events = vec![
            event(1, 9, 0, EventKind::ClockOut),
            event(1, 10, 0, EventKind::ClockIn),
            event(1, 17, 0, EventKind::ClockOut),
        ];

        assert!(is_incomplete(&events));
    }

    #[test]
    fn checker_sorts_by_timestamp_before_scanning() {
        let events = vec![
            event(1, 17, 0, EventKind::ClockOut),
            event(1, 9, 0, EventKind::ClockIn),
        ];

        assert!(!is_incomplete(&events));
    }

    #[test]
    fn pass_events_do_not_affect_the_checker() {
        let events = vec![
            event(1, 9, 0, EventKind::ClockIn),
            event(1, 11, 0, EventKind::PassStart),
            event(1, 12, 0, EventKind::PassEnd),
            event(1, 17, 0, EventKind::ClockOut),
        ];

        assert!(!is_incomplete(&events));
    }

    #[test]
    fn empty_inputs_yield_pure_deficit() {
        let summary = reconcile(&[], 192.0, &[]);

        assert_eq!(summary.net_work_minutes, 0.0);
        assert_eq!(summary.overtime_minutes, 0.0);
        assert_eq!(summary.deficit_minutes, 192.0 * 60.0);
        assert_eq!(summary.daily_leave_days, 0);
        assert!(!summary.is_incomplete);
    }

    #[test]
    fn nine_to_five_single_day() {
        let events = vec![
            event(3, 9, 0, EventKind::ClockIn),
            event(3, 17, 0, EventKind::ClockOut),
        ];

        let summary = reconcile(&events, 192.0, &[]);

        assert_eq!(summary.physical_work_minutes, 480.0);
        assert_eq!(summary.net_work_minutes, 480.0);
        assert_eq!(summary.overtime_minutes, 0.0);
        assert_eq!(summary.deficit_minutes, 192.0 * 60.0 - 480.0);
        assert!(!summary.is_incomplete);
    }

    #[test]
    fn reconcile_is_invariant_under_input_order() {
        let mut events = vec![
            event(3, 9, 0, EventKind::ClockIn),
            event(3, 12, 0, EventKind::ClockOut),
            event(4, 8, 30, EventKind::ClockIn),
            event(4, 16, 30, EventKind::ClockOut),
        ];
        let mut requests = vec![
            request(LeaveKind::RemoteWork, 2.0, LeaveStatus::Approved),
            request(LeaveKind::DailyLeave, 1.0, LeaveStatus::Approved),
        ];

        let forward = reconcile(&events, 192.0, &requests);
        events.reverse();
        requests.reverse();
        let backward = reconcile(&events, 192.0, &requests);

        assert_eq!(forward, backward);
    }

    #[test]
    fn daily_leave_reduces_the_quota_by_one_workday() {
        let requests = vec![request(LeaveKind::DailyLeave, 3.0, LeaveStatus::Approved)];

        let summary = reconcile(&[], 192.0, &requests);

        // one day per request, regardless of the amount field
        assert_eq!(summary.daily_leave_days, 1);
        assert_eq!(summary.deficit_minutes, 192.0 * 60.0 - 480.0);
    }

    #[test]
    fn remote_work_credits_net_minutes() {
        let requests = vec![request(LeaveKind::RemoteWork, 2.5, LeaveStatus::Approved)];

        let summary = reconcile(&[], 192.0, &requests);

        assert_eq!(summary.remote_minutes, 150.0);
        assert_eq!(summary.net_work_minutes, 150.0);
    }

    #[test]
    fn hourly_pass_subtracts_from_physical_presence() {
        let events = vec![
            event(3, 9, 0, EventKind::ClockIn),
            event(3, 17, 0, EventKind::ClockOut),
        ];
        let requests = vec![request(LeaveKind::HourlyPass, 1.0, LeaveStatus::Approved)];

        let summary = reconcile(&events, 192.0, &requests);

        assert_eq!(summary.net_work_minutes, 420.0);
    }

    #[test]
    fn pass_events_take_precedence_over_hourly_pass_requests() {
        // 30 minutes of recorded pass events beat the 1h approved request
        let events = vec![
            event(3, 9, 0, EventKind::ClockIn),
            event(3, 11, 0, EventKind::PassStart),
            event(3, 11, 30, EventKind::PassEnd),
            event(3, 17, 0, EventKind::ClockOut),
        ];
        let requests = vec![request(LeaveKind::HourlyPass, 1.0, LeaveStatus::Approved)];

        let summary = reconcile(&events, 192.0, &requests);

        assert_eq!(summary.pass_minutes, 30.0);
        assert_eq!(summary.net_work_minutes, 450.0);
    }

    #[test]
    fn pending_and_rejected_requests_are_ignored() {
        let requests = vec![
            request(LeaveKind::RemoteWork, 8.0, LeaveStatus::Pending),
            request(LeaveKind::RemoteWork, 8.0, LeaveStatus::Rejected),
            request(LeaveKind::DailyLeave, 1.0, LeaveStatus::Pending),
        ];

        let summary = reconcile(&[], 192.0, &requests);

        assert_eq!(summary.remote_minutes, 0.0);
        assert_eq!(summary.daily_leave_days, 0);
    }

    #[test]
    fn unmatched_clock_in_contributes_no_minutes_but_flags_the_month() {
        let events = vec![
            event(3, 9, 0, EventKind::ClockIn),
            event(3, 17, 0, EventKind::ClockOut),
            event(4, 9, 0, EventKind::ClockIn),
        ];

        let summary = reconcile(&events, 192.0, &[]);

        assert_eq!(summary.physical_work_minutes, 480.0);
        assert!(summary.is_incomplete);
    }

    #[test]
    fn days_are_grouped_by_calendar_date_not_timestamp() {
        // a night shift attributed to day 5 pairs within that day even
        // though the clock-out's timestamp lands on day 6
        let mut clock_out = event(6, 1, 0, EventKind::ClockOut);
        clock_out.calendar_date = date(5);
        let events = vec![event(5, 21, 0, EventKind::ClockIn), clock_out];

        let summary = reconcile(&events, 192.0, &[]);

        assert_eq!(summary.physical_work_minutes, 240.0);
        assert!(!summary.is_incomplete);
    }

    #[test]
    fn overtime_and_deficit_are_mutually_exclusive() {
        let events = vec![
            event(3, 0, 0, EventKind::ClockIn),
            event(3, 10, 0, EventKind::ClockOut),
        ];

        let overtime = reconcile(&events, 8.0, &[]);
        assert_eq!(overtime.overtime_minutes, 120.0);
        assert_eq!(overtime.deficit_minutes, 0.0);

        let exact = reconcile(&events, 10.0, &[]);
        assert_eq!(exact.overtime_minutes, 0.0);
        assert_eq!(exact.deficit_minutes, 0.0);
    }

    #[test]
    fn format_minutes_floors_hours_and_rounds_minutes() {
        assert_eq!(format_minutes(0.0), "0h 0m");
        assert_eq!(format_minutes(480.0), "8h 0m");
        assert_eq!(format_minutes(90.4), "1h 30m");
        assert_eq!(format_minutes(125.7), "2h 6m");
    }

    #[test]
    fn formatting_is_idempotent_per_input() {
        for minutes in [0.0, 59.5, 480.0, 11_520.0, 123.456] {
            assert_eq!(format_minutes(minutes), format_minutes(minutes));
        }
    }
}
