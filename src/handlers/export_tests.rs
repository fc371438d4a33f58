#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use crate::database::models::{AttendanceEvent, EventKind, User, UserRole};
    use crate::handlers::export::{detailed_csv, summary_csv};
    use crate::services::worktime;

    fn user(name: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "x".to_string(),
            name: name.to_string(),
            role: UserRole::Employee,
            created_at: now,
            updated_at: now,
        }
    }

    fn event(user_id: Uuid, hour: u32, kind: EventKind) -> AttendanceEvent {
        let calendar_date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        AttendanceEvent {
            id: Uuid::new_v4(),
            user_id,
            timestamp_ms: calendar_date
                .and_hms_opt(hour, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis(),
            kind,
            calendar_date,
            display_time: format!("{:02}:00", hour),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_csv_starts_with_utf8_bom() {
        let bytes = summary_csv(&[]).unwrap();
        assert_eq!(&bytes[..3], b"\xef\xbb\xbf");
    }

    #[test]
    fn summary_csv_has_one_row_per_person() {
        let alice = user("Alice", "alice@example.com");
        let bob = user("Bob", "bob@example.com");
        let events = vec![
            event(alice.id, 9, EventKind::ClockIn),
            event(alice.id, 17, EventKind::ClockOut),
        ];

        let rows = vec![
            (&alice, worktime::reconcile(&events, 192.0, &[])),
            (&bob, worktime::reconcile(&[], 192.0, &[])),
        ];
        let bytes = summary_csv(&rows).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,email,physical_minutes"));
        assert!(lines[1].starts_with("Alice,alice@example.com,480,"));
        assert!(lines[2].starts_with("Bob,bob@example.com,0,"));
    }

    #[test]
    fn detailed_csv_has_one_row_per_event() {
        let alice = user("Alice", "alice@example.com");
        let users = vec![alice.clone()];
        let events = vec![
            event(alice.id, 9, EventKind::ClockIn),
            event(alice.id, 17, EventKind::ClockOut),
        ];

        let bytes = detailed_csv(&users, &events).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,date,kind,time,timestamp_ms");
        assert!(lines[1].starts_with("Alice,2025-03-03,clock_in,09:00,"));
        assert!(lines[2].starts_with("Alice,2025-03-03,clock_out,17:00,"));
    }
}
