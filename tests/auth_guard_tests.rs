use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serial_test::serial;

mod common;

// Macro to generate unauthorized access tests
macro_rules! test_unauthorized {
    ($test_name:ident, $method:ident, $uri:expr) => {
        #[actix_web::test]
        #[serial]
        async fn $test_name() {
            let config = common::test_config();
            let app = test::init_service(common::test_app(&config)).await;

            let req = test::TestRequest::$method().uri($uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    };
}

test_unauthorized!(test_me_unauthorized, get, "/api/v1/auth/me");
test_unauthorized!(test_clock_in_unauthorized, post, "/api/v1/attendance/clock-in");
test_unauthorized!(test_clock_out_unauthorized, post, "/api/v1/attendance/clock-out");
test_unauthorized!(test_pass_start_unauthorized, post, "/api/v1/attendance/pass-start");
test_unauthorized!(test_pass_end_unauthorized, post, "/api/v1/attendance/pass-end");
test_unauthorized!(test_get_events_unauthorized, get, "/api/v1/attendance/events");
test_unauthorized!(test_get_leave_unauthorized, get, "/api/v1/leave");
test_unauthorized!(test_work_summary_unauthorized, get, "/api/v1/stats/work-summary?year=2025&month=3");
test_unauthorized!(test_incomplete_unauthorized, get, "/api/v1/stats/incomplete?year=2025&month=3");
test_unauthorized!(test_export_unauthorized, get, "/api/v1/export/csv?year=2025&month=3");
test_unauthorized!(test_admin_users_unauthorized, get, "/api/v1/admin/users");
test_unauthorized!(test_duty_quota_unauthorized, get, "/api/v1/admin/duty-quota?year=2025&month=3");

#[actix_web::test]
#[serial]
async fn test_garbage_token_is_rejected() {
    let config = common::test_config();
    let app = test::init_service(common::test_app(&config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_token_signed_with_other_secret_is_rejected() {
    let config = common::test_config();
    let app = test::init_service(common::test_app(&config)).await;

    let mut other_config = common::test_config();
    other_config.jwt_secret = "a-completely-different-secret-key".to_string();
    let user = common::mock_user(attendly::database::models::UserRole::Employee);
    let token = common::mint_token(&user, &other_config);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(common::auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
