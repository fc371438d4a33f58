use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use attendly::database::models::{User, UserRole};
use attendly::database::repositories::{
    AttendanceRepository, LeaveRepository, SettingsRepository, UserRepository,
};
use attendly::handlers::{admin, attendance, auth, export, leave, stats};
use attendly::{AppState, AuthService, Config};

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost:5432/attendly_test".to_string(),
        jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
        jwt_expiration_days: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
        duty_hours_default: 192.0,
    }
}

/// Pool that never dials the database. Guard and validation tests are
/// rejected before any query runs, so no live Postgres is needed.
pub fn lazy_pool(config: &Config) -> PgPool {
    PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("Failed to create lazy pool")
}

pub fn mock_user(role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", Uuid::new_v4()),
        password_hash: "not-a-real-hash".to_string(),
        name: "Test User".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

pub fn mint_token(user: &User, config: &Config) -> String {
    let auth_service = AuthService::new(
        UserRepository::new(lazy_pool(config)),
        config.clone(),
    );
    auth_service
        .generate_token(user)
        .expect("Failed to mint test token")
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Full application with the production route tree, wired to a lazy pool
pub fn test_app(
    config: &Config,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let pool = lazy_pool(config);

    let user_repository = UserRepository::new(pool.clone());
    let attendance_repository = AttendanceRepository::new(pool.clone());
    let leave_repository = LeaveRepository::new(pool.clone());
    let settings_repository = SettingsRepository::new(pool.clone());
    let auth_service = AuthService::new(user_repository.clone(), config.clone());

    App::new()
        .app_data(web::Data::new(AppState { auth_service }))
        .app_data(web::Data::new(user_repository))
        .app_data(web::Data::new(attendance_repository))
        .app_data(web::Data::new(leave_repository))
        .app_data(web::Data::new(settings_repository))
        .app_data(web::Data::new(config.clone()))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                .service(
                    web::scope("/attendance")
                        .route("/clock-in", web::post().to(attendance::clock_in))
                        .route("/clock-out", web::post().to(attendance::clock_out))
                        .route("/pass-start", web::post().to(attendance::pass_start))
                        .route("/pass-end", web::post().to(attendance::pass_end))
                        .route("/events", web::get().to(attendance::get_events)),
                )
                .service(
                    web::scope("/leave")
                        .route("", web::post().to(leave::create_leave_request))
                        .route("", web::get().to(leave::get_leave_requests))
                        .route("/{id}", web::get().to(leave::get_leave_request))
                        .route("/{id}", web::delete().to(leave::delete_leave_request))
                        .route("/{id}/approve", web::post().to(leave::approve_leave_request))
                        .route("/{id}/reject", web::post().to(leave::reject_leave_request)),
                )
                .service(
                    web::scope("/stats")
                        .route("/work-summary", web::get().to(stats::get_work_summary))
                        .route("/incomplete", web::get().to(stats::get_incomplete_alerts)),
                )
                .service(web::scope("/export").route("/csv", web::get().to(export::export_csv)))
                .service(
                    web::scope("/admin")
                        .route("/users", web::get().to(admin::get_users))
                        .route("/users/{id}", web::put().to(admin::update_user))
                        .route("/users/{id}", web::delete().to(admin::delete_user))
                        .route("/duty-quota", web::get().to(admin::get_duty_quota))
                        .route("/duty-quota", web::put().to(admin::set_duty_quota)),
                ),
        )
}
