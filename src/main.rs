use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use attendly::database::{
    init_database,
    repositories::{AttendanceRepository, LeaveRepository, SettingsRepository, UserRepository},
};
use attendly::handlers::{admin, attendance, auth, export, leave, stats};
use attendly::middleware::RequestId;
use attendly::{AppState, AuthService, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Attendly API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting Attendly API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories and services
    let user_repository = UserRepository::new(pool.clone());
    let attendance_repository = AttendanceRepository::new(pool.clone());
    let leave_repository = LeaveRepository::new(pool.clone());
    let settings_repository = SettingsRepository::new(pool.clone());
    let auth_service = AuthService::new(user_repository.clone(), config.clone());

    let app_state = web::Data::new(AppState { auth_service });
    let user_repo_data = web::Data::new(user_repository);
    let attendance_repo_data = web::Data::new(attendance_repository);
    let leave_repo_data = web::Data::new(leave_repository);
    let settings_repo_data = web::Data::new(settings_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    let client_base_url = config.client_base_url.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(user_repo_data.clone())
            .app_data(attendance_repo_data.clone())
            .app_data(leave_repo_data.clone())
            .app_data(settings_repo_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
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
                    .service(
                        web::scope("/export").route("/csv", web::get().to(export::export_csv)),
                    )
                    .service(
                        web::scope("/admin")
                            .route("/users", web::get().to(admin::get_users))
                            .route("/users/{id}", web::put().to(admin::update_user))
                            .route("/users/{id}", web::delete().to(admin::delete_user))
                            .route("/duty-quota", web::get().to(admin::get_duty_quota))
                            .route("/duty-quota", web::put().to(admin::set_duty_quota)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
