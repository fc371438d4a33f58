pub mod attendance;
pub mod leave;
pub mod settings;
pub mod user;

pub use attendance::AttendanceRepository;
pub use leave::LeaveRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
