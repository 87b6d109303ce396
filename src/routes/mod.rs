pub mod dashboard;
pub mod export;
pub mod health;
pub mod login;
pub mod register;
pub mod sales;
pub mod upload;

pub use dashboard::{dashboard_chart, get_dashboard};
pub use export::export_sales;
pub use health::health_check;
pub use login::{login_user, logout_user};
pub use register::register_user;
pub use sales::{clear_sales, list_sales};
pub use upload::upload_sales;
