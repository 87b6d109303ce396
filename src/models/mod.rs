pub mod sales;
pub mod session;
pub mod user;

pub use sales::SalesRecord;
pub use session::Session;
pub use user::User;
