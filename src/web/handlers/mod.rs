//! HTML page handlers for the web layer.

mod dashboard;
mod login;
mod logout;

pub use dashboard::dashboard_handler;
pub use login::{LoginForm, login_page_handler, login_submit_handler};
pub use logout::logout_handler;
