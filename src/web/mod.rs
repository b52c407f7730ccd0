//! Web layer: server-rendered pages, cookies and sessions.
//!
//! Uses Askama templates for rendering and `tower-sessions` for sessions.
//!
//! # Modules
//!
//! - [`cookies`] - The remember-me cookie
//! - [`handlers`] - Page handlers (login, logout, dashboard)
//! - [`messages`] - Localized UI strings
//! - [`middleware`] - Session-based access control
//! - [`routes`] - Route configuration
//! - [`session`] - Typed login state inside the session

pub mod cookies;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod routes;
pub mod session;
