//! Domain services used by HTTP routes.
//!
//! Route handlers stay focused on extraction and status mapping; session
//! and credential logic lives here.

pub mod session;
