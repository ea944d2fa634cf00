//! In-memory core for the club-management app: the calendar event index with
//! its month filter, the per-event attendance sheet, the points leaderboard,
//! and the meeting-minutes log. Networking, auth, and rendering live in the
//! hosting front end; this crate only holds validated data and the pure
//! transforms over it.

pub mod attendance;
pub mod calendar;
mod error;
pub mod leaderboard;
pub mod logging;
pub mod meetings;

pub use error::{AppError, AppResult};
