//! Quiz logic, independent of any UI toolkit.
//!
//! The controller owns the session and talks to the screen only through the
//! [`QuizSurface`] trait, so every rule can be exercised without a canvas.

mod controller;
mod session;
mod surface;

pub use controller::{
    QuizController, SelectionSource, SubmitOutcome, CORRECT_MESSAGE, UNKNOWN_COUNTRY,
};
pub use surface::{MapSurface, QuizSurface, RegionStyle};
