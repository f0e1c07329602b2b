//! Cache-aside read services.
//!
//! Services are cheap to build and hold no state across requests: construct
//! one per call with the stores and parameters, then `get()` it.

mod list;
mod objects;
mod retrieve;

pub use list::ListService;
pub use objects::{CinemaObject, CinemaObjectList};
pub use retrieve::RetrieveService;
