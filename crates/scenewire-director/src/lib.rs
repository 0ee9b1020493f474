//! Producer side: typed Update-stream construction and frame directors.

mod director;
mod writer;


pub use director::{BounceDirector, Director};
pub use writer::UpdateWriter;
