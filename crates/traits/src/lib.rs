pub mod measure;

pub use measure::{ContentMeasurer, InMemoryMeasurer, MeasureError};
