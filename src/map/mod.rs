pub mod figure;
pub mod projector;

pub use figure::{MapFigure, MapStyle};
pub use projector::{project, MapCenter, MapMarker, MapProjection, MarkerDetails};
