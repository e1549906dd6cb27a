//! Plot engine: geometry, reference quantities, styling, and assembly

pub mod assemble;
pub mod description;
pub mod geometry;
pub mod reference;
pub mod shapes;
pub mod style;

pub use assemble::assemble;
pub use description::{CompoundMetrics, PlotDescription, Trace};
pub use geometry::{AxisRange, CurveGeometry};
pub use reference::ReferenceQuantities;
pub use shapes::{Annotation, Shape};
pub use style::{LegendDescriptor, LegendPosition, PlotStyle, StyleColors};
