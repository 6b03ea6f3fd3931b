//! Scrollbar for paged item carousels.
//!
//! Maps drags on a scrollbar handle to carousel indices, and carousel
//! navigation back to handle position or progress size.

pub mod bus;
pub mod config;
pub mod controller;
pub mod drag;
pub mod event;
pub mod geometry;
pub mod mapper;
pub mod plugin;
pub mod pointer;
pub mod render;
pub mod style;
pub mod turn;

pub use bus::{EventBus, Subscription};
pub use config::{ConfigError, ScrollbarOptions, ScrollbarType};
pub use controller::{HandlePosition, ScrollbarController};
pub use drag::{DragMachine, DragPhase, DragSession, DragStep, DragUpdate};
pub use event::{Carousel, CarouselEvent, EventResult, NavigationRequest, PageInfo};
pub use geometry::{Bounds, GeometryError, ScrollbarGeometry};
pub use plugin::ScrollbarPlugin;
pub use pointer::{FormControl, InputKind, Point, PointerEvent, PointerPhase, Target, TargetId};
pub use render::{Part, Positioning, Renderer, StyleRenderer};
pub use style::{StyleProperty, StyleSnapshot, StyleSurface};
pub use turn::TurnQueue;
