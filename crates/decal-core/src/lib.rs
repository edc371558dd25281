//! Platform-independent core of the cone decal projector: scene, picking,
//! placement and the data the front-end renderers draw.

pub mod app;
pub mod batch;
pub mod camera;
pub mod config;
pub mod constants;
pub mod decal;
pub mod error;
pub mod geometry;
pub mod input;
pub mod material;
pub mod math;
pub mod panel;
pub mod params;
pub mod raycast;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod stats;
pub mod surface_angle;
pub mod texture;
pub mod tracker;

pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
pub static DECAL_WGSL: &str = include_str!("../shaders/decal.wgsl");

pub use app::App;
pub use camera::{Camera, OrbitController, Viewport};
pub use config::SceneConfig;
pub use decal::{BoxClipProjector, DecalGeometry, DecalInstance, DecalProjector, DecalSet};
pub use error::{DecalError, Result};
pub use input::{EventOutcome, InputEvent};
pub use panel::{PanelControl, PanelEvent, PANEL_CONTROLS};
pub use params::PlacementParams;
pub use scene::Scene;
pub use stats::FrameStats;
pub use surface_angle::SurfaceAngle;
pub use tracker::{IntersectionState, PointerTracker};
