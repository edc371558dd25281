//! Parameter panel model shared by the DOM controls and the native key bindings.

use crate::constants::{PANEL_SCALE_MAX, PANEL_SCALE_MIN};
use crate::params::PlacementParams;

/// Step applied by the native keyboard bindings to the scale sliders.
pub const KEY_SCALE_STEP: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelEvent {
    MinScale(f32),
    MaxScale(f32),
    Rotate(bool),
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Slider { min: f32, max: f32, step: f32 },
    Toggle,
    Button,
}

/// One widget the front-end should render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelControl {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
}

pub const PANEL_CONTROLS: [PanelControl; 4] = [
    PanelControl {
        id: "minScale",
        label: "min scale",
        kind: ControlKind::Slider {
            min: PANEL_SCALE_MIN,
            max: PANEL_SCALE_MAX,
            step: 0.1,
        },
    },
    PanelControl {
        id: "maxScale",
        label: "max scale",
        kind: ControlKind::Slider {
            min: PANEL_SCALE_MIN,
            max: PANEL_SCALE_MAX,
            step: 0.1,
        },
    },
    PanelControl {
        id: "rotate",
        label: "rotate",
        kind: ControlKind::Toggle,
    },
    PanelControl {
        id: "clear",
        label: "clear",
        kind: ControlKind::Button,
    },
];

/// Clamp a scale to the slider's range; non-finite input falls back to the minimum.
#[inline]
pub fn clamp_scale(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(PANEL_SCALE_MIN, PANEL_SCALE_MAX)
    } else {
        PANEL_SCALE_MIN
    }
}

impl PanelEvent {
    /// Build the event a control with `id` emits for a raw widget value.
    /// Sliders parse `value` as a number, toggles as a boolean.
    pub fn from_control(id: &str, value: &str) -> Option<Self> {
        match id {
            "minScale" => value.trim().parse::<f32>().ok().map(Self::MinScale),
            "maxScale" => value.trim().parse::<f32>().ok().map(Self::MaxScale),
            "rotate" => value.trim().parse::<bool>().ok().map(Self::Rotate),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }

    /// Keyboard shortcut used by the desktop front-end.
    pub fn from_key(key: &str, params: &PlacementParams) -> Option<Self> {
        match key {
            "[" => Some(Self::MinScale(params.min_scale - KEY_SCALE_STEP)),
            "]" => Some(Self::MinScale(params.min_scale + KEY_SCALE_STEP)),
            "-" => Some(Self::MaxScale(params.max_scale - KEY_SCALE_STEP)),
            "=" | "+" => Some(Self::MaxScale(params.max_scale + KEY_SCALE_STEP)),
            "r" | "R" => Some(Self::Rotate(!params.rotate)),
            "c" | "C" => Some(Self::Clear),
            _ => None,
        }
    }

    /// Write a parameter edit into `params`. `Clear` leaves them untouched.
    /// Returns whether a parameter changed.
    pub fn apply(self, params: &mut PlacementParams) -> bool {
        let before = *params;
        match self {
            Self::MinScale(v) => params.min_scale = clamp_scale(v),
            Self::MaxScale(v) => params.max_scale = clamp_scale(v),
            Self::Rotate(on) => params.rotate = on,
            Self::Clear => {}
        }
        *params != before
    }
}
