use glam::Vec2;

/// Platform-neutral input, in physical pixels with the origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { position: Vec2, primary: bool },
    PointerDown { position: Vec2 },
    PointerUp { position: Vec2 },
    Resize { width: u32, height: u32 },
}

/// What an event did, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    /// The camera orbited or zoomed.
    CameraMoved,
    /// The pointer was picked against the target.
    Tracked { hit: bool },
    /// A click landed on the target and produced a decal.
    DecalPlaced { render_order: u32 },
    /// A click released over empty space.
    ClickMissed,
    Resized,
}
