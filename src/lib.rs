#![cfg_attr(docsrs, feature(doc_cfg))]
//! Client-side input, HUD and launch cutscene logic for a grid-based
//! survival game.
//! Re-exports the controller, cutscene and Bevy plugins for the demo binary
//! and tests.
pub mod actions;
pub mod camera;
pub mod constants;
pub mod cutscene;
pub mod draw;
pub mod error;
pub mod grid;
pub mod hazards;
pub mod host;
pub mod hud;
pub mod logging;
pub mod movement;
pub mod presentation;
pub mod protocol;
pub mod rainbow;
pub mod session;
pub mod settings;
pub mod walkability;
pub mod world_handle;
pub use constants::*;

// Re-export commonly used items
pub use cutscene::{CutscenePhase, LaunchParams, RocketLaunch};
pub use draw::{DrawCommand, DrawList};
pub use error::{CutsceneError, ProtocolError, SettingsError};
pub use grid::{GridCell, ObjectId, PlayerId, Rgba};
pub use hazards::HazardSet;
pub use host::{ActionSink, CoordinateSpace, HostPorts, PlayerState, TextMetrics, Viewport, WorldQuery};
pub use logging::init as init_logging;
pub use movement::{resolve_move, MoveAttempt, MovementController, MovementIntent};
pub use presentation::{HudPlugin, RocketLaunchPlugin};
pub use protocol::ActionMessage;
pub use rainbow::RainbowColor;
pub use session::ClientSession;
pub use settings::ClientSettings;
pub use world_handle::{Outbox, WireOffset, WorldHandle};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use wayside::prelude::*;
    //! ```

    pub use crate::cutscene::{LaunchParams, RocketLaunch};
    pub use crate::grid::{GridCell, ObjectId, PlayerId};
    pub use crate::host::{PlayerState, Viewport, WorldQuery};
    pub use crate::movement::MovementIntent;
    pub use crate::presentation::{HudPlugin, LastFrameActions, LaunchInbox, RocketLaunchPlugin};
    pub use crate::session::ClientSession;
    pub use crate::world_handle::{Outbox, WorldHandle};
}
