//! Plain-data draw lists handed to the host renderer.
//!
//! HUD and cutscene code never touch a graphics context; they emit
//! [`DrawCommand`]s in painter's order and the host replays them.

use glam::DVec2;

use crate::grid::{ObjectId, Rgba};

/// One rendering step. Positions are in world (screen-centred) units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Sets the colour used by subsequent primitives.
    SetColor(Rgba),
    /// Multiplies the current colour's alpha for subsequent primitives.
    SetFade(f32),
    /// Axis-aligned rectangle given by its centre and half extents.
    Rect {
        /// Centre of the rectangle.
        center: DVec2,
        /// Half the width.
        half_width: f64,
        /// Half the height.
        half_height: f64,
    },
    /// Handwriting-font text.
    Text {
        /// String to draw.
        text: String,
        /// Left edge of the baseline.
        pos: DVec2,
    },
    /// Text on a chalkboard backdrop, wrapped at `width_limit`.
    ChalkText {
        /// String to draw.
        text: String,
        /// Left edge of the baseline.
        pos: DVec2,
        /// Opacity of text and backdrop.
        fade: f64,
        /// Width at which the text wraps.
        width_limit: f64,
    },
    /// A world object's sprite.
    Sprite {
        /// Object type whose sprite is drawn.
        object: ObjectId,
        /// Sprite anchor.
        pos: DVec2,
    },
    /// A speech bubble.
    Speech {
        /// Words in the bubble.
        text: String,
        /// Bubble anchor.
        pos: DVec2,
        /// Bubble opacity.
        fade: f64,
    },
}

impl DrawCommand {
    /// The string this command draws, if it draws one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } | Self::ChalkText { text, .. } | Self::Speech { text, .. } => {
                Some(text.as_str())
            }
            _ => None,
        }
    }
}

/// Collects draw commands in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Appends `command`.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Appends [`DrawCommand::SetColor`].
    pub fn set_color(&mut self, color: Rgba) {
        self.push(DrawCommand::SetColor(color));
    }

    /// Appends [`DrawCommand::Rect`].
    pub fn rect(&mut self, center: DVec2, half_width: f64, half_height: f64) {
        self.push(DrawCommand::Rect {
            center,
            half_width,
            half_height,
        });
    }

    /// Appends [`DrawCommand::Text`].
    pub fn text(&mut self, text: impl Into<String>, pos: DVec2) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
        });
    }

    /// Commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hands the commands over to the renderer.
    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Whether nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text string in the list, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(DrawCommand::text)
    }

    /// Drops every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Extend<DrawCommand> for DrawList {
    fn extend<T: IntoIterator<Item = DrawCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}
