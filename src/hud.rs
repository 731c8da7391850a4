//! Heads-up display: player coordinates, age and the help overlay.

use glam::DVec2;

use crate::draw::{DrawCommand, DrawList};
use crate::grid::Rgba;
use crate::host::{PlayerState, TextMetrics};
use crate::rainbow::RainbowColor;
use crate::settings::HelpCommands;

const COORD_MARGIN: f64 = 40.0;
const COORD_GAP: f64 = 45.0;
const COORD_WIDTH_LIMIT: f64 = 250.0;
const AGE_X: f64 = 330.0;
const AGE_BOTTOM_MARGIN: f64 = 25.0;
const HELP_LINE_HEIGHT: f64 = 30.0;
const HELP_TOP_MARGIN: f64 = 80.0;
const HELP_COLUMNS: [f64; 3] = [20.0, 250.0, 570.0];

const KEY_REFERENCE: [&str; 8] = [
    "H TOGGLE SHOW HELP",
    "= MAKE SCREENSHOT",
    "+ ZOOM IN",
    "- ZOOM OUT",
    "F TOGGLE FIX CAMERA",
    "WASD MOVE",
    "Q USE BACKPACK",
    "SHIFT+Q USE BACKPACK",
];

/// Screen geometry the HUD lays itself out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudFrame {
    /// Screen centre in world units.
    pub center: DVec2,
    /// Zoomed view width.
    pub view_width: i32,
    /// Zoomed view height.
    pub view_height: i32,
}

impl HudFrame {
    fn half_width(&self) -> f64 {
        f64::from(self.view_width / 2)
    }

    fn half_height(&self) -> f64 {
        f64::from(self.view_height / 2)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "The HUD shows whole-number readouts, truncated toward zero."
)]
fn whole(value: f64) -> i64 {
    value as i64
}

/// Draws the player's coordinates in the top-left corner and age at the bottom.
pub fn draw_status(list: &mut DrawList, frame: &HudFrame, player: &PlayerState, text: &dyn TextMetrics) {
    list.set_color(Rgba::BLACK);

    let mut pos = frame.center
        + DVec2::new(-frame.half_width() + COORD_MARGIN, frame.half_height() - COORD_MARGIN);

    let x = whole(player.position.x).to_string();
    let advance = COORD_GAP + text.measure(&x);
    list.push(DrawCommand::ChalkText {
        text: x,
        pos,
        fade: 1.0,
        width_limit: COORD_WIDTH_LIMIT,
    });
    pos.x += advance;
    list.push(DrawCommand::ChalkText {
        text: whole(player.position.y).to_string(),
        pos,
        fade: 1.0,
        width_limit: COORD_WIDTH_LIMIT,
    });

    let age_pos = frame.center + DVec2::new(AGE_X, -(frame.half_height() - AGE_BOTTOM_MARGIN));
    list.text(whole(player.age).to_string(), age_pos);
}

/// Help-overlay label for the emotion at `index`, or `None` for the two
/// emotions that have no number key.
#[must_use]
pub fn emotion_label(index: usize, word: &str) -> Option<String> {
    if index == 7 || index == 8 {
        return None;
    }
    let id = if index > 6 { index - 2 } else { index };
    Some(if id < 10 {
        format!(" {id}: {word}")
    } else {
        format!("{id}: {word}")
    })
}

/// Draws the help overlay on a dimmed backdrop.
pub fn draw_help(
    list: &mut DrawList,
    frame: &HudFrame,
    rainbow: &RainbowColor,
    emotion_words: &[String],
    commands: &HelpCommands,
) {
    list.set_color(Rgba::new(0.0, 0.0, 0.0, 0.8));
    list.rect(frame.center, frame.half_width(), frame.half_height());

    let [r, _, b] = rainbow.channels();
    list.set_color(Rgba::new(r, 1.0, b, 1.0));

    let column_top = |offset: f64| {
        frame.center + DVec2::new(-frame.half_width() + offset, frame.half_height() - HELP_TOP_MARGIN)
    };
    let column = |list: &mut DrawList, offset: f64, lines: Vec<String>| {
        let mut pos = column_top(offset);
        for line in lines {
            list.text(line, pos);
            pos.y -= HELP_LINE_HEIGHT;
        }
    };

    let [emotes_x, keys_x, commands_x] = HELP_COLUMNS;

    let mut emotes: Vec<String> = emotion_words
        .iter()
        .enumerate()
        .filter_map(|(i, word)| emotion_label(i, word))
        .collect();
    emotes.push("PRESS NUMBER KEY FOR SHORT EMOTE".to_owned());
    emotes.push("WRITE EMOTE FOR PERMANENT EMOTE".to_owned());
    column(list, emotes_x, emotes);

    column(list, keys_x, KEY_REFERENCE.iter().map(|line| (*line).to_owned()).collect());

    column(
        list,
        commands_x,
        vec![
            format!("{} - BABY SUICIDE", commands.die),
            format!("{} - TOGGLE SHOW FPS", commands.fps),
            format!("{} - TOGGLE SHOW NETWORK", commands.net),
            format!("{} - SHOW PING", commands.ping),
        ],
    );
}
