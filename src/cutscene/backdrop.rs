//! Progress-driven colours of the launch backdrop.

use crate::grid::Rgba;
use crate::settings::CutsceneSettings;

#[expect(
    clippy::cast_possible_truncation,
    reason = "Colour channels only need f32 precision."
)]
fn to_channel(value: f64) -> f32 {
    value as f32
}

/// Background colour at `progress`: fades in from transparent, then blends
/// from sky to space, holding pure space from the space colour point on.
#[must_use]
pub fn background_color(progress: f64, settings: &CutsceneSettings) -> Rgba {
    let color = if progress >= settings.space_color_point {
        settings.space_color
    } else {
        let space_fade = to_channel(progress / settings.space_color_point);
        settings.space_color.linear_sum(settings.sky_color, space_fade)
    };

    let alpha = if progress < settings.sky_fade_in_point {
        to_channel(progress / settings.sky_fade_in_point)
    } else {
        1.0
    };
    color.with_alpha(alpha)
}

/// Global star opacity at `progress`.
#[must_use]
pub fn star_alpha(progress: f64, settings: &CutsceneSettings) -> f32 {
    if progress >= settings.stars_full_point {
        1.0
    } else if progress >= settings.stars_appear_point {
        to_channel(
            (progress - settings.stars_appear_point)
                / (settings.stars_full_point - settings.stars_appear_point),
        )
    } else {
        0.0
    }
}
