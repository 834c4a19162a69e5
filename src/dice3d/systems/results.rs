//! Results display systems

use bevy::prelude::*;

use crate::dice3d::lifecycle::{RollLifecycle, RollPhase};
use crate::dice3d::types::*;

/// Copy the score board displays into their text nodes
pub fn update_score_texts(
    score: Res<ScoreBoard>,
    mut current_query: Query<&mut Text, (With<CurrentRollText>, Without<RollSumText>)>,
    mut sum_query: Query<&mut Text, (With<RollSumText>, Without<CurrentRollText>)>,
) {
    if !score.is_changed() {
        return;
    }

    for mut text in current_query.iter_mut() {
        text.0 = score.current.text().to_string();
    }

    for mut text in sum_query.iter_mut() {
        text.0 = score.total.text().to_string();
    }
}

/// Show the derived drag velocity while a die is being dragged
pub fn update_velocity_debug(
    settings: Res<RollSettings>,
    dice_query: Query<(&Die, &RollLifecycle)>,
    mut text_query: Query<(&mut Text, &mut Visibility), With<VelocityDebugText>>,
) {
    let dragged = dice_query
        .iter()
        .find(|(_, lifecycle)| lifecycle.phase() == RollPhase::Dragging);

    for (mut text, mut visibility) in text_query.iter_mut() {
        match dragged {
            Some((die, lifecycle)) if settings.display.show_velocity_debug => {
                let velocity = lifecycle.derived_velocity();
                text.0 = format!(
                    "{} drag velocity: {:.2} ({:.2}, {:.2}, {:.2})",
                    die.die_type.name(),
                    velocity.length(),
                    velocity.x,
                    velocity.y,
                    velocity.z
                );
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}
