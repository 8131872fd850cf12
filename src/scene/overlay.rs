use bevy::prelude::*;
use bevy::ui::{AlignItems, JustifyContent, Node, PositionType, Val};
use rand::Rng;

use crate::choreography::{SectionActivated, SectionId};

/// Font size of the section heading.
const HEADING_FONT_SIZE: f32 = 48.0;
/// Distance of the heading from the bottom-left window corner.
const HEADING_MARGIN: f32 = 48.0;

/// Text node showing the focused section's title.
#[derive(Component)]
pub struct SectionHeading;

/// Per-heading neon flicker with a randomized phase.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HeadingFlicker {
    /// Phase offset in seconds, in `[-PERIOD, 0)`.
    delay: f32,
}

impl HeadingFlicker {
    /// Length of one flicker cycle in seconds.
    pub const PERIOD: f32 = 6.0;

    pub fn new(delay: f32) -> Self {
        Self { delay }
    }

    /// Pick a fresh random phase so headings never flicker in unison.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(rng.random_range(-Self::PERIOD..0.0))
    }

    /// Text opacity at `seconds`: steady, with two short dips late in the cycle.
    pub fn opacity(&self, seconds: f32) -> f32 {
        let phase = ((seconds - self.delay) / Self::PERIOD).rem_euclid(1.0);
        if (0.90..0.92).contains(&phase) {
            0.35
        } else if (0.94..0.95).contains(&phase) {
            0.6
        } else {
            1.0
        }
    }
}

/// Spawn the heading overlay anchored bottom-left.
pub(super) fn spawn_heading_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::FlexEnd,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(HEADING_MARGIN),
                    bottom: Val::Px(HEADING_MARGIN),
                    ..default()
                },
                Text::new(SectionId::Hero.title()),
                TextFont {
                    font_size: HEADING_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                SectionHeading,
                HeadingFlicker::random(&mut rand::rng()),
            ));
        });
}

/// Swap the heading text when a section comes into focus.
pub fn section_heading_system(
    mut activations: MessageReader<SectionActivated>,
    mut heading_query: Query<(&mut Text, &mut HeadingFlicker), With<SectionHeading>>,
) {
    let Some(section) = activations
        .read()
        .filter_map(|activation| activation.id.parse::<SectionId>().ok())
        .last()
    else {
        return;
    };
    let mut rng = rand::rng();
    for (mut text, mut flicker) in &mut heading_query {
        text.0 = section.title().to_owned();
        *flicker = HeadingFlicker::random(&mut rng);
    }
}

/// Apply each heading's flicker opacity.
pub fn heading_flicker_system(
    time: Res<Time>,
    mut heading_query: Query<(&HeadingFlicker, &mut TextColor)>,
) {
    let seconds = time.elapsed_secs();
    for (flicker, mut color) in &mut heading_query {
        color.0 = Color::WHITE.with_alpha(flicker.opacity(seconds));
    }
}
