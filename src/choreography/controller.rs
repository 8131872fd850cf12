use bevy::prelude::*;

use crate::choreography::easing::{Easing, quintic_in_out};
use crate::choreography::section::{SectionId, SectionTarget};
use crate::choreography::tracking::{self, RACETRACK_APPROACH_OFFSET};
use crate::choreography::tween::Tween;
use crate::scene::{BodyPositions, CelestialBody};

/// Active camera choreography state, one per page section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Earth close-up at the top of the page.
    #[default]
    Hero,
    /// Gaze at the moon, then park behind it.
    MoonAbout,
    /// Beside the moon, looking back at earth.
    MoonSkills,
    /// Elliptical flythrough between earth and sun.
    Racetrack,
    /// Sun close-up.
    Experience,
    /// Earth close-up again.
    Education,
    /// Wide earth shot.
    Contact,
}

impl ViewMode {
    /// Mode entered when `section` is activated.
    pub const fn for_section(section: SectionId) -> Self {
        match section {
            SectionId::Hero => ViewMode::Hero,
            SectionId::About => ViewMode::MoonAbout,
            SectionId::Skills => ViewMode::MoonSkills,
            SectionId::Projects => ViewMode::Racetrack,
            SectionId::Experience => ViewMode::Experience,
            SectionId::Education => ViewMode::Education,
            SectionId::Contact => ViewMode::Contact,
        }
    }
}

/// Camera position and gaze target in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
}

/// Outcome of entering a section: new mode, destination and tracked body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Mode after the trigger.
    pub mode: ViewMode,
    /// Where the tweens end.
    pub destination: CameraPose,
    /// Body used for re-trigger suppression afterwards.
    pub tracked: Option<CelestialBody>,
    /// Whether the camera position is tweened at all.
    pub tween_position: bool,
}

/// Camera offset used when a body target has no configured offset.
const FALLBACK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 10.0);
/// Absolute camera position used when there is no target at all.
const FALLBACK_POSITION: Vec3 = Vec3::new(0.0, 0.0, 15.0);
/// Look-at X adjustment for the sun close-up.
const EXPERIENCE_LOOK_SHIFT_X: f32 = -34.0;

/// Destination for a plain body-framing section.
pub fn default_destination(
    section: SectionId,
    target: Option<Vec3>,
    offset: Option<Vec3>,
) -> CameraPose {
    match (target, offset) {
        (Some(target), Some(offset)) => {
            let mut look_at = target;
            if section == SectionId::Experience {
                look_at.x += EXPERIENCE_LOOK_SHIFT_X;
            }
            CameraPose {
                position: target + offset,
                look_at,
            }
        }
        (Some(target), None) => CameraPose {
            position: target + FALLBACK_OFFSET,
            look_at: target,
        },
        (None, _) => CameraPose {
            position: FALLBACK_POSITION,
            look_at: Vec3::ZERO,
        },
    }
}

/// Resolve a section into its transition, given current body positions.
///
/// `None` means a body the section needs is missing, which callers treat as a
/// no-op.
pub fn transition(section: SectionId, bodies: &BodyPositions) -> Option<Transition> {
    let mode = ViewMode::for_section(section);
    match section.target() {
        SectionTarget::MoonAbout => {
            let moon = bodies.moon?;
            Some(Transition {
                mode,
                destination: CameraPose {
                    position: moon,
                    look_at: moon,
                },
                tracked: Some(CelestialBody::Moon),
                tween_position: false,
            })
        }
        SectionTarget::MoonSkills => {
            let (earth, moon) = (bodies.earth?, bodies.moon?);
            Some(Transition {
                mode,
                destination: CameraPose {
                    position: tracking::moon_skills_camera(earth, moon),
                    look_at: earth,
                },
                tracked: Some(CelestialBody::Moon),
                tween_position: true,
            })
        }
        SectionTarget::Racetrack => {
            let (earth, sun) = (bodies.earth?, bodies.sun?);
            let midpoint = tracking::racetrack_midpoint(earth, sun);
            Some(Transition {
                mode,
                destination: CameraPose {
                    position: midpoint + RACETRACK_APPROACH_OFFSET,
                    look_at: midpoint,
                },
                tracked: None,
                tween_position: true,
            })
        }
        SectionTarget::Body { body, offset } => {
            let target = bodies.get(body)?;
            Some(Transition {
                mode,
                destination: default_destination(section, Some(target), offset),
                tracked: Some(body),
                tween_position: true,
            })
        }
    }
}

/// Scroll-driven camera state: mode, tweens, live pose and tracking.
#[derive(Resource, Debug)]
pub struct CameraChoreographer {
    /// Current view mode.
    mode: ViewMode,
    /// True from trigger until the look-at tween completes.
    animating: bool,
    /// Body the camera was last sent to.
    tracked: Option<CelestialBody>,
    /// Live camera pose applied every frame.
    pose: CameraPose,
    /// In-flight camera position tween.
    position_tween: Option<Tween>,
    /// In-flight look-at tween.
    look_tween: Option<Tween>,
}

impl CameraChoreographer {
    /// Duration of every trigger tween, in seconds.
    pub const TWEEN_DURATION: f32 = 2.0;
    /// Curve shared by position and look-at tweens.
    pub const TWEEN_EASING: Easing = quintic_in_out;

    /// Start in hero mode at `pose`, with nothing animating.
    pub fn new(pose: CameraPose) -> Self {
        Self {
            mode: ViewMode::Hero,
            animating: false,
            tracked: None,
            pose,
            position_tween: None,
            look_tween: None,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// End value of the running position tween, if any.
    pub fn position_destination(&self) -> Option<Vec3> {
        self.position_tween.as_ref().map(Tween::end)
    }

    /// End value of the running look-at tween, if any.
    pub fn look_destination(&self) -> Option<Vec3> {
        self.look_tween.as_ref().map(Tween::end)
    }

    /// Handle a section id coming from the page. Unknown ids are ignored.
    ///
    /// Returns whether a new transition started.
    pub fn on_section_activated(&mut self, id: &str, bodies: &BodyPositions) -> bool {
        match id.parse::<SectionId>() {
            Ok(section) => self.activate(section, bodies),
            Err(err) => {
                debug!("ignoring section trigger: {err}");
                false
            }
        }
    }

    /// Enter `section`: compute its destination and restart the tweens.
    pub fn activate(&mut self, section: SectionId, bodies: &BodyPositions) -> bool {
        let body = section.target_body();
        if bodies.get(body).is_none() {
            debug!("section `{section}` target {body:?} is missing");
            return false;
        }
        if self.tracked == Some(body) && !self.animating && body != CelestialBody::Moon {
            debug!("section `{section}` already framed; trigger ignored");
            return false;
        }
        let Some(transition) = transition(section, bodies) else {
            debug!("section `{section}` is missing a body it needs");
            return false;
        };

        self.mode = transition.mode;
        self.animating = true;
        self.tracked = transition.tracked;
        self.position_tween = transition.tween_position.then(|| {
            Tween::new(
                self.pose.position,
                transition.destination.position,
                Self::TWEEN_DURATION,
                Self::TWEEN_EASING,
            )
        });
        self.look_tween = Some(Tween::new(
            self.pose.look_at,
            transition.destination.look_at,
            Self::TWEEN_DURATION,
            Self::TWEEN_EASING,
        ));
        info!(
            "camera heading to `{section}` ({:?}), looking at {:?}",
            self.mode,
            self.look_destination()
        );
        if let Some(position) = self.position_destination() {
            debug!("camera position tween toward {position:?}");
        }
        true
    }

    /// Advance tweens by `dt`, then run continuous tracking once idle.
    pub fn advance(&mut self, dt: f32, elapsed: f32, bodies: &BodyPositions) {
        if let Some(tween) = self.position_tween.as_mut() {
            self.pose.position = tween.advance(dt);
            if tween.is_finished() {
                self.position_tween = None;
            }
        }
        if let Some(tween) = self.look_tween.as_mut() {
            self.pose.look_at = tween.advance(dt);
            if tween.is_finished() {
                self.look_tween = None;
                self.animating = false;
            }
        }
        if !self.animating {
            tracking::track(self.mode, &mut self.pose, bodies, elapsed, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::tracking::{RACETRACK_HEIGHT, racetrack_midpoint, racetrack_radii};

    const EARTH: Vec3 = Vec3::new(7.0, -3.0, -5.0);
    const SUN: Vec3 = Vec3::new(-100.0, 0.0, -400.0);
    const MOON: Vec3 = Vec3::new(13.0, -3.0, -5.0);

    fn bodies() -> BodyPositions {
        BodyPositions {
            sun: Some(SUN),
            earth: Some(EARTH),
            moon: Some(MOON),
        }
    }

    fn cold_start() -> CameraChoreographer {
        CameraChoreographer::new(CameraPose {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: SUN,
        })
    }

    /// Run `seconds` of frames at 60 Hz, tracking elapsed time.
    fn run_frames(choreo: &mut CameraChoreographer, elapsed: &mut f32, seconds: f32) {
        let dt = 1.0 / 60.0;
        let frames = (seconds / dt).round() as usize;
        for _ in 0..frames {
            *elapsed += dt;
            choreo.advance(dt, *elapsed, &bodies());
        }
    }

    /// Contact from a cold start tweens to earth + (0, 0, 15) in 2000 ms.
    #[test]
    fn contact_from_cold_start() {
        let mut choreo = cold_start();
        assert!(choreo.on_section_activated("contact", &bodies()));
        assert_eq!(choreo.mode(), ViewMode::Contact);
        assert!(choreo.is_animating());
        assert_eq!(
            choreo.position_destination(),
            Some(EARTH + Vec3::new(0.0, 0.0, 15.0))
        );
        assert_eq!(choreo.look_destination(), Some(EARTH));

        for _ in 0..3 {
            choreo.advance(0.5, 0.0, &bodies());
        }
        assert!(choreo.is_animating());
        choreo.advance(0.5, 0.0, &bodies());
        assert!(!choreo.is_animating());
        assert_eq!(choreo.pose().position, EARTH + Vec3::new(0.0, 0.0, 15.0));
        assert_eq!(choreo.pose().look_at, EARTH);
    }

    /// Unknown ids leave the mode and pose untouched.
    #[test]
    fn unknown_section_is_ignored() {
        let mut choreo = cold_start();
        choreo.on_section_activated("skills", &bodies());
        let before = choreo.pose();
        assert!(!choreo.on_section_activated("footer", &bodies()));
        assert_eq!(choreo.mode(), ViewMode::MoonSkills);
        assert_eq!(choreo.pose(), before);
    }

    /// Each trigger leaves either its own mode or, when suppressed, the prior one.
    #[test]
    fn mode_follows_each_trigger() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        for section in SectionId::ALL {
            let prior = choreo.mode();
            let started = choreo.activate(section, &bodies());
            let expected = if started {
                ViewMode::for_section(section)
            } else {
                prior
            };
            assert_eq!(choreo.mode(), expected);
            // Contact follows education, which already framed the earth.
            assert_eq!(started, section != SectionId::Contact);
            run_frames(&mut choreo, &mut elapsed, 2.5);
        }
    }

    /// Skills triggered mid-way through about wins the look-at tween.
    #[test]
    fn last_trigger_wins() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        choreo.on_section_activated("about", &bodies());
        run_frames(&mut choreo, &mut elapsed, 0.5);
        assert!(choreo.is_animating());

        choreo.on_section_activated("skills", &bodies());
        assert_eq!(choreo.look_destination(), Some(EARTH));
        run_frames(&mut choreo, &mut elapsed, 2.5);
        assert!(!choreo.is_animating());
        assert!((choreo.pose().look_at - EARTH).length() < 1e-4);
    }

    /// The about trigger animates only the gaze, never the position.
    #[test]
    fn about_keeps_camera_position() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        let before = choreo.pose().position;
        choreo.on_section_activated("about", &bodies());
        assert_eq!(choreo.pose().position, before);
        assert_eq!(choreo.position_destination(), None);
        assert_eq!(choreo.look_destination(), Some(MOON));

        run_frames(&mut choreo, &mut elapsed, 1.0);
        assert!(choreo.is_animating());
        assert_eq!(choreo.pose().position, before);
    }

    /// About mode settles behind the moon once idle.
    #[test]
    fn about_tracking_parks_behind_moon() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        choreo.on_section_activated("about", &bodies());
        run_frames(&mut choreo, &mut elapsed, 4.0);
        let expected = tracking::moon_about_camera(EARTH, MOON);
        assert!((choreo.pose().position - expected).length() < 1e-3);
        assert!((choreo.pose().look_at - MOON).length() < 1e-3);
    }

    /// Racetrack converges onto the ellipse between earth and sun.
    #[test]
    fn racetrack_settles_on_ellipse() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        choreo.on_section_activated("projects", &bodies());
        let mid = racetrack_midpoint(EARTH, SUN);
        assert_eq!(
            choreo.position_destination(),
            Some(mid + RACETRACK_APPROACH_OFFSET)
        );
        assert_eq!(choreo.look_destination(), Some(mid));

        run_frames(&mut choreo, &mut elapsed, 8.0);
        let radii = racetrack_radii(EARTH, SUN);
        for _ in 0..5 {
            run_frames(&mut choreo, &mut elapsed, 1.0);
            let offset = choreo.pose().position - mid;
            let on_ellipse = (offset.x / radii.x).powi(2) + (offset.z / radii.y).powi(2);
            assert!((on_ellipse - 1.0).abs() < 1e-3, "ellipse residual {on_ellipse}");
            assert!((offset.y - RACETRACK_HEIGHT).abs() < 1e-2);
        }
    }

    /// Re-entering an already framed non-moon section does nothing.
    #[test]
    fn same_section_retrigger_is_suppressed() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        choreo.on_section_activated("hero", &bodies());
        run_frames(&mut choreo, &mut elapsed, 2.5);
        let settled = choreo.pose();

        assert!(!choreo.on_section_activated("hero", &bodies()));
        assert!(!choreo.is_animating());
        run_frames(&mut choreo, &mut elapsed, 1.0);
        assert_eq!(choreo.pose(), settled);
    }

    /// The moon is exempt from re-trigger suppression.
    #[test]
    fn moon_retrigger_is_not_suppressed() {
        let mut choreo = cold_start();
        let mut elapsed = 0.0;
        choreo.on_section_activated("about", &bodies());
        run_frames(&mut choreo, &mut elapsed, 2.5);
        assert!(choreo.on_section_activated("about", &bodies()));
        assert!(choreo.is_animating());
    }

    /// Missing bodies make triggers silent no-ops.
    #[test]
    fn missing_body_is_noop() {
        let mut choreo = cold_start();
        let no_sun = BodyPositions {
            sun: None,
            ..bodies()
        };
        assert!(!choreo.on_section_activated("experience", &no_sun));
        assert!(!choreo.on_section_activated("projects", &no_sun));
        assert_eq!(choreo.mode(), ViewMode::Hero);
        assert!(!choreo.is_animating());
    }

    /// Experience aims 34 units left of the sun's center.
    #[test]
    fn experience_look_at_is_shifted() {
        let pose = default_destination(
            SectionId::Experience,
            Some(SUN),
            Some(Vec3::new(-40.0, 0.0, 5.0)),
        );
        assert_eq!(pose.position, SUN + Vec3::new(-40.0, 0.0, 5.0));
        assert_eq!(pose.look_at, SUN + Vec3::new(-34.0, 0.0, 0.0));
    }

    /// Missing offsets and targets fall back to fixed framing.
    #[test]
    fn default_destination_fallbacks() {
        let pose = default_destination(SectionId::Hero, Some(EARTH), None);
        assert_eq!(pose.position, EARTH + Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(pose.look_at, EARTH);

        let pose = default_destination(SectionId::Hero, None, None);
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 15.0));
        assert_eq!(pose.look_at, Vec3::ZERO);
    }
}
