use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;

use crate::error::SceneError;
use crate::scene::CelestialBody;

/// Page sections that drive the camera, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
}

/// How a section chooses its camera destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionTarget {
    /// Frame one body, optionally from a fixed offset.
    Body {
        body: CelestialBody,
        offset: Option<Vec3>,
    },
    /// Look at the moon and park behind it as seen from earth.
    MoonAbout,
    /// Sit beside the moon looking back at earth.
    MoonSkills,
    /// Fly an elliptical circuit between earth and sun.
    Racetrack,
}

impl SectionId {
    /// All sections, top of the page first.
    pub const ALL: [SectionId; 7] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Contact,
    ];

    /// Element id used on the page.
    pub const fn as_str(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }

    /// Heading shown in the overlay while this section is focused.
    pub const fn title(self) -> &'static str {
        match self {
            SectionId::Hero => "Hello, World",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Contact => "Contact",
        }
    }

    /// Fixed section-to-view table.
    pub const fn target(self) -> SectionTarget {
        match self {
            SectionId::Hero | SectionId::Education => SectionTarget::Body {
                body: CelestialBody::Earth,
                offset: Some(Vec3::new(0.0, 0.0, 10.0)),
            },
            SectionId::About => SectionTarget::MoonAbout,
            SectionId::Skills => SectionTarget::MoonSkills,
            SectionId::Projects => SectionTarget::Racetrack,
            SectionId::Experience => SectionTarget::Body {
                body: CelestialBody::Sun,
                offset: Some(Vec3::new(-40.0, 0.0, 5.0)),
            },
            SectionId::Contact => SectionTarget::Body {
                body: CelestialBody::Earth,
                offset: Some(Vec3::new(0.0, 0.0, 15.0)),
            },
        }
    }

    /// Body the section resolves to for re-trigger suppression.
    pub fn target_body(self) -> CelestialBody {
        match self.target() {
            SectionTarget::Body { body, .. } => body,
            SectionTarget::MoonAbout | SectionTarget::MoonSkills => CelestialBody::Moon,
            SectionTarget::Racetrack => CelestialBody::Earth,
        }
    }
}

impl FromStr for SectionId {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| SceneError::UnknownSection(s.to_owned()))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
