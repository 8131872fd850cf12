use thiserror::Error;

/// Failures surfaced by scene setup and section parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// A section-activation message named a section that is not on the page.
    #[error("unknown page section `{0}`")]
    UnknownSection(String),
    /// Setup needs the primary window to size the virtual page.
    #[error("no primary window available for scene setup")]
    NoPrimaryWindow,
}
