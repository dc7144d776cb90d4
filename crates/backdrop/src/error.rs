/// Boxed error carried as the source of surface and draw failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by scene initialization and the frame loop.
///
/// None of these are retried: a missing mount point or graphics capability
/// will not appear on a second attempt, and a failed draw leaves the context
/// in an unknown state.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The host has no element to attach the drawing surface to.
    #[error("no mount point available for the drawing surface")]
    MissingMountPoint,

    /// The rendering context could not be acquired.
    #[error("failed to create rendering surface: {0}")]
    SurfaceCreation(#[source] BoxError),

    /// A frame could not be drawn.
    #[error("failed to draw frame: {0}")]
    Draw(#[source] BoxError),
}

impl SceneError {
    pub fn surface_creation(err: impl Into<BoxError>) -> Self {
        Self::SurfaceCreation(err.into())
    }

    pub fn draw(err: impl Into<BoxError>) -> Self {
        Self::Draw(err.into())
    }
}
