use crate::stage::DrawOutcome;

/// What to do after the surface failed to hand out a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame should succeed.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Out of memory or similar. Stop drawing.
    Fatal,
}

impl From<SurfaceErrorAction> for DrawOutcome {
    fn from(action: SurfaceErrorAction) -> Self {
        match action {
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => DrawOutcome::Skipped,
            SurfaceErrorAction::Fatal => DrawOutcome::Fatal,
        }
    }
}
