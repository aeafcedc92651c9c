use thiserror::Error;

use crate::renderer::RenderFrame;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// No graphics capability; the caller should fall back to a non-visual view.
    #[error("rendering unavailable: {0}")]
    Unavailable(String),
    /// The surface existed but a frame could not be presented.
    #[error("surface lost: {0}")]
    Lost(String),
}

/// Something that can present a [`RenderFrame`].
pub trait RenderSurface {
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    fn submit(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError>;
}

/// In-memory surface that keeps the last submitted frame.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    submitted: u64,
    last: Option<RenderFrame>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last.as_ref()
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    fn submit(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError> {
        self.submitted += 1;
        self.last = Some(frame.clone());
        Ok(())
    }
}
