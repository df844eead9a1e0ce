/// Host collaborators driven by the frame scheduler.
///
/// The engine never draws or opens windows itself: the host supplies an output
/// surface, a renderer and a "next frame" hook.

use crate::camera::CameraRig;
use crate::error::Result;
use crate::scene::Scene;

/// Drawable area the scene is presented on
pub trait OutputSurface {
    /// Current size in physical pixels
    fn pixel_size(&self) -> (u32, u32);

    /// Resize the drawing buffer
    fn resize(&mut self, width: u32, height: u32);
}

/// Draws a scene through a camera rig
pub trait SceneRenderer {
    /// Render one frame.
    ///
    /// Called synchronously once per tick, after all controllers ran.
    fn render(&mut self, scene: &Scene, rig: &CameraRig) -> Result<()>;
}

/// Host "call me again next frame" capability
pub trait FrameRequester {
    fn request_frame(&mut self);
}
