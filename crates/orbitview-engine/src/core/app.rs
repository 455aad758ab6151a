use winit::event::WindowEvent;

use crate::scene::Scene;
use crate::stage::StageConfig;
use crate::time::FrameTime;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A viewer driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Camera projection, initial pose and control limits.
    fn stage_config(&self) -> StageConfig {
        StageConfig::default()
    }

    /// Populates the scene once, before the stage is attached to the window.
    fn build_scene(&mut self, scene: &mut Scene);

    /// Called once per drawn frame, before the orbit controls update and the draw.
    fn on_frame(&mut self, scene: &mut Scene, time: &FrameTime) -> AppControl {
        let _ = (scene, time);
        AppControl::Continue
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }
}
