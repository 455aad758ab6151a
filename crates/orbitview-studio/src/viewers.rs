use glam::Vec3;

use orbitview_engine::controls::ControlsConfig;
use orbitview_engine::coords::ColorRgba;
use orbitview_engine::core::{App, AppControl};
use orbitview_engine::scene::{DirectionalLight, ObjectId, Scene};
use orbitview_engine::stage::StageConfig;
use orbitview_engine::time::FrameTime;

/// Orthographic top-down view of a 500-unit board. Rotation is locked; zoom is 1x to 2x.
pub struct BoardViewer;

impl App for BoardViewer {
    fn stage_config(&self) -> StageConfig {
        StageConfig::orthographic(0.1, 4000.0)
            .with_pose(Vec3::new(0.0, 2000.0, 0.0), Vec3::ZERO)
            .with_controls(ControlsConfig::default().with_rotate(false).with_zoom_range(1.0, 2.0))
    }

    fn build_scene(&mut self, scene: &mut Scene) {
        scene.add_helpers(500.0, 500.0, 50);
    }
}

/// Perspective playground: helpers, a spinning box, a sphere and a floor.
#[derive(Default)]
pub struct PlaygroundViewer {
    cube: Option<ObjectId>,
}

impl PlaygroundViewer {
    const SPIN: f32 = 0.01;
}

impl App for PlaygroundViewer {
    fn stage_config(&self) -> StageConfig {
        StageConfig::perspective(75.0, 0.001, 1000.0).with_pose(Vec3::new(1.0, 2.0, 5.0), Vec3::ZERO)
    }

    fn build_scene(&mut self, scene: &mut Scene) {
        scene.add_helpers(3.0, 10.0, 10);
        self.cube = Some(scene.add_box());
        scene.add_sphere();
        scene.add_plane(10.0);

        scene.ambient = ColorRgba::from_hex(0x404040);
        scene.light = Some(DirectionalLight::new(
            Vec3::new(-1.0, -3.0, -2.0),
            ColorRgba::white(),
            1.0,
        ));
    }

    fn on_frame(&mut self, scene: &mut Scene, _time: &FrameTime) -> AppControl {
        if let Some(cube) = self.cube.and_then(|id| scene.get_mut(id)) {
            cube.transform.rotation.x += Self::SPIN;
            cube.transform.rotation.y += Self::SPIN;
        }
        AppControl::Continue
    }
}
