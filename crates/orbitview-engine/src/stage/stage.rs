use std::mem;

use crate::camera::Camera;
use crate::controls::OrbitControls;
use crate::coords::Viewport;
use crate::input::{InputFrame, InputState};
use crate::scene::Scene;
use crate::time::FrameTime;

use super::{Container, DrawOutcome, DrawSurface, Element, StageConfig, StageError, StageResult};

/// Observable lifecycle phase of a [`Stage`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Unattached,
    Pending,
    Ready,
    Detached,
}

/// What a frame tick did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// No loop registered, or sizing is still deferred.
    Idle,
    Drawn(DrawOutcome),
}

enum Lifecycle<S> {
    Unattached,
    Pending { surface: S },
    Ready(Ready<S>),
    Detached,
}

/// State that only exists once the container has a non-zero size.
struct Ready<S> {
    camera: Camera,
    controls: OrbitControls,
    surface: S,
    viewport: Viewport,
}

impl<S: DrawSurface> Ready<S> {
    /// Release, measure, then apply the new size to camera and surface together.
    fn resize<C>(&mut self, container: &C, scene: &Scene) -> StageResult<DrawOutcome>
    where
        C: Container + ?Sized,
    {
        self.surface.release_display_size();

        let viewport = container.measure();
        if viewport.is_degenerate() {
            return Err(degenerate(viewport));
        }

        self.camera.fit_viewport(viewport);
        self.surface.set_size(viewport);
        self.viewport = viewport;

        log::debug!("stage resized to {}x{}", viewport.width, viewport.height);
        Ok(self.surface.draw(scene, &self.camera))
    }
}

/// Owns a scene and keeps camera projection and surface size in sync with a container.
///
/// Every sizing operation re-measures the container instead of trusting event payloads.
pub struct Stage<S: DrawSurface> {
    config: StageConfig,
    scene: Scene,
    lifecycle: Lifecycle<S>,

    /// Whether the repeating draw task is registered.
    looping: bool,
}

impl<S: DrawSurface> Stage<S> {
    pub fn new(config: StageConfig) -> Self {
        Self::with_scene(config, Scene::new())
    }

    pub fn with_scene(config: StageConfig, scene: Scene) -> Self {
        Self {
            config,
            scene,
            lifecycle: Lifecycle::Unattached,
            looping: config.autostart,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::Unattached => Phase::Unattached,
            Lifecycle::Pending { .. } => Phase::Pending,
            Lifecycle::Ready(_) => Phase::Ready,
            Lifecycle::Detached => Phase::Detached,
        }
    }

    /// The camera, once the stage is ready.
    pub fn camera(&self) -> Option<&Camera> {
        match &self.lifecycle {
            Lifecycle::Ready(r) => Some(&r.camera),
            _ => None,
        }
    }

    /// The attached surface, whether sized yet or not.
    pub fn surface(&self) -> Option<&S> {
        match &self.lifecycle {
            Lifecycle::Pending { surface } => Some(surface),
            Lifecycle::Ready(r) => Some(&r.surface),
            _ => None,
        }
    }

    /// Last applied non-degenerate viewport.
    pub fn viewport(&self) -> Option<Viewport> {
        match &self.lifecycle {
            Lifecycle::Ready(r) => Some(r.viewport),
            _ => None,
        }
    }

    /// True while frames are being drawn: ready with the loop registered.
    pub fn is_animating(&self) -> bool {
        self.looping && matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    /// Binds the stage to its host elements and sizes everything from `container`.
    ///
    /// The frame loop is registered according to [`StageConfig::autostart`].
    /// A zero-sized container keeps the surface pending and returns
    /// [`StageError::DegenerateViewport`]; the next [`update_size`](Self::update_size)
    /// with a non-zero measurement finishes initialization.
    pub fn attach<C>(&mut self, container: Option<&C>, surface: Option<S>) -> StageResult<DrawOutcome>
    where
        C: Container + ?Sized,
    {
        let container = container.ok_or(StageError::MissingElement(Element::Container))?;
        let surface = surface.ok_or(StageError::MissingElement(Element::Surface))?;

        if matches!(self.lifecycle, Lifecycle::Pending { .. } | Lifecycle::Ready(_)) {
            self.detach();
            log::debug!("stage re-attached; previous surface released");
        }

        self.lifecycle = Lifecycle::Pending { surface };
        self.looping = self.config.autostart;
        self.initialize(container)
    }

    /// Re-measures `container`, refits the camera, resizes the surface and redraws once.
    pub fn update_size<C>(&mut self, container: Option<&C>) -> StageResult<DrawOutcome>
    where
        C: Container + ?Sized,
    {
        let container = container.ok_or(StageError::MissingElement(Element::Container))?;

        if let Lifecycle::Ready(ready) = &mut self.lifecycle {
            return ready.resize(container, &self.scene);
        }
        // Pending surfaces finish initialization here; anything else has no surface.
        self.initialize(container)
    }

    /// Runs one iteration of the frame loop: `animate`, controls, draw.
    pub fn tick<F>(&mut self, time: FrameTime, animate: F) -> StageResult<TickOutcome>
    where
        F: FnOnce(&mut Scene, &FrameTime),
    {
        match &mut self.lifecycle {
            Lifecycle::Unattached | Lifecycle::Detached => Err(StageError::MissingElement(Element::Surface)),
            Lifecycle::Pending { .. } => Ok(TickOutcome::Idle),
            Lifecycle::Ready(_) if !self.looping => Ok(TickOutcome::Idle),
            Lifecycle::Ready(ready) => {
                animate(&mut self.scene, &time);
                ready.controls.update(&mut ready.camera, ready.viewport);
                Ok(TickOutcome::Drawn(ready.surface.draw(&self.scene, &ready.camera)))
            }
        }
    }

    /// Feeds pointer input to the orbit controls and applies it to the camera right away.
    ///
    /// Returns whether the camera moved. The frame loop does not need to be running;
    /// a stopped stage shows the new pose on the next [`redraw`](Self::redraw) or resize.
    pub fn handle_input(&mut self, state: &InputState, frame: &InputFrame) -> StageResult<bool> {
        match &mut self.lifecycle {
            Lifecycle::Unattached | Lifecycle::Detached => Err(StageError::MissingElement(Element::Surface)),
            Lifecycle::Pending { .. } => Ok(false),
            Lifecycle::Ready(ready) => {
                ready.controls.handle_input(state, frame, ready.viewport);
                Ok(ready.controls.update(&mut ready.camera, ready.viewport))
            }
        }
    }

    /// Draws the current pose once, whether or not the loop is registered.
    pub fn redraw(&mut self) -> StageResult<TickOutcome> {
        match &mut self.lifecycle {
            Lifecycle::Unattached | Lifecycle::Detached => Err(StageError::MissingElement(Element::Surface)),
            Lifecycle::Pending { .. } => Ok(TickOutcome::Idle),
            Lifecycle::Ready(ready) => Ok(TickOutcome::Drawn(ready.surface.draw(&self.scene, &ready.camera))),
        }
    }

    /// Registers (`true`) or deregisters the repeating draw task.
    ///
    /// A deregistered stage still redraws once after every applied resize.
    pub fn set_animation_loop(&mut self, enabled: bool) {
        if self.looping != enabled {
            log::debug!("animation loop {}", if enabled { "registered" } else { "deregistered" });
        }
        self.looping = enabled;
    }

    pub fn start_animation_loop(&mut self) {
        self.set_animation_loop(true);
    }

    pub fn stop_animation_loop(&mut self) {
        self.set_animation_loop(false);
    }

    /// Stops the loop and hands the surface back. The scene is kept.
    pub fn detach(&mut self) -> Option<S> {
        self.looping = false;
        let mut surface = match mem::replace(&mut self.lifecycle, Lifecycle::Detached) {
            Lifecycle::Pending { surface } => Some(surface),
            Lifecycle::Ready(ready) => Some(ready.surface),
            Lifecycle::Unattached | Lifecycle::Detached => None,
        };
        if let Some(surface) = surface.as_mut() {
            surface.release_display_size();
            log::info!("stage detached");
        }
        surface
    }

    /// Pending -> Ready when `container` has a non-zero size.
    fn initialize<C>(&mut self, container: &C) -> StageResult<DrawOutcome>
    where
        C: Container + ?Sized,
    {
        let mut surface = match mem::replace(&mut self.lifecycle, Lifecycle::Unattached) {
            Lifecycle::Pending { surface } => surface,
            other => {
                self.lifecycle = other;
                return Err(StageError::MissingElement(Element::Surface));
            }
        };

        surface.release_display_size();

        let viewport = container.measure();
        let Some(mut camera) = Camera::for_viewport(self.config.projection, viewport) else {
            log::debug!("stage sizing deferred: container is {}x{}", viewport.width, viewport.height);
            self.lifecycle = Lifecycle::Pending { surface };
            return Err(degenerate(viewport));
        };
        camera.look_at(self.config.pose.position, self.config.pose.target);
        surface.set_size(viewport);

        let mut controls = OrbitControls::new(self.config.controls);
        controls.update(&mut camera, viewport);

        let outcome = surface.draw(&self.scene, &camera);
        self.lifecycle = Lifecycle::Ready(Ready {
            camera,
            controls,
            surface,
            viewport,
        });

        log::info!("stage ready at {}x{}", viewport.width, viewport.height);
        Ok(outcome)
    }
}

fn degenerate(viewport: Viewport) -> StageError {
    StageError::DegenerateViewport {
        width: viewport.width,
        height: viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Instant;

    use approx::assert_relative_eq;
    use glam::Vec3;

    use super::*;
    use crate::camera::Projection;
    use crate::controls::ControlsConfig;

    struct FakeContainer(Cell<Viewport>);

    impl FakeContainer {
        fn new(width: u32, height: u32) -> Self {
            Self(Cell::new(Viewport::new(width, height)))
        }

        fn set(&self, width: u32, height: u32) {
            self.0.set(Viewport::new(width, height));
        }
    }

    impl Container for FakeContainer {
        fn measure(&self) -> Viewport {
            self.0.get()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Release,
        SetSize(Viewport),
        Draw,
    }

    #[derive(Default)]
    struct RecordingSurface {
        size: Viewport,
        calls: Vec<Call>,
        outcome: Option<DrawOutcome>,
    }

    impl RecordingSurface {
        fn draws(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Draw).count()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn release_display_size(&mut self) {
            self.calls.push(Call::Release);
        }

        fn set_size(&mut self, viewport: Viewport) {
            assert!(!viewport.is_degenerate());
            self.size = viewport;
            self.calls.push(Call::SetSize(viewport));
        }

        fn size(&self) -> Viewport {
            self.size
        }

        fn draw(&mut self, _scene: &Scene, _camera: &Camera) -> DrawOutcome {
            self.calls.push(Call::Draw);
            self.outcome.unwrap_or(DrawOutcome::Presented)
        }
    }

    /// Counts `release_display_size` calls through a handle the test keeps.
    struct CountingSurface {
        released: Rc<Cell<u32>>,
        size: Viewport,
    }

    impl CountingSurface {
        fn new(released: &Rc<Cell<u32>>) -> Self {
            Self {
                released: Rc::clone(released),
                size: Viewport::default(),
            }
        }
    }

    impl DrawSurface for CountingSurface {
        fn release_display_size(&mut self) {
            self.released.set(self.released.get() + 1);
        }

        fn set_size(&mut self, viewport: Viewport) {
            self.size = viewport;
        }

        fn size(&self) -> Viewport {
            self.size
        }

        fn draw(&mut self, _scene: &Scene, _camera: &Camera) -> DrawOutcome {
            DrawOutcome::Presented
        }
    }

    fn perspective() -> StageConfig {
        StageConfig::perspective(75.0, 0.001, 1000.0).with_pose(Vec3::new(1.0, 2.0, 5.0), Vec3::ZERO)
    }

    fn orthographic() -> StageConfig {
        StageConfig::orthographic(0.1, 4000.0)
            .with_pose(Vec3::new(0.0, 2000.0, 0.0), Vec3::ZERO)
            .with_controls(ControlsConfig::default().with_rotate(false).with_zoom_range(1.0, 2.0))
    }

    fn ready_stage(config: StageConfig, container: &FakeContainer) -> Stage<RecordingSurface> {
        let mut stage = Stage::new(config);
        stage
            .attach(Some(container), Some(RecordingSurface::default()))
            .expect("attach");
        stage
    }

    fn frame_time(frame_index: u64) -> FrameTime {
        FrameTime {
            dt: 1.0 / 60.0,
            elapsed: frame_index as f32 / 60.0,
            now: Instant::now(),
            frame_index,
        }
    }

    fn ortho_extent(stage: &Stage<RecordingSurface>) -> (f32, f32) {
        match stage.camera().unwrap().projection {
            Projection::Orthographic(o) => (o.width(), o.height()),
            Projection::Perspective(_) => panic!("expected orthographic"),
        }
    }

    // ── attach ────────────────────────────────────────────────────────────

    #[test]
    fn surface_matches_container_after_attach() {
        for (w, h) in [(800, 600), (1, 1), (1920, 1080), (333, 7777)] {
            let container = FakeContainer::new(w, h);
            let stage = ready_stage(perspective(), &container);
            assert_eq!(stage.phase(), Phase::Ready);
            assert_eq!(stage.surface().unwrap().size(), Viewport::new(w, h));
            assert_eq!(stage.viewport(), Some(Viewport::new(w, h)));
        }
    }

    #[test]
    fn attach_draws_once() {
        let container = FakeContainer::new(800, 600);
        let stage = ready_stage(perspective(), &container);
        assert_eq!(
            stage.surface().unwrap().calls,
            [Call::Release, Call::SetSize(Viewport::new(800, 600)), Call::Draw]
        );
    }

    #[test]
    fn attach_applies_configured_pose() {
        let container = FakeContainer::new(800, 600);
        let stage = ready_stage(perspective(), &container);
        let cam = stage.camera().unwrap();
        assert_eq!(cam.target, Vec3::ZERO);
        assert_relative_eq!(cam.position.length(), Vec3::new(1.0, 2.0, 5.0).length(), epsilon = 1e-5);
    }

    #[test]
    fn attach_without_container_is_fatal() {
        let mut stage: Stage<RecordingSurface> = Stage::new(perspective());
        let err = stage
            .attach::<FakeContainer>(None, Some(RecordingSurface::default()))
            .unwrap_err();
        assert_eq!(err, StageError::MissingElement(Element::Container));
        assert!(!err.is_recoverable());
        assert_eq!(stage.phase(), Phase::Unattached);
    }

    #[test]
    fn attach_without_surface_is_fatal() {
        let container = FakeContainer::new(800, 600);
        let mut stage: Stage<RecordingSurface> = Stage::new(perspective());
        let err = stage.attach(Some(&container), None).unwrap_err();
        assert_eq!(err, StageError::MissingElement(Element::Surface));
    }

    // ── degenerate viewport ───────────────────────────────────────────────

    #[test]
    fn zero_container_defers_initialization() {
        let container = FakeContainer::new(0, 0);
        let mut stage = Stage::new(perspective());

        let err = stage
            .attach(Some(&container), Some(RecordingSurface::default()))
            .unwrap_err();
        assert_eq!(err, StageError::DegenerateViewport { width: 0, height: 0 });
        assert!(err.is_recoverable());

        assert_eq!(stage.phase(), Phase::Pending);
        assert!(stage.camera().is_none());
        assert!(!stage.surface().unwrap().calls.iter().any(|c| matches!(c, Call::SetSize(_))));
        assert_eq!(stage.surface().unwrap().draws(), 0);
    }

    #[test]
    fn deferred_stage_initializes_on_first_real_size() {
        let container = FakeContainer::new(0, 600);
        let mut stage = Stage::new(perspective());
        let _ = stage.attach(Some(&container), Some(RecordingSurface::default()));

        container.set(640, 480);
        assert_eq!(stage.update_size(Some(&container)), Ok(DrawOutcome::Presented));
        assert_eq!(stage.phase(), Phase::Ready);
        assert_relative_eq!(stage.camera().unwrap().aspect().unwrap(), 640.0 / 480.0);
        assert_eq!(stage.surface().unwrap().size(), Viewport::new(640, 480));
    }

    #[test]
    fn zero_resize_keeps_previous_state() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        let before = stage.camera().cloned();

        container.set(800, 0);
        let err = stage.update_size(Some(&container)).unwrap_err();
        assert_eq!(err, StageError::DegenerateViewport { width: 800, height: 0 });

        assert_eq!(stage.camera().cloned(), before);
        assert_eq!(stage.surface().unwrap().size(), Viewport::new(800, 600));
        let aspect = stage.camera().unwrap().aspect().unwrap();
        assert!(aspect.is_finite());
    }

    #[test]
    fn ticks_while_pending_are_idle() {
        let container = FakeContainer::new(0, 0);
        let mut stage = Stage::new(perspective());
        let _ = stage.attach(Some(&container), Some(RecordingSurface::default()));

        let mut ran = false;
        assert_eq!(stage.tick(frame_time(0), |_, _| ran = true), Ok(TickOutcome::Idle));
        assert!(!ran);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_800x600_to_400x300() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        assert_relative_eq!(stage.camera().unwrap().aspect().unwrap(), 4.0 / 3.0);

        container.set(400, 300);
        stage.update_size(Some(&container)).unwrap();
        assert_relative_eq!(stage.camera().unwrap().aspect().unwrap(), 4.0 / 3.0);
        assert_eq!(stage.surface().unwrap().size(), Viewport::new(400, 300));
    }

    #[test]
    fn perspective_aspect_tracks_every_resize() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);

        for (w, h) in [(1024, 768), (300, 900), (1, 1), (2560, 1080), (800, 600)] {
            container.set(w, h);
            stage.update_size(Some(&container)).unwrap();
            assert_relative_eq!(stage.camera().unwrap().aspect().unwrap(), w as f32 / h as f32);
            assert_eq!(stage.surface().unwrap().size(), Viewport::new(w, h));
        }
    }

    #[test]
    fn orthographic_1000x500_bounds() {
        let container = FakeContainer::new(1000, 500);
        let stage = ready_stage(orthographic(), &container);

        let Projection::Orthographic(o) = stage.camera().unwrap().projection else {
            panic!("expected orthographic");
        };
        assert_eq!((o.left, o.right, o.top, o.bottom), (-500.0, 500.0, 250.0, -250.0));
    }

    #[test]
    fn orthographic_extent_tracks_every_resize() {
        let container = FakeContainer::new(1000, 500);
        let mut stage = ready_stage(orthographic(), &container);

        for (w, h) in [(640, 480), (333, 1), (1920, 1200)] {
            container.set(w, h);
            stage.update_size(Some(&container)).unwrap();
            assert_eq!(ortho_extent(&stage), (w as f32, h as f32));
        }
    }

    #[test]
    fn resize_is_idempotent() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(orthographic(), &container);

        container.set(1280, 720);
        stage.update_size(Some(&container)).unwrap();
        let camera_once = stage.camera().cloned();
        let size_once = stage.surface().unwrap().size();

        stage.update_size(Some(&container)).unwrap();
        assert_eq!(stage.camera().cloned(), camera_once);
        assert_eq!(stage.surface().unwrap().size(), size_once);
    }

    #[test]
    fn resize_releases_before_measuring_and_redraws_immediately() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);

        container.set(500, 500);
        stage.update_size(Some(&container)).unwrap();

        let calls = &stage.surface().unwrap().calls;
        assert_eq!(
            calls[calls.len() - 3..],
            [Call::Release, Call::SetSize(Viewport::new(500, 500)), Call::Draw]
        );
    }

    #[test]
    fn resize_without_container_is_fatal() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        assert_eq!(
            stage.update_size::<FakeContainer>(None),
            Err(StageError::MissingElement(Element::Container))
        );
    }

    #[test]
    fn resize_before_attach_reports_missing_surface() {
        let container = FakeContainer::new(800, 600);
        let mut stage: Stage<RecordingSurface> = Stage::new(perspective());
        assert_eq!(
            stage.update_size(Some(&container)),
            Err(StageError::MissingElement(Element::Surface))
        );
    }

    // ── frame loop ────────────────────────────────────────────────────────

    #[test]
    fn tick_animates_then_draws() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        let cube = stage.scene_mut().add_box();

        let outcome = stage.tick(frame_time(1), |scene, _| {
            if let Some(obj) = scene.get_mut(cube) {
                obj.transform.rotation += Vec3::new(0.01, 0.01, 0.0);
            }
        });

        assert_eq!(outcome, Ok(TickOutcome::Drawn(DrawOutcome::Presented)));
        assert_eq!(stage.scene().get(cube).unwrap().transform.rotation.x, 0.01);
        assert_eq!(stage.surface().unwrap().draws(), 2);
    }

    #[test]
    fn stopped_loop_is_idle_but_resize_still_redraws() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        stage.stop_animation_loop();
        assert!(!stage.is_animating());

        let mut ran = false;
        assert_eq!(stage.tick(frame_time(1), |_, _| ran = true), Ok(TickOutcome::Idle));
        assert!(!ran);

        container.set(640, 480);
        stage.update_size(Some(&container)).unwrap();
        assert_eq!(stage.surface().unwrap().draws(), 2);

        stage.start_animation_loop();
        assert!(stage.is_animating());
    }

    #[test]
    fn set_animation_loop_toggles_registration() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        stage.set_animation_loop(false);
        assert!(!stage.is_animating());
        stage.set_animation_loop(true);
        assert_eq!(
            stage.tick(frame_time(1), |_, _| {}),
            Ok(TickOutcome::Drawn(DrawOutcome::Presented))
        );
    }

    #[test]
    fn autostart_off_waits_for_registration() {
        let container = FakeContainer::new(800, 600);
        let stage = ready_stage(perspective().with_autostart(false), &container);
        assert_eq!(stage.phase(), Phase::Ready);
        assert!(!stage.is_animating());
    }

    #[test]
    fn fatal_draw_is_reported() {
        let container = FakeContainer::new(800, 600);
        let mut stage = Stage::new(perspective());
        let surface = RecordingSurface {
            outcome: Some(DrawOutcome::Fatal),
            ..RecordingSurface::default()
        };
        assert_eq!(stage.attach(Some(&container), Some(surface)), Ok(DrawOutcome::Fatal));
        assert_eq!(
            stage.tick(frame_time(1), |_, _| {}),
            Ok(TickOutcome::Drawn(DrawOutcome::Fatal))
        );
    }

    // ── detach ────────────────────────────────────────────────────────────

    #[test]
    fn detach_returns_surface_and_stops_loop() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        stage.scene_mut().add_sphere();

        let surface = stage.detach().expect("surface handed back");
        assert_eq!(surface.size(), Viewport::new(800, 600));
        assert_eq!(surface.calls.last(), Some(&Call::Release));

        assert_eq!(stage.phase(), Phase::Detached);
        assert!(!stage.is_animating());
        assert_eq!(stage.scene().len(), 1);
        assert_eq!(
            stage.tick(frame_time(2), |_, _| {}),
            Err(StageError::MissingElement(Element::Surface))
        );
        assert_eq!(
            stage.update_size(Some(&container)),
            Err(StageError::MissingElement(Element::Surface))
        );
    }

    #[test]
    fn detached_stage_can_be_reattached() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        stage.detach();

        container.set(320, 240);
        stage
            .attach(Some(&container), Some(RecordingSurface::default()))
            .unwrap();
        assert_eq!(stage.phase(), Phase::Ready);
        assert_eq!(stage.surface().unwrap().size(), Viewport::new(320, 240));
        assert!(stage.is_animating());
    }

    #[test]
    fn reattach_releases_previous_surface() {
        let container = FakeContainer::new(800, 600);
        let first_released = Rc::new(Cell::new(0));
        let mut stage = Stage::new(perspective());

        stage
            .attach(Some(&container), Some(CountingSurface::new(&first_released)))
            .unwrap();
        assert_eq!(first_released.get(), 1);

        stage
            .attach(Some(&container), Some(CountingSurface::new(&Rc::new(Cell::new(0)))))
            .unwrap();
        assert_eq!(first_released.get(), 2);
        assert_eq!(stage.phase(), Phase::Ready);
    }

    #[test]
    fn detach_before_attach_is_empty() {
        let mut stage: Stage<RecordingSurface> = Stage::new(perspective());
        assert!(stage.detach().is_none());
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn input_before_attach_reports_missing_surface() {
        let mut stage: Stage<RecordingSurface> = Stage::new(orthographic());
        let state = InputState::default();
        let frame = InputFrame::default();
        assert_eq!(
            stage.handle_input(&state, &frame),
            Err(StageError::MissingElement(Element::Surface))
        );
    }

    #[test]
    fn wheel_input_zooms_orthographic_camera_within_range() {
        let container = FakeContainer::new(1000, 500);
        let mut stage = ready_stage(orthographic(), &container);

        let state = InputState::default();
        let frame = InputFrame {
            wheel_lines: 50.0,
            ..InputFrame::default()
        };
        stage.handle_input(&state, &frame).unwrap();
        stage.tick(frame_time(1), |_, _| {}).unwrap();

        assert_eq!(stage.camera().unwrap().zoom(), 2.0);
        // Zoom never leaks into the viewport-derived bounds.
        assert_eq!(ortho_extent(&stage), (1000.0, 500.0));
    }

    #[test]
    fn wheel_applies_while_loop_is_stopped() {
        let container = FakeContainer::new(1000, 500);
        let mut stage = ready_stage(orthographic(), &container);
        stage.stop_animation_loop();

        let frame = InputFrame {
            wheel_lines: 5.0,
            ..InputFrame::default()
        };
        assert_eq!(stage.handle_input(&InputState::default(), &frame), Ok(true));

        let expected = 0.95f32.powf(-5.0);
        assert_relative_eq!(stage.camera().unwrap().zoom(), expected, epsilon = 1e-5);

        stage.update_size(Some(&container)).unwrap();
        assert_relative_eq!(stage.camera().unwrap().zoom(), expected, epsilon = 1e-5);

        // Restarting the loop does not replay the wheel.
        stage.start_animation_loop();
        stage.tick(frame_time(1), |_, _| {}).unwrap();
        assert_relative_eq!(stage.camera().unwrap().zoom(), expected, epsilon = 1e-5);
    }

    #[test]
    fn idle_input_reports_no_change() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective(), &container);
        let before = stage.camera().cloned();

        assert_eq!(
            stage.handle_input(&InputState::default(), &InputFrame::default()),
            Ok(false)
        );
        assert_eq!(stage.camera().cloned(), before);
    }

    #[test]
    fn redraw_draws_with_loop_stopped() {
        let container = FakeContainer::new(800, 600);
        let mut stage = ready_stage(perspective().with_autostart(false), &container);
        assert_eq!(stage.redraw(), Ok(TickOutcome::Drawn(DrawOutcome::Presented)));
        assert_eq!(stage.surface().unwrap().draws(), 2);
    }

    #[test]
    fn redraw_while_pending_is_idle() {
        let container = FakeContainer::new(0, 0);
        let mut stage = Stage::new(perspective());
        let _ = stage.attach(Some(&container), Some(RecordingSurface::default()));
        assert_eq!(stage.redraw(), Ok(TickOutcome::Idle));
    }
}
