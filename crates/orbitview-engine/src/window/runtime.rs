use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::device::GpuInit;
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::GpuSurface;
use crate::scene::Scene;
use crate::stage::{DrawOutcome, Stage, StageConfig, StageError, StageResult, TickOutcome};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl RuntimeConfig {
    pub fn new(title: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            initial_size: LogicalSize::new(width, height),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new("orbitview", 1280.0, 720.0)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs until it is closed or the app exits.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    stage: Stage<GpuSurface<'this>>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let stage_config = self.app.stage_config();
        let mut scene = Scene::new();
        self.app.build_scene(&mut scene);
        log::info!("scene built with {} objects", scene.len());

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            stage_builder: |window| attach_stage(window, gpu_init, stage_config, scene),
        }
        .try_build()
    }

    /// Returns whether the runtime should keep going.
    fn handle_resize(&mut self) -> bool {
        let Some(entry) = self.entry.as_mut() else { return true };
        let result = entry.with_mut(|fields| fields.stage.update_size(Some(fields.window)));
        continue_after(result)
    }

    /// Applies input, then runs one stage tick, or draws once if only the camera moved.
    /// Clears the per-frame input.
    fn handle_redraw(&mut self) -> bool {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else { return true };

        let mut control = AppControl::Continue;
        let result = entry.with_mut(|fields| {
            let result = fields
                .stage
                .handle_input(fields.input_state, fields.input_frame)
                .and_then(|moved| {
                    if fields.stage.is_animating() {
                        let time = fields.clock.tick();
                        fields
                            .stage
                            .tick(time, |scene, time| control = app.on_frame(scene, time))
                    } else if moved {
                        fields.stage.redraw()
                    } else {
                        Ok(TickOutcome::Idle)
                    }
                });

            fields.input_frame.clear();
            result
        });

        let keep_going = match result {
            Ok(TickOutcome::Idle) => true,
            Ok(TickOutcome::Drawn(outcome)) => continue_after(Ok(outcome)),
            Err(err) => continue_after(Err(err)),
        };
        keep_going && control == AppControl::Continue
    }

    fn close(&mut self) {
        if let Some(mut entry) = self.entry.take() {
            // The surface borrows the window, so it is dropped while the window is alive.
            entry.with_stage_mut(|stage| {
                stage.detach();
            });
        }
    }
}

/// Builds the GPU surface for `window` and attaches a stage to it.
///
/// A zero-sized window is not an error: the stage stays pending until the first resize.
fn attach_stage(window: &Window, gpu_init: GpuInit, config: StageConfig, scene: Scene) -> Result<Stage<GpuSurface<'_>>> {
    let surface = GpuSurface::new(window, gpu_init)?;
    let mut stage = Stage::with_scene(config, scene);

    match stage.attach(Some(window), Some(surface)) {
        Ok(DrawOutcome::Fatal) => anyhow::bail!("first frame could not be presented"),
        Ok(_) => {}
        Err(err) if err.is_recoverable() => log::debug!("stage pending: {err}"),
        Err(err) => return Err(err).context("failed to attach stage"),
    }

    Ok(stage)
}

/// Logs the outcome of a sizing or drawing step. Returns whether the runtime should keep going.
fn continue_after(result: StageResult<DrawOutcome>) -> bool {
    match result {
        Ok(DrawOutcome::Fatal) => {
            log::error!("surface can no longer present; exiting");
            false
        }
        Ok(_) => true,
        Err(err @ StageError::DegenerateViewport { .. }) => {
            log::debug!("{err}");
            true
        }
        Err(err) => {
            log::error!("stage error: {err}");
            false
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // One redraw request per loop iteration; winit coalesces them.
        // A stopped stage still wakes up to apply pointer input.
        if let Some(entry) = self.entry.as_ref() {
            let wanted = entry.with(|fields| fields.stage.is_animating() || !fields.input_frame.is_idle());
            if wanted {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.entry.as_mut() {
            entry.with_mut(|fields| {
                if let Some(ev) = translate_window_event(fields.input_state, &event) {
                    fields.input_state.apply_event(fields.input_frame, ev);
                }
            });
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.close();
            self.request_exit(event_loop);
            return;
        }

        let keep_going = match &event {
            WindowEvent::CloseRequested => false,

            // The stage re-measures the window; the payload is not trusted.
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.handle_resize(),

            WindowEvent::RedrawRequested => self.handle_redraw(),

            _ => true,
        };

        if !keep_going {
            self.close();
            self.request_exit(event_loop);
        }
    }
}
