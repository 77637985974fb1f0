//! Solar System - animated orrery
//!
//! Draws a star, its planets, and a moon, with every body orbiting its
//! parent and spinning on its axis as a manually stepped clock advances.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use solar_core::{AnimationClock, SolarSystem, SystemError, SystemTemplate};
use solar_render::LightingFlags;
use solar_system::config::{AppConfig, SystemConfig};
use solar_system::input::{InputAction, InputMapper};
use solar_system::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Bodies being animated
    system: SolarSystem,
    clock: AnimationClock,
    lighting: LightingFlags,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let system = load_system(&config.system);
        log::info!(
            "Loaded system '{}' with {} bodies",
            system.name(),
            system.body_count()
        );

        let clock = AnimationClock::new()
            .with_time_step(config.animation.time_step_hours)
            .with_running(config.animation.start_running);

        Self {
            config,
            system,
            clock,
            lighting: LightingFlags::default(),
            simulation: SimulationSystem::new(),
            window: None,
            renderer: None,
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        if self.simulation.apply(action, &mut self.clock) {
            return;
        }

        match action {
            InputAction::ToggleAmbient => self.toggle_lighting(LightingFlags::AMBIENT),
            InputAction::ToggleDiffuse => self.toggle_lighting(LightingFlags::DIFFUSE),
            InputAction::ToggleSpecular => self.toggle_lighting(LightingFlags::SPECULAR),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
            _ => {}
        }
    }

    fn toggle_lighting(&mut self, flag: LightingFlags) {
        self.lighting.toggle(flag);
        log::debug!("Lighting: {}", self.lighting.label());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.simulation.update(&mut self.clock, &self.system);

        if let Some(renderer) = &mut self.renderer {
            match renderer.render_frame(&self.system, &frame, self.lighting) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => renderer.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("{}", RenderError::OutOfMemory);
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            let lighting = self
                .renderer
                .as_ref()
                .filter(|r| r.is_lit())
                .map(|_| self.lighting.label());
            window.update_title(&frame.clock, lighting.as_deref());
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &self.config.camera,
            self.config.window.vsync,
            &self.system,
        ) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(action) = InputMapper::map_physical(event.physical_key, event.state) {
                    self.handle_action(event_loop, action);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Load the body table, falling back to the built-in one
fn load_system(config: &SystemConfig) -> SolarSystem {
    if config.path.is_empty() {
        return SolarSystem::classic();
    }

    let result = SystemTemplate::load(&config.path)
        .map_err(SystemError::from)
        .and_then(|template| SolarSystem::from_template(&template));

    match result {
        Ok(system) => system,
        Err(SystemError::Invalid(errors)) => {
            for error in &errors {
                log::warn!("{}: {}", config.path, error);
            }
            log::warn!("Invalid body table '{}'. Using built-in system.", config.path);
            SolarSystem::classic()
        }
        Err(e) => {
            log::warn!("Failed to load '{}': {}. Using built-in system.", config.path, e);
            SolarSystem::classic()
        }
    }
}

fn main() {
    // Load configuration
    let config_result = AppConfig::load();
    let log_level = config_result
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging; RUST_LOG still takes precedence
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Solar System");

    let config = config_result.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
