//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use solar_core::AnimationClock;

use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with the clock state
    pub fn update_title(&self, clock: &AnimationClock, lighting: Option<&str>) {
        self.window.set_title(&format_title(&self.base_title, clock, lighting));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Title text, e.g. `Systeme Solaire - Day 12.0 Hour 288 Step 24h [R to pause]`
pub fn format_title(base: &str, clock: &AnimationClock, lighting: Option<&str>) -> String {
    let state = if clock.is_running() {
        "[R to pause]"
    } else {
        "[Paused - R to run, S to step]"
    };

    let mut title = format!(
        "{} - Day {:.1} Hour {:.0} Step {}h {}",
        base,
        clock.day_of_year(),
        clock.hour_of_day(),
        clock.time_step_hours(),
        state
    );
    if let Some(label) = lighting {
        title.push_str(" Light: ");
        title.push_str(label);
    }
    title
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_running() {
        let clock = AnimationClock::new();
        let title = format_title("Test", &clock, None);
        assert_eq!(title, "Test - Day 0.0 Hour 0 Step 24h [R to pause]");
    }

    #[test]
    fn test_title_paused_with_lighting() {
        let clock = AnimationClock::at(36.0, 1.5).with_time_step(6.0);
        let title = format_title("Test", &clock, Some("A - S"));
        assert!(title.contains("Day 1.5 Hour 36 Step 6h"));
        assert!(title.contains("Paused"));
        assert!(title.ends_with("Light: A - S"));
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(format!("{}", err), "Window creation failed: no display");
    }
}
