use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

pub struct UiState {
    pub show_hud: bool,
    pub fps: f32,
    frames: u32,
    window_start: Instant,
}

impl UiState {
    pub fn new(show_hud: bool, now: Instant) -> Self {
        Self {
            show_hud,
            fps: 0.0,
            frames: 0,
            window_start: now,
        }
    }

    pub fn toggle_hud(&mut self) {
        self.show_hud = !self.show_hud;
    }

    /// Counts a presented frame, refreshing `fps` every half second.
    pub fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= FPS_WINDOW {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_hud() {
        let mut state = UiState::new(true, Instant::now());
        state.toggle_hud();
        assert!(!state.show_hud);
        state.toggle_hud();
        assert!(state.show_hud);
    }

    #[test]
    fn test_fps_window() {
        let start = Instant::now();
        let mut state = UiState::new(true, start);
        for i in 1..30 {
            state.tick(start + Duration::from_millis(i * 10));
        }
        assert_eq!(state.fps, 0.0);

        state.tick(start + Duration::from_secs(1));
        assert!((state.fps - 30.0).abs() < 1e-3, "fps {}", state.fps);
    }
}
