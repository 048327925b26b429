/// Compile-time settings for the demo window and renderer.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub position: (i32, i32),
    pub resizable: bool,
    pub vsync: bool,
    pub show_hud: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Parametric Shapes",
            width: 960,
            height: 960,
            position: (10, 50),
            resizable: false,
            vsync: true,
            show_hud: true,
        }
    }
}
