use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CubeConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Read relative to the working directory at realize time.
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub tick_period: Duration,
    /// Added to the animation counter every tick.
    pub counter_step: f64,
}

impl Default for CubeConfig {
    fn default() -> Self {
        CubeConfig {
            title: "GL Cube".to_string(),
            width: 640,
            height: 480,
            vertex_shader: PathBuf::from("shader/vertex.glsl"),
            fragment_shader: PathBuf::from("shader/fragment.glsl"),
            tick_period: Duration::from_millis(1000),
            counter_step: 0.2,
        }
    }
}
