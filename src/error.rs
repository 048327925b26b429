use thiserror::Error;

/// Startup and frame failures. Every variant ends the process.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("shader program '{label}' failed to build: {message}")]
    ShaderCompile { label: &'static str, message: String },
    #[error("out of GPU memory")]
    OutOfMemory,
}
