use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context as _, Result};
use glow::{Context, HasContext, DEBUG_SEVERITY_HIGH, DEBUG_SEVERITY_MEDIUM, NO_ERROR, VERSION};
use sdl2::event::{Event, WindowEvent};

pub use glam;
pub use glow;

pub mod area;
mod load_shaders;
pub mod timeout;

pub use area::Area;
pub use load_shaders::LoadShaders;
pub use timeout::{TimeoutQueue, TimerId};

/// Drains the GL error queue, logging every pending error.
pub fn check_error(gl: &Context, what: &str) -> Result<()> {
    let mut pending = 0;
    unsafe {
        let mut error = gl.get_error();
        while error != NO_ERROR {
            pending += 1;
            log::error!("{what}: GL error 0x{error:04X}");
            error = gl.get_error();
        }
    }
    if pending == 0 {
        Ok(())
    } else {
        Err(anyhow!("{what}: {pending} GL error(s) pending"))
    }
}

/// Forwards medium and high severity driver messages to the log.
/// Pass to [StartBuilder::debug_message_callback].
pub fn log_debug_message(_source: u32, _type: u32, id: u32, severity: u32, message: String) {
    match severity {
        DEBUG_SEVERITY_HIGH => log::error!("GL debug [{id}] {message}"),
        DEBUG_SEVERITY_MEDIUM => log::warn!("GL debug [{id}] {message}"),
        _ => {}
    }
}

/// An application drawn into a window-filling GL surface.
///
/// The event loop owns the value and hands it to each callback. All
/// callbacks run on the thread that called [StartBuilder::start] with the
/// GL context current.
#[allow(unused)]
pub trait GlArea: Sized {
    /// Runs once, right after the context is created.
    fn realize(&mut self, gl: &Context, area: &mut Area);

    /// Runs whenever a redraw was queued. The viewport already covers the area.
    fn render(&mut self, gl: &Context, area: &Area);

    /// Runs when a timer added with [Area::add_timeout] is due. Returning
    /// `ControlFlow::Break` removes the timer.
    fn timeout(&mut self, gl: &Context, area: &mut Area, timer: TimerId) -> ControlFlow<()> {
        ControlFlow::Break(())
    }

    fn gl_area(window_title: impl Into<String>) -> StartBuilder<Self> {
        StartBuilder::new(window_title.into())
    }
}

pub type DebugMessageCallback = dyn Fn(u32, u32, u32, u32, String) + Send + Sync;

pub struct StartBuilder<T: GlArea> {
    window_title: String,
    window_width: Option<u32>,
    window_height: Option<u32>,
    gl_version: Option<(u8, u8)>,
    app: PhantomData<T>,
    debug_message_callback: Option<Box<DebugMessageCallback>>,
}

impl<T: GlArea> StartBuilder<T> {
    pub fn new(window_title: String) -> Self {
        StartBuilder {
            window_title,
            window_width: None,
            window_height: None,
            gl_version: None,
            app: PhantomData,
            debug_message_callback: None,
        }
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = Some(width);
        self.window_height = Some(height);
        self
    }

    pub fn gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = Some((major, minor));
        self
    }

    pub fn debug_message_callback(
        mut self,
        callback: impl Fn(u32, u32, u32, u32, String) + Send + Sync + 'static,
    ) -> Self {
        self.debug_message_callback = Some(Box::new(callback));
        self
    }

    /// Opens the window and runs the event loop until it is closed.
    ///
    /// Fails only while acquiring the window and GL context. Once `realize`
    /// has run, errors are the application's to report.
    pub fn start(mut self, mut app: T) -> Result<()> {
        let (gl_major_version, gl_minor_version) = self.gl_version.unwrap_or((3, 2));

        let sdl = sdl2::init().map_err(|e| anyhow!("cannot initialize SDL: {e}"))?;
        let video = sdl
            .video()
            .map_err(|e| anyhow!("cannot initialize SDL video: {e}"))?;
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(gl_major_version, gl_minor_version);
        let window = video
            .window(
                &self.window_title,
                self.window_width.unwrap_or(640),
                self.window_height.unwrap_or(480),
            )
            .position_centered()
            .allow_highdpi()
            .opengl()
            .resizable()
            .build()
            .context("cannot create window")?;
        let gl_context = window
            .gl_create_context()
            .map_err(|e| anyhow!("cannot create GL context: {e}"))?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| anyhow!("cannot make GL context current: {e}"))?;
        if let Err(e) = window.subsystem().gl_set_swap_interval(1) {
            log::warn!("vsync unavailable: {e}");
        }

        let mut gl =
            unsafe { Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _) };
        check_error(&gl, "context")?;
        log::info!("OpenGL {}", unsafe { gl.get_parameter_string(VERSION) });

        if let Some(callback) = self.debug_message_callback.take() {
            let version = gl.version();
            let supported = (version.major, version.minor) >= (4, 3)
                || gl.supported_extensions().contains("GL_KHR_debug");
            if supported {
                unsafe {
                    gl.debug_message_callback(move |source, typ, id, severity, message| {
                        callback(source, typ, id, severity, message.to_string())
                    });
                }
            } else {
                log::warn!("GL debug output not supported by this context");
            }
        }

        let (width, height) = window.drawable_size();
        let mut area = Area::new(width, height);
        app.realize(&gl, &mut area);

        let mut event_loop = sdl
            .event_pump()
            .map_err(|e| anyhow!("cannot create event pump: {e}"))?;
        'running: loop {
            // Sleep until an event arrives or the next timer is due.
            let first = if area.redraw_queued() {
                event_loop.poll_event()
            } else {
                match area.timeouts().time_until_next(Instant::now()) {
                    Some(wait) => event_loop.wait_event_timeout(wait_millis(wait)),
                    None => Some(event_loop.wait_event()),
                }
            };

            let pending: Vec<Event> = first.into_iter().chain(event_loop.poll_iter()).collect();
            for event in pending {
                match event {
                    Event::Quit { .. } => break 'running,
                    Event::Window {
                        win_event: WindowEvent::SizeChanged(..) | WindowEvent::Resized(..),
                        ..
                    } => {
                        let (width, height) = window.drawable_size();
                        area.resize(width, height);
                    }
                    Event::Window {
                        win_event: WindowEvent::Exposed,
                        ..
                    } => area.queue_draw(),
                    _ => {}
                }
            }

            fire_due(&mut area, Instant::now(), |area, timer| app.timeout(&gl, area, timer));

            if area.take_redraw() {
                let (width, height) = area.size();
                unsafe {
                    gl.viewport(0, 0, width as i32, height as i32);
                }
                app.render(&gl, &area);
                window.gl_swap_window();
            }
        }

        log::info!("window closed");
        Ok(())
    }
}

/// Runs every timer due at `now`, in deadline order. `Continue` keeps a
/// timer on its period, `Break` removes it.
fn fire_due(
    area: &mut Area,
    now: Instant,
    mut fire: impl FnMut(&mut Area, TimerId) -> ControlFlow<()>,
) {
    for timer in area.timeouts().due(now) {
        // An earlier callback in this batch may have removed it.
        if !area.timeouts().contains(timer) {
            continue;
        }
        match fire(area, timer) {
            ControlFlow::Continue(()) => area.timeouts_mut().reschedule(timer, now),
            ControlFlow::Break(()) => {
                area.remove_timeout(timer);
            }
        }
    }
}

/// Rounds up so the loop never wakes just before a deadline.
fn wait_millis(wait: Duration) -> u32 {
    u32::try_from(wait.as_nanos().div_ceil(1_000_000)).unwrap_or(u32::MAX)
}
