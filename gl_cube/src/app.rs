use std::ops::ControlFlow;

use anyhow::Result;
use glarea::{glow::Context, Area, GlArea, LoadShaders, TimerId};

use crate::animator::Animator;
use crate::config::CubeConfig;
use crate::gfx::Graphics;
use crate::scene::Scene;

/// Everything the callbacks share. Owned by the event loop.
pub struct CubeApp<G: Graphics> {
    config: CubeConfig,
    animator: Animator,
    scene: Option<Scene<G>>,
    /// Area size the current MVP's projection was built for.
    mvp_size: Option<(u32, u32)>,
}

impl<G: Graphics> CubeApp<G> {
    pub fn new(config: CubeConfig) -> Self {
        let animator = Animator::new(config.counter_step);
        CubeApp {
            config,
            animator,
            scene: None,
            mvp_size: None,
        }
    }

    /// Builds the scene from the configured shader files. Starts the
    /// animation timer only if every step succeeded.
    pub fn on_realize(&mut self, gfx: &G, area: &mut Area) {
        gfx.clear_color(0.0, 0.0, 0.0, 1.0);
        let shaders =
            LoadShaders::new_from_path(&self.config.vertex_shader, &self.config.fragment_shader);
        self.setup(gfx, area, shaders);
    }

    fn setup(&mut self, gfx: &G, area: &mut Area, shaders: Result<LoadShaders>) {
        let scene = match shaders.and_then(|shaders| Scene::init(gfx, shaders)) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("scene setup failed: {err:#}");
                return;
            }
        };

        scene.set_mvp(gfx, &self.animator.mvp(area.aspect_ratio()));
        self.mvp_size = Some(area.size());
        self.scene = Some(scene);
        area.add_timeout(self.config.tick_period);
        log::info!("cube ready, ticking every {:?}", self.config.tick_period);
    }

    /// Clears and draws. A resize since the last upload rebuilds the MVP
    /// for the new aspect ratio first.
    pub fn on_render(&mut self, gfx: &G, area: &Area) {
        gfx.clear();
        if let Some(scene) = &self.scene {
            if self.mvp_size != Some(area.size()) {
                scene.set_mvp(gfx, &self.animator.mvp(area.aspect_ratio()));
                self.mvp_size = Some(area.size());
            }
            scene.render(gfx);
        }
    }

    pub fn on_tick(&mut self, gfx: &G, area: &mut Area) -> ControlFlow<()> {
        self.animator.tick();
        let mvp = self.animator.mvp(area.aspect_ratio());
        if let Some(scene) = &self.scene {
            scene.set_mvp(gfx, &mvp);
            self.mvp_size = Some(area.size());
        }
        log::debug!(
            "tick {}: angle {:.3} degrees",
            self.animator.ticks(),
            self.animator.angle_degrees()
        );
        area.queue_draw();
        ControlFlow::Continue(())
    }
}

impl GlArea for CubeApp<Context> {
    fn realize(&mut self, gl: &Context, area: &mut Area) {
        self.on_realize(gl, area);
    }

    fn render(&mut self, gl: &Context, area: &Area) {
        self.on_render(gl, area);
    }

    fn timeout(&mut self, gl: &Context, area: &mut Area, _timer: TimerId) -> ControlFlow<()> {
        self.on_tick(gl, area)
    }
}
