use crate::constants::MAX_FRAME_DT_SEC;
use crate::core::{compose_scene, SceneGraph, TextureCache};
use crate::render::{self, GpuTexture};
use crate::state::AppState;
use crate::textures::{self, TextureInbox};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: Rc<RefCell<AppState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub textures: TextureCache<GpuTexture>,
    pub inbox: TextureInbox,

    pub last_instant: Instant,
    pub composed_revision: Option<u64>,
    pub composed_generation: u64,
    pub scene: Option<SceneGraph>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        app: Rc<RefCell<AppState>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        Self {
            app,
            canvas,
            gpu,
            textures: TextureCache::new(),
            inbox: Rc::new(RefCell::new(Vec::new())),
            last_instant: Instant::now(),
            composed_revision: None,
            composed_generation: 0,
            scene: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        self.drain_textures();

        let mut app = self.app.borrow_mut();
        let revision = app.config.revision();
        let recompose = self.composed_revision != Some(revision)
            || self.composed_generation != self.textures.generation();
        if recompose {
            let scene = compose_scene(app.config.current(), &app.view.mesh, &self.textures);
            for path in &scene.texture_requests {
                if self.textures.request(path) {
                    textures::spawn_fetch(*path, self.inbox.clone());
                }
            }
            if app.geometry.ensure(scene.mesh.geometry) {
                if let (Some(g), Some(mesh)) = (&mut self.gpu, app.geometry.mesh()) {
                    g.set_mesh(mesh);
                }
            }
            if let Some(g) = &mut self.gpu {
                g.set_material(&scene.mesh.shader, &self.textures);
            }
            if scene.mesh.used_fallback {
                log::warn!("rendering {:?} with the fallback material", scene.mesh.shape);
            }
            self.composed_revision = Some(revision);
            self.composed_generation = self.textures.generation();
            self.scene = Some(scene);
        }

        let Some(scene) = &mut self.scene else {
            return;
        };
        app.view.mesh.advance(dt_sec, scene.mesh.geometry.target_scale);
        scene.mesh.rotation_y = app.view.mesh.rotation_y();
        scene.mesh.scale = app.view.mesh.scale();
        app.orbit.update();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(scene, &app.orbit) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    /// Uploads textures decoded since the previous frame.
    fn drain_textures(&mut self) {
        let arrived: Vec<_> = self.inbox.borrow_mut().drain(..).collect();
        for (path, result) in arrived {
            let uploaded = match (&self.gpu, result) {
                (Some(g), Ok(image)) => Ok(g.upload_texture(&path, &image)),
                (None, Ok(_)) => continue,
                (_, Err(e)) => Err(e),
            };
            self.textures.resolve(&path, uploaded);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
