//! Billu Sling entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent, PageTransitionEvent, TouchEvent,
        Window,
    };

    use billu_sling::platform::web::{FrameLoop, Listener, release_later};
    use billu_sling::platform::{FrameClock, PageAction, PageLifecycle, Viewport};
    use billu_sling::renderer::{BACKDROP_EASE, Backdrop, RenderState, TextLabel, render_scene};
    use billu_sling::sim::{GamePhase, PointerEvent, SeededRandom, SimState, TickInput, tick};
    use billu_sling::{Session, Tuning};

    fn js_err(err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    fn css_rgba(color: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round(),
            (color[1] * 255.0).round(),
            (color[2] * 255.0).round(),
            color[3]
        )
    }

    fn set_visible(el: &Option<Element>, visible: bool) {
        if let Some(el) = el {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// DOM elements around the canvas; any of them may be missing
    struct Hud {
        speech: Option<HtmlElement>,
        anger_fill: Option<HtmlElement>,
        anger_label: Option<Element>,
        anger_value: Option<Element>,
        hint: Option<Element>,
        meter: Option<Element>,
        finished: Option<Element>,
        result_card: Option<Element>,
        note: Option<Element>,
        /// Last values written, to skip redundant DOM writes
        shown: Option<(u32, GamePhase, bool)>,
        shown_label: Option<TextLabel>,
    }

    impl Hud {
        fn new(document: &Document) -> Self {
            let html = |id: &str| {
                document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            };
            Self {
                speech: html("speech"),
                anger_fill: html("anger-fill"),
                anger_label: document.get_element_by_id("anger-label"),
                anger_value: document.get_element_by_id("anger-value"),
                hint: document.get_element_by_id("hint"),
                meter: document.get_element_by_id("meter"),
                finished: document.get_element_by_id("finished"),
                result_card: document.get_element_by_id("result-card"),
                note: document.get_element_by_id("note"),
                shown: None,
                shown_label: None,
            }
        }

        fn update(&mut self, session: &Session) {
            let key = (session.percent(), session.phase, session.show_hint());
            if self.shown == Some(key) {
                return;
            }
            self.shown = Some(key);

            if let Some(fill) = &self.anger_fill {
                let width = format!("{}%", session.fraction() * 100.0);
                let _ = fill.style().set_property("width", &width);
                let _ = fill.set_attribute("class", session.tone().css_class());
            }
            if let Some(label) = &self.anger_label {
                label.set_text_content(Some(session.label()));
            }
            if let Some(value) = &self.anger_value {
                value.set_text_content(Some(&format!("{}%", session.percent())));
            }

            let finished = session.phase == GamePhase::Finished;
            set_visible(&self.hint, session.show_hint());
            set_visible(&self.meter, !finished);
            set_visible(&self.finished, finished);
        }

        /// Swap the result card for the apology note, or back
        fn show_note(&self, open: bool) {
            set_visible(&self.result_card, !open);
            set_visible(&self.note, open);
        }

        fn show_speech(&mut self, label: Option<&TextLabel>) {
            if self.shown_label.as_ref() == label {
                return;
            }
            self.shown_label = label.cloned();

            let Some(speech) = &self.speech else {
                return;
            };
            let style = speech.style();
            match label {
                Some(label) => {
                    speech.set_text_content(Some(label.text));
                    let _ = style.set_property("left", &format!("{}px", label.center.x));
                    let _ = style.set_property("top", &format!("{}px", label.center.y));
                    let _ = style.set_property("color", &css_rgba(label.color));
                    let _ = style.set_property("font-size", &format!("{}px", label.font_px));
                    let _ = style.set_property("display", "block");
                }
                None => {
                    let _ = style.set_property("display", "none");
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        sim: SimState,
        session: Session,
        tuning: Tuning,
        clock: FrameClock,
        render_state: Option<RenderState>,
        /// Events queued since the last tick
        pointer: Vec<PointerEvent>,
        /// Cosmetic randomness for the renderer, separate from the simulation stream
        jitter: SeededRandom,
        canvas: HtmlCanvasElement,
        hud: Hud,
        /// Background gradient, eased toward the current anger band
        backdrop: Backdrop,
        page: PageLifecycle,
        listeners: Vec<Listener>,
        frame_loop: Option<FrameLoop>,
    }

    impl Game {
        fn new(tuning: Tuning, viewport: Viewport, canvas: HtmlCanvasElement, hud: Hud) -> Self {
            let seed = js_sys::Date::now() as u64;
            log::info!("Game initialized with seed: {seed}");
            Self {
                sim: SimState::new(tuning.clone(), viewport, Box::new(SeededRandom::new(seed))),
                session: Session::new(),
                tuning,
                clock: FrameClock::default(),
                render_state: None,
                pointer: Vec::new(),
                jitter: SeededRandom::new(seed ^ 0x9E37_79B9_7F4A_7C15),
                canvas,
                hud,
                backdrop: Backdrop::default(),
                page: PageLifecycle::default(),
                listeners: Vec::new(),
                frame_loop: None,
            }
        }

        /// Pointer position relative to the canvas, in CSS pixels
        fn to_canvas(&self, client_x: f64, client_y: f64) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new((client_x - rect.left()) as f32, (client_y - rect.top()) as f32)
        }

        fn on_frame(&mut self, now_ms: f64) {
            if !self.clock.poll(now_ms) {
                return;
            }

            let input = TickInput {
                phase: self.session.phase,
                pointer: std::mem::take(&mut self.pointer),
            };
            let session = &mut self.session;
            let mut phase_changed = false;
            tick(&mut self.sim, &input, || {
                phase_changed |= session.on_hit();
            });
            phase_changed |= self.session.tick();
            if phase_changed {
                log::info!("Phase: {:?}", self.session.phase);
            }
            self.backdrop = self
                .backdrop
                .approach(Backdrop::for_tone(self.session.tone()), BACKDROP_EASE);

            self.render();
            self.refresh_hud();
        }

        /// Render the current frame
        fn render(&mut self) {
            let list = render_scene(&self.sim.frame(), self.backdrop, &mut self.jitter);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&list) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }
            self.hud.show_speech(list.label.as_ref());
        }

        fn resize(&mut self, viewport: Viewport) {
            let (width, height) = viewport.physical_size();
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.sim.resize(viewport);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(viewport);
            }
            log::info!(
                "Resized to {}x{} css px @{}x",
                viewport.width,
                viewport.height,
                viewport.dpr
            );
        }

        fn replay(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let viewport = self.sim.viewport;
            self.sim = SimState::new(self.tuning.clone(), viewport, Box::new(SeededRandom::new(seed)));
            self.session.reset();
            self.pointer.clear();
            self.clock.reset();
            self.hud.show_note(false);
            self.refresh_hud();
            log::info!("Replay with seed: {seed}");
        }

        fn refresh_hud(&mut self) {
            self.hud.update(&self.session);
        }
    }

    fn current_viewport(window: &Window) -> Viewport {
        let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32;
        Viewport::new(
            size(window.inner_width()),
            size(window.inner_height()),
            window.device_pixel_ratio() as f32,
        )
    }

    /// Tuning from the optional `#tuning` JSON block, falling back to defaults
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            log::info!("Using default tuning");
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring page tuning: {err}");
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        log::info!("Billu Sling starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#canvas is not a canvas"))?;

        let viewport = current_viewport(&window);
        let (width, height) = viewport.physical_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = load_tuning(&document);
        let game = Rc::new(RefCell::new(Game::new(
            tuning,
            viewport,
            canvas.clone(),
            Hud::new(&document),
        )));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, viewport)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        let listeners = setup_listeners(&window, &document, &canvas, &game);
        game.borrow_mut().listeners = listeners;
        game.borrow_mut().refresh_hud();

        let frame_game = game.clone();
        let frame_loop = FrameLoop::start(move |time| {
            frame_game.borrow_mut().on_frame(time);
        })?;
        game.borrow_mut().frame_loop = Some(frame_loop);

        log::info!("Billu Sling running!");
        Ok(())
    }

    fn setup_listeners(
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Vec<Listener> {
        let mut listeners = Vec::new();

        // Mouse
        {
            let game = game.clone();
            listeners.push(Listener::new(canvas, "mousedown", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let point = g.to_canvas(event.client_x() as f64, event.client_y() as f64);
                g.pointer.push(PointerEvent::Down(point));
            }));
        }
        {
            let game = game.clone();
            listeners.push(Listener::new(canvas, "mousemove", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let point = g.to_canvas(event.client_x() as f64, event.client_y() as f64);
                g.pointer.push(PointerEvent::Move(point));
            }));
        }
        for kind in ["mouseup", "mouseleave"] {
            let game = game.clone();
            listeners.push(Listener::new(canvas, kind, move |_event: MouseEvent| {
                game.borrow_mut().pointer.push(PointerEvent::Up);
            }));
        }

        // Touch (first finger only)
        for (kind, down) in [("touchstart", true), ("touchmove", false)] {
            let game = game.clone();
            listeners.push(Listener::new(canvas, kind, move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let mut g = game.borrow_mut();
                let point = g.to_canvas(touch.client_x() as f64, touch.client_y() as f64);
                g.pointer.push(if down {
                    PointerEvent::Down(point)
                } else {
                    PointerEvent::Move(point)
                });
            }));
        }
        for kind in ["touchend", "touchcancel"] {
            let game = game.clone();
            listeners.push(Listener::new(canvas, kind, move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer.push(PointerEvent::Up);
            }));
        }

        // Resize
        {
            let game = game.clone();
            let resize_window = window.clone();
            listeners.push(Listener::new(window, "resize", move |_event: web_sys::Event| {
                game.borrow_mut().resize(current_viewport(&resize_window));
            }));
        }

        // Finished screen: replay buttons and the note
        for id in ["replay", "forgive"] {
            if let Some(button) = document.get_element_by_id(id) {
                let game = game.clone();
                listeners.push(Listener::new(&button, "click", move |_event: MouseEvent| {
                    game.borrow_mut().replay();
                }));
            }
        }
        for (id, open) in [("read-note", true), ("close-note", false)] {
            if let Some(button) = document.get_element_by_id(id) {
                let game = game.clone();
                listeners.push(Listener::new(&button, "click", move |_event: MouseEvent| {
                    game.borrow().hud.show_note(open);
                }));
            }
        }

        // Back/forward cache: a frozen page keeps its loop, a discarded one releases it
        {
            let game = game.clone();
            listeners.push(Listener::new(window, "pageshow", move |event: PageTransitionEvent| {
                let mut g = game.borrow_mut();
                if g.page.on_page_show(event.persisted()) == PageAction::Resume {
                    g.clock.reset();
                    g.pointer.clear();
                    log::info!("Restored from page cache");
                }
            }));
        }
        {
            let game = game.clone();
            listeners.push(Listener::new(window, "pagehide", move |event: PageTransitionEvent| {
                let (frame_loop, listeners) = {
                    let mut g = game.borrow_mut();
                    match g.page.on_page_hide(event.persisted()) {
                        PageAction::Release => {}
                        PageAction::Suspend => {
                            log::info!("Suspended into page cache");
                            return;
                        }
                        PageAction::None | PageAction::Resume => return,
                    }
                    (g.frame_loop.take(), std::mem::take(&mut g.listeners))
                };
                drop(frame_loop);
                log::info!("Released {} listeners", listeners.len());
                release_later(listeners);
            }));
        }

        listeners
    }

    /// Log the failure on the page as well as the console
    pub fn report(err: &JsValue) {
        log::error!("Billu Sling failed to start: {err:?}");
        let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("speech"))
        {
            el.set_text_content(Some(&format!("WebGPU unavailable: {message}")));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    if let Err(err) = wasm_game::run().await {
        wasm_game::report(&err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Billu Sling (native) starting...");
    log::info!("Native mode runs a headless round - run with `trunk serve` for the web version");

    headless_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Throw at Billu every half second until the round finishes
#[cfg(not(target_arch = "wasm32"))]
fn headless_round() {
    use billu_sling::Session;
    use billu_sling::platform::Viewport;
    use billu_sling::renderer::{Backdrop, render_scene};
    use billu_sling::sim::{GamePhase, PointerEvent, SeededRandom, SimState, TickInput, tick};
    use glam::Vec2;

    const MAX_TICKS: u64 = 60 * 60;
    const THROW_EVERY: u64 = 30;

    let mut sim = SimState::with_seed(Viewport::default(), 7);
    let mut session = Session::new();
    let mut jitter = SeededRandom::new(11);
    let mut hits = 0u32;
    let mut max_vertices = 0usize;

    // Straight above Billu, pulled upward so the throw goes down
    let start = Vec2::new(sim.character.pos.x, sim.character.pos.y - 300.0);
    let pulled = start - Vec2::new(0.0, 100.0);

    while sim.time_ticks < MAX_TICKS && session.phase != GamePhase::Finished {
        let mut input = TickInput::new(session.phase);
        match sim.time_ticks % THROW_EVERY {
            0 => input.pointer.push(PointerEvent::Down(start)),
            1 => input.pointer.push(PointerEvent::Move(pulled)),
            2 => input.pointer.push(PointerEvent::Up),
            _ => {}
        }

        let before = session.phase;
        tick(&mut sim, &input, || {
            hits += 1;
            session.on_hit();
        });
        session.tick();
        if session.phase != before {
            log::info!("tick {}: {:?} -> {:?}", sim.time_ticks, before, session.phase);
        }

        let list = render_scene(&sim.frame(), Backdrop::for_tone(session.tone()), &mut jitter);
        max_vertices = max_vertices.max(list.vertices.len());
    }

    println!(
        "{} hits in {} ticks, phase {:?}, mood {:?}, peak {} vertices",
        hits,
        sim.time_ticks,
        session.phase,
        sim.character.mood(),
        max_vertices
    );
}
