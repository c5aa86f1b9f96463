//! Trac Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use trac_flappy::economy::SKINS;
    use trac_flappy::persistence::LocalStore;
    use trac_flappy::platform::{Intent, frame_delta, intent_for_key, intent_for_pointer, now_ms};
    use trac_flappy::renderer::{CanvasRenderer, build_scene};
    use trac_flappy::{Session, Status, ui, wallet};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        renderer: Option<CanvasRenderer>,
        last_time: Option<f64>,
        /// Balance and status the side panels were last drawn for
        shown_panels: Option<(u64, Status)>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(LocalStore::open(), seed, now_ms()),
                renderer: None,
                last_time: None,
                shown_panels: None,
            }
        }

        fn handle(&mut self, intent: Intent) {
            self.session.handle(intent);
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                let scene = build_scene(&self.session.round, self.session.profile.skin());
                if let Err(e) = renderer.draw(&scene) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Per-frame HUD: score, balance, lives and the overlay
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = &self.session;

            set_text(&document, "score-value", &session.score().to_string());
            set_text(&document, "coins-value", &ui::format_currency(session.coins()));
            set_text(
                &document,
                "lives-value",
                &ui::lives_label(session.lives, session.max_lives()),
            );

            // Overlay
            if let Some(el) = document.get_element_by_id("overlay-text") {
                match session.overlay {
                    Some(ref text) => {
                        if el.text_content().as_deref() != Some(text.as_str()) {
                            el.set_text_content(Some(text));
                        }
                        let _ = el.class_list().remove_1("hidden");
                    }
                    None => {
                        let _ = el.class_list().add_1("hidden");
                    }
                }
            }

            // Coins change shop affordability; game over changes the board
            if self.shown_panels != Some(self.panel_key()) {
                self.refresh_panels();
            }
        }

        fn panel_key(&self) -> (u64, Status) {
            (self.session.coins(), self.session.status)
        }

        /// Shop, wallet, skin grid and leaderboard
        fn refresh_panels(&mut self) {
            self.shown_panels = Some(self.panel_key());
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = &self.session;
            let ledger = &session.profile.ledger;

            set_text(&document, "multiplier-info", &ui::multiplier_info(ledger));
            set_text(&document, "extra-life-info", &ui::extra_life_info(ledger));
            set_button(&document, "multiplier-button", &ui::multiplier_button(ledger));
            set_button(&document, "lives-button", &ui::extra_life_button(ledger));

            // Wallet
            set_text(&document, "wallet-status", &session.wallet_status.label());
            if let Some(btn) = button(&document, "wallet-button") {
                btn.set_text_content(Some(session.wallet_status.button_label()));
                btn.set_disabled(session.wallet_status.is_busy());
            }

            // Selected skin
            if let Ok(buttons) = document.query_selector_all("#skin-grid button") {
                for i in 0..buttons.length() {
                    if let Some(el) = buttons.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                        let _ = el
                            .class_list()
                            .toggle_with_force("selected", i as usize == session.profile.skin_index);
                    }
                }
            }

            // Leaderboard
            if let Some(list) = document.get_element_by_id("leaderboard-list") {
                let rendered: String = ui::leaderboard_lines(&session.profile.leaderboard)
                    .iter()
                    .map(|line| format!("<li>{}</li>", escape_html(line)))
                    .collect();
                list.set_inner_html(&rendered);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn button(document: &Document, id: &str) -> Option<HtmlButtonElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_button(document: &Document, id: &str, view: &ui::ButtonView) {
        if let Some(btn) = button(document, id) {
            btn.set_text_content(Some(&view.label));
            btn.set_disabled(!view.enabled);
        }
    }

    /// Escape text for insertion as markup
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Trac Flappy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match document
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => match CanvasRenderer::new(canvas.clone()) {
                Ok(renderer) => {
                    game.borrow_mut().renderer = Some(renderer);
                    setup_input_handlers(&canvas, game.clone());
                }
                Err(e) => log::error!("Failed to set up canvas: {:?}", e),
            },
            None => log::error!("No #game-canvas element"),
        }

        setup_keyboard(game.clone());
        setup_resize(game.clone());
        setup_shop_buttons(game.clone());
        setup_skin_grid(&document, game.clone());
        setup_wallet_button(game.clone());

        game.borrow_mut().update_hud();
        request_animation_frame(game);

        log::info!("Trac Flappy running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().handle(intent_for_pointer());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().handle(intent_for_pointer());
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(intent) = intent_for_key(&event.code()) {
                event.prevent_default();
                game.borrow_mut().handle(intent);
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let mut g = game.borrow_mut();
            if let Some(ref mut renderer) = g.renderer {
                if let Err(e) = renderer.resize(ratio) {
                    log::warn!("Resize failed: {:?}", e);
                }
            }
            g.render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_shop_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let game = game.clone();
            on_click(&document, "multiplier-button", move |_| {
                let g = &mut *game.borrow_mut();
                let _ = g.session.buy_multiplier();
                g.refresh_panels();
            });
        }

        on_click(&document, "lives-button", move |_| {
            let g = &mut *game.borrow_mut();
            let _ = g.session.buy_extra_life();
            g.refresh_panels();
        });
    }

    /// Build one button per skin inside `#skin-grid`
    fn setup_skin_grid(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(grid) = document.get_element_by_id("skin-grid") else {
            return;
        };
        grid.set_inner_html("");

        for (index, skin) in SKINS.iter().enumerate() {
            let Ok(btn) = document.create_element("button") else {
                continue;
            };
            btn.set_text_content(Some(skin.name));
            let _ = btn.set_attribute("data-skin", skin.key);
            let _ = btn.set_attribute(
                "style",
                &format!(
                    "background: linear-gradient(135deg, {}, {})",
                    skin.primary, skin.secondary
                ),
            );

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let g = &mut *game.borrow_mut();
                if g.session.select_skin(index) {
                    log::info!("Skin selected: {}", SKINS[index].name);
                    g.render();
                    g.refresh_panels();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();

            let _ = grid.append_child(&btn);
        }
    }

    fn setup_wallet_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        on_click(&document, "wallet-button", move |_| {
            let started = game
                .borrow_mut()
                .session
                .begin_wallet_connect(wallet::provider_available());
            game.borrow_mut().refresh_panels();
            if !started {
                return;
            }

            let game = game.clone();
            wallet::connect(move |result| {
                let g = &mut *game.borrow_mut();
                g.session.finish_wallet_connect(result);
                g.refresh_panels();
            });
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let delta = frame_delta(g.last_time, time);
            g.last_time = Some(time);

            g.session.update(delta, now_ms());
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Trac Flappy (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the real game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    autopilot(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a full run with a simple "stay level with the next gap" policy
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(seed: u64) {
    use trac_flappy::persistence::MemoryStore;
    use trac_flappy::platform::{Intent, now_ms};
    use trac_flappy::{Session, Status, ui};

    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let mut session = Session::new(MemoryStore::new(), seed, now_ms());
    session.handle(Intent::Activate);

    let mut frames = 0;
    while frames < MAX_FRAMES {
        frames += 1;
        match session.status {
            Status::Playing => {}
            Status::LifeLost => {
                session.handle(Intent::Activate);
                continue;
            }
            Status::Idle | Status::GameOver => break,
        }

        let bird = &session.round.bird;
        let target = session
            .round
            .pipes
            .iter()
            .find(|p| p.trailing_edge() > bird.left())
            .map_or(session.round.bird.pos.y, |p| p.gap_center());
        if bird.pos.y > target + 12.0 && bird.velocity >= 0.0 {
            session.handle(Intent::Activate);
        }

        session.update(1.0, now_ms());
    }

    log::info!(
        "Autopilot finished after {} frames: status {:?}, score {}, balance {}",
        frames,
        session.status,
        session.score(),
        ui::format_currency(session.coins())
    );
    for line in ui::leaderboard_lines(&session.profile.leaderboard) {
        log::info!("  {}", line);
    }
}
