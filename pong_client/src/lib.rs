//! Browser host for the paddle game
//!
//! Draws on a 2D canvas, reads the keyboard, announces winners with
//! `alert()`, and drives the simulation from `requestAnimationFrame`.
//! Only available when compiling for wasm32.

#![cfg(target_arch = "wasm32")]

mod input;
mod renderer;

use pong_core::{Config, GameState, InputState, Notifier, Side};
use renderer::CanvasRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{console, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

/// Shows the winner in a blocking browser dialog
struct AlertNotifier {
    window: Window,
    announced: bool,
}

impl Notifier for AlertNotifier {
    fn announce_winner(&mut self, winner: Side) {
        let message = format!("Player {} wins!", winner.player_number());
        if let Err(err) = self.window.alert_with_message(&message) {
            console::error_1(&err);
        }
        self.announced = true;
    }
}

/// Play/pause indicator owned by the page
struct PauseIcons {
    pause: HtmlElement,
    play: HtmlElement,
}

impl PauseIcons {
    fn find(document: &Document) -> Option<Self> {
        let pause = document.get_element_by_id("pauseIcon")?.dyn_into().ok()?;
        let play = document.get_element_by_id("playIcon")?.dyn_into().ok()?;
        Some(Self { pause, play })
    }

    fn show(&self, paused: bool) -> Result<(), JsValue> {
        let (pause, play) = if paused {
            ("none", "inline")
        } else {
            ("inline", "none")
        };
        self.pause.style().set_property("display", pause)?;
        self.play.style().set_property("display", play)
    }
}

/// Main client state
struct Client {
    game: GameState,
    input: InputState,
    renderer: CanvasRenderer,
    notifier: AlertNotifier,
    pause_icons: Option<PauseIcons>,
}

impl Client {
    fn frame(&mut self, now_ms: f64) {
        self.game
            .frame(now_ms, &self.input, &mut self.renderer, &mut self.notifier);

        // Key-up events are swallowed while the alert is open
        if self.notifier.announced {
            self.notifier.announced = false;
            self.input.clear();
            log("new match");
        }
    }

    fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        if input::is_pause_key(key) {
            if !repeat {
                self.toggle_pause();
            }
            return true;
        }
        input::handle_key_down(&mut self.input, key)
    }

    fn key_up(&mut self, key: &str) -> bool {
        input::handle_key_up(&mut self.input, key)
    }

    fn toggle_pause(&mut self) -> bool {
        let paused = self.game.toggle_pause();
        if let Some(icons) = &self.pause_icons {
            if let Err(err) = icons.show(paused) {
                console::error_1(&err);
            }
        }
        paused
    }
}

thread_local! {
    // Global client storage for WASM bindings
    static CLIENT: RefCell<Option<Client>> = const { RefCell::new(None) };
}

fn with_client<T>(f: impl FnOnce(&mut Client) -> T) -> Result<T, JsValue> {
    CLIENT.with(|cell| match cell.borrow_mut().as_mut() {
        Some(client) => Ok(f(client)),
        None => Err(JsValue::from_str("Client not initialized")),
    })
}

fn log(msg: &str) {
    console::log_1(&JsValue::from_str(msg));
}

/// Build the game on the canvas with id `canvas_id` and start the frame loop
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id {canvas_id}")))?
        .dyn_into()?;

    let config = Config::with_arena(canvas.width() as f32, canvas.height() as f32);
    let seed = js_sys::Date::now() as u64;
    let game = GameState::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let pause_icons = PauseIcons::find(&document);
    if let Some(icons) = &pause_icons {
        icons.show(false)?;
    }

    let client = Client {
        game,
        input: InputState::new(),
        renderer: CanvasRenderer::new(&canvas)?,
        notifier: AlertNotifier {
            window: window.clone(),
            announced: false,
        },
        pause_icons,
    };
    CLIENT.with(|cell| *cell.borrow_mut() = Some(client));

    register_keyboard(&document)?;
    start_animation_loop(&window)?;

    log(&format!(
        "Game started on {}x{} canvas",
        canvas.width(),
        canvas.height()
    ));
    Ok(())
}

/// Flip the pause flag; returns true when now paused
#[wasm_bindgen]
pub fn toggle_pause() -> Result<bool, JsValue> {
    with_client(|client| client.toggle_pause())
}

/// Abandon the current match and start a new one
#[wasm_bindgen]
pub fn new_game() -> Result<(), JsValue> {
    with_client(|client| {
        client.input.clear();
        client.game.reset_game();
    })
}

fn register_keyboard(document: &Document) -> Result<(), JsValue> {
    let on_key_down = Closure::<dyn FnMut(KeyboardEvent)>::new(|event: KeyboardEvent| {
        let handled = with_client(|client| client.key_down(&event.key(), event.repeat()));
        if matches!(handled, Ok(true)) {
            // Keep arrow keys and space from scrolling the page
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("keydown", on_key_down.as_ref().unchecked_ref())?;
    on_key_down.forget();

    let on_key_up = Closure::<dyn FnMut(KeyboardEvent)>::new(|event: KeyboardEvent| {
        if matches!(with_client(|client| client.key_up(&event.key())), Ok(true)) {
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("keyup", on_key_up.as_ref().unchecked_ref())?;
    on_key_up.forget();

    Ok(())
}

fn start_animation_loop(window: &Window) -> Result<(), JsValue> {
    // The callback re-schedules itself, so it has to own a handle to itself
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle = callback.clone();
    let loop_window = window.clone();

    *handle.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        if let Err(err) = with_client(|client| client.frame(now_ms)) {
            console::error_1(&err);
        }

        if let Some(next) = callback.borrow().as_ref() {
            if let Err(err) = loop_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                console::error_1(&err);
            }
        }
    }));

    if let Some(first) = handle.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}
