//! Blitz Clock entry point
//!
//! Handles platform-specific initialization: on wasm this wires the DOM
//! shell to the clock session and drives the countdown interval; the native
//! build runs a short headless demo game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, HtmlSelectElement, PointerEvent};

    use blitz_clock::consts::TICK_INTERVAL_MS;
    use blitz_clock::engine::{
        ClockConfig, ConfigError, Phase, Player, PlayerTiming, SetupField, TimingMode,
    };
    use blitz_clock::platform::web::{WebHaptics, WebWakeLock};
    use blitz_clock::{ClockSession, Preset, format_time, load_presets};

    /// Application instance holding the session and shell state
    struct App {
        session: ClockSession<WebWakeLock, WebHaptics>,
        presets: Vec<Preset>,
        /// Catalog entry currently filled into the form, if any; its stages
        /// and armageddon metadata ride into the next game
        selected_preset: Option<usize>,
        /// Live countdown interval handle
        interval: Option<i32>,
        tick_cb: Option<Closure<dyn FnMut()>>,
    }

    impl App {
        fn new() -> Self {
            Self {
                session: ClockSession::new(WebWakeLock::new(), WebHaptics),
                presets: load_presets().expect("embedded preset catalog must parse"),
                selected_preset: None,
                interval: None,
                tick_cb: None,
            }
        }
    }

    /// Wall clock in seconds, matching the engine's time unit
    fn now_secs() -> f64 {
        js_sys::Date::now() / 1000.0
    }

    fn dom() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Blitz Clock starting...");

        let app = Rc::new(RefCell::new(App::new()));
        let document = dom();

        populate_preset_select(&document, &app.borrow().presets);

        // The tick closure lives for the whole session; sync_timer hands it
        // to set_interval when a clock starts running
        {
            let app_for_tick = app.clone();
            let cb = Closure::<dyn FnMut()>::new(move || on_tick(&app_for_tick));
            app.borrow_mut().tick_cb = Some(cb);
        }

        setup_side_handlers(&document, app.clone());
        setup_button_handlers(&document, app.clone());
        setup_preset_handler(&document, app.clone());
        setup_visibility_handler(&document, app.clone());

        update_display(&app);

        log::info!("Blitz Clock ready");
    }

    /// Start/stop the countdown interval to match the engine phase.
    ///
    /// Called after every action and after flagging ticks, so leaving
    /// Running by any path cancels the timer.
    fn sync_timer(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        let running = a.session.engine().is_running();
        let window = web_sys::window().expect("no window");
        match (running, a.interval) {
            (true, None) => {
                let Some(func) = a
                    .tick_cb
                    .as_ref()
                    .map(|cb| cb.as_ref().unchecked_ref::<js_sys::Function>().clone())
                else {
                    return;
                };
                match window
                    .set_interval_with_callback_and_timeout_and_arguments_0(&func, TICK_INTERVAL_MS)
                {
                    Ok(id) => a.interval = Some(id),
                    Err(err) => log::error!("failed to start countdown timer: {err:?}"),
                }
            }
            (false, Some(id)) => {
                window.clear_interval_with_handle(id);
                a.interval = None;
            }
            _ => {}
        }
    }

    fn on_tick(app: &Rc<RefCell<App>>) {
        app.borrow_mut().session.tick(now_secs());
        sync_timer(app);
        update_display(app);
    }

    fn handle_side_tap(app: &Rc<RefCell<App>>, player: Player) {
        app.borrow_mut().session.move_signal(player, now_secs());
        sync_timer(app);
        update_display(app);
    }

    fn handle_pause(app: &Rc<RefCell<App>>) {
        app.borrow_mut().session.pause_toggle(now_secs());
        sync_timer(app);
        update_display(app);
    }

    fn handle_start(app: &Rc<RefCell<App>>) {
        let document = dom();
        let config = {
            let a = app.borrow();
            let preset = a.selected_preset.and_then(|i| a.presets.get(i));
            read_setup(&document, preset)
        };
        match app.borrow_mut().session.start_game(config) {
            Ok(()) => show_setup_error(&document, None),
            Err(err) => show_setup_error(&document, Some(&err)),
        }
        sync_timer(app);
        update_display(app);
    }

    fn handle_reset(app: &Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let needs_confirm = {
            let a = app.borrow();
            let engine = a.session.engine();
            engine.phase != Phase::Setup && !engine.is_game_over()
        };
        let confirmed = if needs_confirm {
            window
                .confirm_with_message(
                    "Are you sure you want to go to settings? This will reset the clock.",
                )
                .unwrap_or(false)
        } else {
            true
        };
        app.borrow_mut().session.reset_game(confirmed);
        sync_timer(app);
        update_display(app);
    }

    /// Build a configuration from the setup form. The form holds the base
    /// times and increments; a selected preset contributes its stages and
    /// armageddon metadata on top.
    fn read_setup(document: &Document, preset: Option<&Preset>) -> ClockConfig {
        let p1 = PlayerTiming::from_hms(
            input_u32(document, "p1-hours"),
            input_u32(document, "p1-minutes"),
            input_u32(document, "p1-seconds"),
            input_f64(document, "p1-increment"),
            mode_value(document, "p1-mode"),
        );
        let mirrored = document
            .get_element_by_id("mirrored")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|el| el.checked())
            .unwrap_or(true);
        let p2 = if mirrored {
            p1
        } else {
            PlayerTiming::from_hms(
                input_u32(document, "p2-hours"),
                input_u32(document, "p2-minutes"),
                input_u32(document, "p2-seconds"),
                input_f64(document, "p2-increment"),
                mode_value(document, "p2-mode"),
            )
        };

        let mut config = ClockConfig {
            players: [p1, p2],
            stages: Vec::new(),
            armageddon: None,
        };
        if let Some(preset) = preset {
            config.stages = preset.stages.clone();
            config.armageddon = preset.armageddon;
        }
        config
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default()
    }

    /// Empty or junk input counts as zero, like the original form
    fn input_u32(document: &Document, id: &str) -> u32 {
        input_value(document, id).trim().parse().unwrap_or(0)
    }

    fn input_f64(document: &Document, id: &str) -> f64 {
        input_value(document, id).trim().parse().unwrap_or(0.0)
    }

    fn mode_value(document: &Document, id: &str) -> TimingMode {
        let value = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default();
        match value.as_str() {
            "delay" => TimingMode::Delay,
            _ => TimingMode::Increment,
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn show_setup_error(document: &Document, error: Option<&ConfigError>) {
        match error {
            Some(err) => {
                set_text(document, "setup-error", &err.to_string());
                set_class(document, "setup-error", "setup-error");
                let (base_class, inc_class) = match err.field() {
                    SetupField::Base => ("field-group invalid", "field-group"),
                    SetupField::Increment => ("field-group", "field-group invalid"),
                };
                set_class(document, "base-fields", base_class);
                set_class(document, "increment-fields", inc_class);
            }
            None => {
                set_text(document, "setup-error", "");
                set_class(document, "setup-error", "setup-error hidden");
                set_class(document, "base-fields", "field-group");
                set_class(document, "increment-fields", "field-group");
            }
        }
    }

    fn update_display(app: &Rc<RefCell<App>>) {
        let a = app.borrow();
        let engine = a.session.engine();
        let document = dom();

        set_text(&document, "time-one", &format_time(engine.remaining_secs(Player::One)));
        set_text(&document, "time-two", &format_time(engine.remaining_secs(Player::Two)));
        set_text(&document, "moves-one", &engine.moves(Player::One).to_string());
        set_text(&document, "moves-two", &engine.moves(Player::Two).to_string());

        for (player, side_id, delay_id) in [
            (Player::One, "side-one", "delay-one"),
            (Player::Two, "side-two", "delay-two"),
        ] {
            let delay = engine.delay_secs(player);
            if delay > 0.0 {
                set_text(&document, delay_id, &format!("wait {:.0}", delay.ceil()));
                set_class(&document, delay_id, "delay");
            } else {
                set_class(&document, delay_id, "delay hidden");
            }

            let class = match engine.phase {
                Phase::Running(p) if p == player => "side active",
                Phase::GameOver(p) if p == player => "side flagged",
                Phase::Priming | Phase::Paused if engine.ready_player == player => "side ready",
                _ => "side",
            };
            set_class(&document, side_id, class);
        }

        let pause_label = match engine.phase {
            Phase::Running(_) => "Pause",
            Phase::Paused => "Resume",
            _ => "Start",
        };
        set_text(&document, "pause-btn", pause_label);

        let setup_class = if engine.phase == Phase::Setup {
            "overlay"
        } else {
            "overlay hidden"
        };
        set_class(&document, "setup", setup_class);

        match engine.flagged_player() {
            Some(player) => {
                set_text(
                    &document,
                    "flag-msg",
                    &format!("{} ran out of time", player.label()),
                );
                set_class(&document, "game-over", "banner");
            }
            None => set_class(&document, "game-over", "banner hidden"),
        }
    }

    fn populate_preset_select(document: &Document, presets: &[Preset]) {
        let Some(select) = document.get_element_by_id("preset-select") else {
            return;
        };
        let mut options = String::from("<option value=\"custom\">Custom</option>");
        for (i, preset) in presets.iter().enumerate() {
            options.push_str(&format!("<option value=\"{i}\">{}</option>", preset.label));
        }
        select.set_inner_html(&options);
    }

    /// Fill the form fields from a catalog entry
    fn apply_preset_to_form(document: &Document, preset: &Preset) {
        let fields = [
            ("p1-hours", preset.hours.to_string()),
            ("p1-minutes", preset.minutes.to_string()),
            ("p1-seconds", preset.seconds.to_string()),
            ("p1-increment", preset.increment.to_string()),
        ];
        for (id, value) in fields {
            if let Some(input) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&value);
            }
        }
        if let Some(select) = document
            .get_element_by_id("p1-mode")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(match preset.mode {
                TimingMode::Delay => "delay",
                TimingMode::Increment => "increment",
            });
        }
        if let Some(mirrored) = document
            .get_element_by_id("mirrored")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            mirrored.set_checked(true);
        }
    }

    fn setup_side_handlers(document: &Document, app: Rc<RefCell<App>>) {
        for (id, player) in [("side-one", Player::One), ("side-two", Player::Two)] {
            let Some(side) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                // One pointer event per tap; no synthetic mouse follow-up
                event.prevent_default();
                handle_side_tap(&app, player);
            });
            let _ = side
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_button_handlers(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handle_pause(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handle_start(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handle_reset(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_preset_handler(document: &Document, app: Rc<RefCell<App>>) {
        let Some(select) = document.get_element_by_id("preset-select") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(select) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            let document = dom();
            let mut a = app.borrow_mut();
            match select.value().parse::<usize>() {
                Ok(index) if index < a.presets.len() => {
                    apply_preset_to_form(&document, &a.presets[index]);
                    a.selected_preset = Some(index);
                }
                _ => a.selected_preset = None,
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility_handler(document: &Document, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let visible = dom().visibility_state() == web_sys::VisibilityState::Visible;
            app.borrow_mut().session.on_visibility_change(visible);
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blitz Clock (native) starting...");
    log::info!("The clock shell is browser-only - run with `trunk serve` for the web version");

    println!("\nRunning scripted demo game...");
    demo_game();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_game() {
    use blitz_clock::engine::{ClockConfig, Player};
    use blitz_clock::platform::{NullHaptics, NullLock};
    use blitz_clock::{ClockSession, format_time};

    let mut session = ClockSession::new(NullLock, NullHaptics);
    session
        .start_game(ClockConfig::default())
        .expect("default config is valid");

    // Player 1 taps their side, nominating player 2 to move first
    session.move_signal(Player::One, 0.0);
    session.pause_toggle(0.0);

    let mut now = 0.0;
    let script = [
        (Player::Two, 1.8),
        (Player::One, 3.2),
        (Player::Two, 0.6),
        (Player::One, 7.4),
    ];
    for (player, think_secs) in script {
        now += think_secs;
        session.move_signal(player, now);
        let engine = session.engine();
        println!(
            "{} moved after {think_secs:.1}s: P1 {} | P2 {}",
            player.label(),
            format_time(engine.remaining_secs(Player::One)),
            format_time(engine.remaining_secs(Player::Two)),
        );
    }
    println!("✓ Demo complete");
}
