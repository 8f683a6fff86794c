//! Seesaw entry point
//!
//! On the web: wires DOM events to a [`Session`]. Natively: drives the same
//! session from command-line arguments against a file store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent};

    use seesaw::persistence::{KeyValueStore, MemoryStore, SnapshotStore};
    use seesaw::platform::{LocalStorage, clock_seed};
    use seesaw::sim::{DropLogEntry, PhysicsResult, PlacedObject};
    use seesaw::view::{PhysicsText, next_weight_label, object_left, object_size};
    use seesaw::{Renderer, Session, Settings, distance_from_click};

    const LOG_PLACEHOLDER: &str = "<small>Simulation status: Ready to interact.</small>";

    type WebSession = Session<Box<dyn KeyValueStore>, DomRenderer>;

    /// Renders session updates into the page
    struct DomRenderer {
        document: Document,
    }

    impl DomRenderer {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_style(el: &Element, props: &[(&str, &str)]) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let style = el.style();
            for (name, value) in props {
                let _ = style.set_property(name, value);
            }
        }
    }

    impl Renderer for DomRenderer {
        fn draw_object(&mut self, obj: &PlacedObject) {
            let Some(container) = self.element("objects-container") else {
                return;
            };
            let Ok(el) = self.document.create_element("div") else {
                return;
            };
            el.set_class_name("weight-box");
            let size = format!("{}px", object_size(obj.weight));
            let left = format!("{}px", object_left(obj));
            set_style(
                &el,
                &[
                    ("width", size.as_str()),
                    ("height", size.as_str()),
                    ("background-color", obj.color().unwrap_or("#888")),
                    ("left", left.as_str()),
                ],
            );
            el.set_text_content(Some(&obj.weight.to_string()));
            let _ = container.append_child(&el);
        }

        fn clear_objects(&mut self) {
            if let Some(container) = self.element("objects-container") {
                container.set_inner_html("");
            }
        }

        fn show_physics(&mut self, result: &PhysicsResult) {
            let text = PhysicsText::from(result);
            if let Some(plank) = self.element("plank") {
                set_style(&plank, &[("transform", text.transform.as_str())]);
            }
            self.set_text("left-weight-display", &text.left_weight);
            self.set_text("right-weight-display", &text.right_weight);
            self.set_text("tilt-angle-display", &text.tilt_angle);
            self.set_text("left-torque", &text.left_torque);
            self.set_text("right-torque", &text.right_torque);
            if let Some(status) = self.element("balance-status") {
                status.set_text_content(Some(text.balance));
                status.set_class_name(text.balance_class);
            }
        }

        fn show_next_weight(&mut self, weight: u8) {
            self.set_text("next-weight-display", &next_weight_label(weight));
        }

        fn log_drop(&mut self, entry: &DropLogEntry) {
            let Some(log_area) = self.element("log-area") else {
                return;
            };
            // Drop the "ready" placeholder on the first entry
            if log_area.query_selector("small").ok().flatten().is_some() {
                log_area.set_inner_html("");
            }
            let Ok(div) = self.document.create_element("div") else {
                return;
            };
            div.set_class_name(if entry.is_heavy() { "log-entry heavy" } else { "log-entry" });
            set_style(&div, &[("padding", "2px 0")]);
            div.set_text_content(Some(&entry.to_string()));
            let _ = log_area.prepend_with_node_1(&div);
        }

        fn clear_log(&mut self) {
            if let Some(log_area) = self.element("log-area") {
                log_area.set_inner_html(LOG_PLACEHOLDER);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Seesaw starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, state will not persist");
                Box::new(MemoryStore::new())
            }
        };
        let settings = Settings::load(&store);

        let seed = clock_seed();
        let renderer = DomRenderer {
            document: document.clone(),
        };
        let session = Session::start(SnapshotStore::new(store), renderer, settings.physics, seed);
        let session = Rc::new(RefCell::new(session));

        log::info!("Session started with seed: {}", seed);

        apply_display_settings(&document, &settings);
        setup_plank(&document, session.clone());
        if settings.show_preview {
            setup_preview(&document, session.clone());
        }
        setup_reset_button(&document, session);

        log::info!("Seesaw running!");
    }

    /// Hide panels the user turned off
    fn apply_display_settings(document: &Document, settings: &Settings) {
        let hidden: &[(&str, bool)] = &[
            ("log-area", !settings.show_log),
            ("left-torque", !settings.show_torque),
            ("right-torque", !settings.show_torque),
            ("balance-status", !settings.show_torque),
            ("preview-ball", !settings.show_preview),
        ];
        for (id, hide) in hidden {
            if *hide {
                if let Some(el) = document.get_element_by_id(id) {
                    set_style(&el, &[("display", "none")]);
                }
            }
        }
    }

    fn setup_plank(document: &Document, session: Rc<RefCell<WebSession>>) {
        let Some(plank) = document.get_element_by_id("plank") else {
            log::error!("No #plank element");
            return;
        };
        let target = plank.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let click_x = f64::from(event.client_x()) - rect.left();
            session.borrow_mut().on_drop(distance_from_click(click_x));
        });
        let _ = plank.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_preview(document: &Document, session: Rc<RefCell<WebSession>>) {
        let Some(area) = document.get_element_by_id("simulation-area") else {
            return;
        };
        let Some(ball) = document.get_element_by_id("preview-ball") else {
            return;
        };

        // Follow the pointer
        {
            let area_ref = area.clone();
            let ball = ball.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = area_ref.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                let preview = session.borrow().preview();
                let size = format!("{}px", preview.size);
                set_style(
                    &ball,
                    &[
                        ("opacity", "0.5"),
                        ("left", format!("{x}px").as_str()),
                        ("top", format!("{y}px").as_str()),
                        ("background-color", preview.color),
                        ("width", size.as_str()),
                        ("height", size.as_str()),
                    ],
                );
                ball.set_text_content(Some(&preview.label()));
            });
            let _ = area.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Hide when the pointer leaves
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_style(&ball, &[("opacity", "0")]);
            });
            let _ = area.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(document: &Document, session: Rc<RefCell<WebSession>>) {
        if let Some(btn) = document.get_element_by_id("reset-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                session.borrow_mut().on_reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use seesaw::persistence::SnapshotStore;
    use seesaw::platform::{FileStore, clock_seed};
    use seesaw::sim::{DropLogEntry, PhysicsResult, PlacedObject};
    use seesaw::view::PhysicsText;
    use seesaw::{Renderer, Session, Settings, distance_from_click};

    const USAGE: &str = "usage: seesaw [--store DIR] [drop <distance> | click <x> | reset | status]...";

    /// Prints updates to stdout
    struct TextRenderer;

    impl Renderer for TextRenderer {
        fn draw_object(&mut self, obj: &PlacedObject) {
            println!("  object {}kg at {:+.1}", obj.weight, obj.distance);
        }

        fn clear_objects(&mut self) {}

        fn show_physics(&mut self, result: &PhysicsResult) {
            let text = PhysicsText::from(result);
            println!(
                "  left {} (torque {}) | right {} (torque {}) | tilt {} | {}",
                text.left_weight,
                text.left_torque,
                text.right_weight,
                text.right_torque,
                text.tilt_angle,
                text.balance
            );
        }

        fn show_next_weight(&mut self, weight: u8) {
            println!("  next weight: {weight} kg");
        }

        fn log_drop(&mut self, entry: &DropLogEntry) {
            println!("{entry}");
        }
    }

    enum Command {
        Drop(f64),
        Reset,
        Status,
    }

    fn parse_number(arg: Option<String>, what: &str) -> Result<f64, String> {
        let arg = arg.ok_or_else(|| format!("missing {what}"))?;
        arg.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid {what}: {arg}"))
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(PathBuf, Vec<Command>), String> {
        let mut dir = PathBuf::from(".seesaw");
        let mut commands = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => dir = args.next().map(PathBuf::from).ok_or("missing store directory")?,
                "drop" => commands.push(Command::Drop(parse_number(args.next(), "distance")?)),
                "click" => {
                    let x = parse_number(args.next(), "click position")?;
                    commands.push(Command::Drop(distance_from_click(x)));
                }
                "reset" => commands.push(Command::Reset),
                "status" => commands.push(Command::Status),
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown command: {other}\n{USAGE}")),
            }
        }
        if commands.is_empty() {
            commands.push(Command::Status);
        }
        Ok((dir, commands))
    }

    pub fn run() -> Result<(), String> {
        let (dir, commands) = parse_args(std::env::args().skip(1))?;

        let store = FileStore::open(&dir).map_err(|e| e.to_string())?;
        log::info!("Using store at {}", store.dir().display());
        let settings = Settings::load(&store);

        println!("restoring from {}", dir.display());
        let mut session = Session::start(
            SnapshotStore::new(store),
            TextRenderer,
            settings.physics,
            clock_seed(),
        );

        for command in commands {
            match command {
                Command::Drop(distance) => {
                    println!("drop {}kg at {distance:+.1}", session.state().next_weight());
                    session.on_drop(distance);
                }
                Command::Reset => {
                    println!("reset");
                    session.on_reset();
                }
                Command::Status => {
                    let text = PhysicsText::from(session.result());
                    println!(
                        "{} objects | left {} | right {} | tilt {} | {} | next {} kg",
                        session.state().objects().len(),
                        text.left_weight,
                        text.right_weight,
                        text.tilt_angle,
                        text.balance,
                        session.state().next_weight()
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Seesaw (native) starting...");

    if let Err(e) = cli::run() {
        eprintln!("{e}");
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
