use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use missive_editor::MissiveApp;

fn main() {
    dioxus::logger::init(Level::DEBUG).expect("failed to init logger");
    dioxus::launch(App);
}

fn App() -> Element {
    rsx! {
        style {
            "{{
                body, html {{
                    margin: 0;
                    padding: 0;
                    height: 100%;
                    width: 100%;
                }}
            }}"
        }
        MissiveApp {}
    }
}
