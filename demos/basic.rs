//! Standalone demo: opens a window with the palette picker.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_palette::{palette_picker, PaletteOptions};

fn main() {
    let selected = RwSignal::new(None::<String>);
    let options = PaletteOptions::default()
        .with_palette([
            ["#fff", "#000", "#888"],
            ["#f00", "#0f0", "#00f"],
            ["#ff0", "#0ff", "#f0f"],
        ])
        .on_change(move || {
            if let Some(color) = selected.get_untracked() {
                println!("selected {color}");
            }
        });

    floem::Application::new()
        .window(
            move |_| {
                palette_picker(selected, options.clone())
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((240.0, 200.0))
                    .title("floem-palette"),
            ),
        )
        .run();
}
