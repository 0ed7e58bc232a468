// import WASM support
use wasm_bindgen::prelude::*;
// the shell with the landing page defaults
use pageshell::config::ShellConfig;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    // init logger
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    console_log::init_with_level(level).unwrap();

    // components and translations are loaded when the document is parsed
    pageshell_dom::start(ShellConfig::default());
}
