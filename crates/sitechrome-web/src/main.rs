//! WASM entry point for pages served as static HTML

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = sitechrome_web::start() {
        leptos::logging::error!("Failed to start page chrome: {:#}", e);
    }
}
