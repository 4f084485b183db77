// Logging setup and small formatting helpers.

/// Routes `log` to the browser console and panics to `console.error`.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {}

pub fn format_meters(m: f64) -> String {
    if m >= 1000.0 {
        format!("{:.2} km", m / 1000.0)
    } else {
        format!("{:.0} m", m)
    }
}
