use gtk4::glib;

static GLIB_LOGGER: glib::GlibLogger = glib::GlibLogger::new(
    glib::GlibLoggerFormat::Plain,
    glib::GlibLoggerDomain::CrateTarget,
);

pub fn debug_mode_enabled() -> bool {
    match std::env::var("MEMORIA_DEBUG") {
        Ok(value) => {
            let v = value.trim().to_ascii_lowercase();
            matches!(v.as_str(), "1" | "true" | "yes" | "on")
        }
        Err(_) => false,
    }
}

/// Routes `log` records into the GLib log. Debug output also needs
/// `G_MESSAGES_DEBUG=memoria` to show up on the console.
pub fn init() {
    if log::set_logger(&GLIB_LOGGER).is_err() {
        return;
    }
    let level = if debug_mode_enabled() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    log::set_max_level(level);
}
