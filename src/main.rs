use gtk4::glib;

fn main() -> glib::ExitCode {
    memoria::ui::run()
}
