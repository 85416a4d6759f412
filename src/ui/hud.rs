use gtk4 as gtk;
use gtk4::prelude::*;

pub(super) fn level_text(index: usize) -> String {
    format!("Level {:02}", index + 1)
}

pub(super) fn moves_text(count: u32, max: u32) -> String {
    format!("Moves {:02} / {:02}", count, max)
}

pub(super) fn clock_text(minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}", minutes, seconds)
}

/// Strip above the board: level, moves and clock.
pub(super) fn build_hud() -> (gtk::Box, gtk::Label, gtk::Label, gtk::Label) {
    let hud = gtk::Box::new(gtk::Orientation::Horizontal, 18);
    hud.set_halign(gtk::Align::Center);
    hud.add_css_class("memoria-hud");

    let level_label = gtk::Label::new(Some(&level_text(0)));
    let moves_label = gtk::Label::new(Some(&moves_text(0, 0)));
    let timer_label = gtk::Label::new(Some(&clock_text(0, 0)));
    for label in [&level_label, &moves_label, &timer_label] {
        label.add_css_class("memoria-hud-item");
        label.add_css_class("numeric");
        hud.append(label);
    }
    timer_label.add_css_class("memoria-clock");

    (hud, level_label, moves_label, timer_label)
}
