use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use super::state::{CardFace, Command, Dispatch};
use crate::game::CardId;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 6;

/// Narrowest column count that divides the deck evenly without the grid
/// getting taller than it is wide.
pub fn grid_columns(card_count: usize) -> usize {
    if card_count == 0 {
        return 1;
    }
    let start = (card_count as f64).sqrt().ceil() as usize;
    (start..=card_count)
        .find(|cols| card_count % cols == 0)
        .unwrap_or(card_count)
}

pub fn build_board_grid(
    faces: &Rc<RefCell<Vec<CardFace>>>,
    cols: usize,
    dispatch: Dispatch,
) -> (gtk::Grid, Vec<gtk::Button>) {
    let grid = gtk::Grid::new();
    grid.add_css_class("memoria-board");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let cols = cols.max(1);
    let card_count = faces.borrow().len();
    let mut buttons = Vec::with_capacity(card_count);

    for index in 0..card_count {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["memoria-card"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();
        drawing_area.add_css_class("memoria-card-label");

        let faces_draw = faces.clone();
        drawing_area.set_draw_func(move |area, cr, width, height| {
            let faces = faces_draw.borrow();
            let Some(face) = faces.get(index) else {
                return;
            };
            let text = if face.shown { face.symbol.as_str() } else { "?" };

            let min_dim = width.min(height) as f64;
            let font_size = if face.shown {
                min_dim * 0.40
            } else {
                min_dim * 0.34
            };

            cr.set_antialias(cairo::Antialias::Best);

            let layout = pangocairo::functions::create_layout(cr);
            let mut font_desc = pango::FontDescription::new();
            if face.shown {
                font_desc.set_family("Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans");
            } else {
                font_desc.set_family("Cantarell, Noto Sans, sans");
                font_desc.set_weight(pango::Weight::Bold);
            }
            font_desc.set_size((font_size * pango::SCALE as f64) as i32);
            layout.set_font_description(Some(&font_desc));
            layout.set_text(text);

            #[allow(deprecated)]
            let fg = area.style_context().color();
            cr.set_source_rgba(
                fg.red() as f64,
                fg.green() as f64,
                fg.blue() as f64,
                fg.alpha() as f64,
            );

            let (text_width, text_height) = layout.pixel_size();
            cr.move_to(
                (width as f64 - text_width as f64) / 2.0,
                (height as f64 - text_height as f64) / 2.0,
            );

            pangocairo::functions::show_layout(cr, &layout);
        });

        button.set_child(Some(&drawing_area));

        if faces.borrow().get(index).is_some_and(|face| face.shown) {
            button.add_css_class("revealed");
        }

        let dispatch = dispatch.clone();
        button.connect_clicked(move |_| {
            dispatch(Command::Flip(CardId(index)));
        });

        aspect_frame.set_child(Some(&button));

        let x = (index % cols) as i32;
        let y = (index / cols) as i32;
        grid.attach(&aspect_frame, x, y, 1, 1);
        buttons.push(button);
    }

    (grid, buttons)
}
