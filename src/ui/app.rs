use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;

use adw::prelude::*;

use super::board::CONTENT_MARGIN;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::build_hud;
use super::logging;
use super::scheduler::GlibScheduler;
use super::state::{Command, Dispatch, GtkView, Widgets};
use crate::game::{GameConfig, GameSession, TaskId};

const APP_ID: &str = "io.memoria.Memoria";

type Session = GameSession<GtkView, GlibScheduler>;

const STYLE: &str = "
.memoria-card {
    padding: 0;
    border-radius: 12px;
    background-color: alpha(@accent_bg_color, 0.85);
    color: @accent_fg_color;
    transition: background-color 200ms ease-out;
}
.memoria-card.revealed {
    background-color: @card_bg_color;
    color: @card_fg_color;
}
.memoria-card.matched {
    background-color: alpha(@success_bg_color, 0.35);
}
.memoria-card.errored {
    background-color: alpha(@error_bg_color, 0.35);
}
.memoria-hud {
    margin-bottom: 6px;
}
.memoria-hud-item {
    font-weight: bold;
}
.memoria-welcome-button {
    min-width: 164px;
    min-height: 40px;
}
";

pub fn run() -> glib::ExitCode {
    logging::init();
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let config = load_config();
        let session = match GameSession::from_config(&config, GtkView::new(), GlibScheduler::new()) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("config rejected, using built-in levels: {err}");
                GameSession::new(GtkView::new(), GlibScheduler::new())
            }
        };
        let level_count = session.level_count();
        let session = Rc::new(RefCell::new(session));

        let dispatch = make_dispatch(Rc::downgrade(&session));
        let weak = Rc::downgrade(&session);
        session
            .borrow_mut()
            .scheduler_mut()
            .set_handler(Rc::new(move |id: TaskId| {
                let Some(session) = weak.upgrade() else {
                    return;
                };
                match session.try_borrow_mut() {
                    Ok(mut session) => session.fire(id),
                    Err(_) => log::warn!("task {:?} fired while the session was busy", id),
                };
            }));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);
        app.set_accels_for_action("app.quit", &["<Control>q"]);

        let title = gtk::Label::new(None);
        title.set_markup("<b>Memoria</b>");

        let header = adw::HeaderBar::builder().title_widget(&title).build();
        header.add_css_class("flat");

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("Restart"));
        restart_button.set_visible(false);
        restart_button.connect_clicked({
            let dispatch = dispatch.clone();
            move |_| dispatch(Command::Restart)
        });

        let level_menu_button = build_level_menu(level_count, &dispatch);
        level_menu_button.set_visible(false);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("How to Play"), Some("app.instructions"));
        menu_model.append(Some("About Memoria"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        header.pack_start(&level_menu_button);
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_transition_duration(300);
        view_stack.add_named(&build_welcome_view(&dispatch), Some("welcome"));

        let (hud, level_label, moves_label, timer_label) = build_hud();
        let board_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
        board_container.set_hexpand(true);
        board_container.set_vexpand(true);

        let game_view = gtk::Box::new(gtk::Orientation::Vertical, 6);
        game_view.set_margin_top(CONTENT_MARGIN);
        game_view.set_margin_bottom(CONTENT_MARGIN);
        game_view.set_margin_start(CONTENT_MARGIN);
        game_view.set_margin_end(CONTENT_MARGIN);
        game_view.append(&hud);
        game_view.append(&board_container);
        view_stack.add_named(&game_view, Some("game"));
        view_stack.set_visible_child_name("welcome");

        let toolbar = adw::ToolbarView::new();
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title("Memoria")
            .icon_name(APP_ID)
            .default_width(720)
            .default_height(680)
            .content(&toolbar)
            .build();
        window.set_size_request(360, 480);

        session.borrow_mut().view_mut().attach(
            Widgets {
                window: window.clone(),
                view_stack,
                board_container,
                level_label,
                moves_label,
                timer_label,
                level_menu_button,
                restart_button,
            },
            dispatch,
        );

        // Widgets and timeouts only hold weak handles; the window owns the session.
        window.connect_destroy(move |_| {
            if let Ok(session) = session.try_borrow() {
                log::debug!("window closed in {:?}", session.phase());
            }
        });

        window.present();
    });

    app.run()
}

fn make_dispatch(weak: Weak<RefCell<Session>>) -> Dispatch {
    Rc::new(move |command: Command| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        let Ok(mut session) = session.try_borrow_mut() else {
            log::warn!("dropped {:?}: session busy", command);
            return;
        };
        log::debug!("command {:?}", command);
        match command {
            Command::Start { relax } => session.start_game(relax),
            Command::Flip(id) => session.flip_card(id),
            Command::Restart => session.restart_game(),
            Command::Advance => {
                session.advance_level();
            }
            Command::SelectLevel(index) => {
                if let Err(err) = session.select_level(index) {
                    log::warn!("level jump refused: {err}");
                }
            }
        }
    })
}

fn build_welcome_view(dispatch: &Dispatch) -> gtk::Box {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 13);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_hexpand(true);
    content.set_vexpand(true);

    let title = gtk::Label::new(Some("Memoria"));
    title.add_css_class("title-1");
    let subtitle = gtk::Label::new(Some("Find every pair."));
    subtitle.add_css_class("dim-label");
    content.append(&title);
    content.append(&subtitle);

    for (label, relax) in [("Normal", false), ("Relax", true)] {
        let button = gtk::Button::with_label(label);
        button.add_css_class("memoria-welcome-button");
        button.add_css_class("pill");
        if !relax {
            button.add_css_class("suggested-action");
        }
        let dispatch = dispatch.clone();
        button.connect_clicked(move |_| dispatch(Command::Start { relax }));
        content.append(&button);
    }

    content
}

fn build_level_menu(level_count: usize, dispatch: &Dispatch) -> gtk::MenuButton {
    let list = gtk::Box::new(gtk::Orientation::Vertical, 2);
    for index in 0..level_count {
        let button = gtk::Button::with_label(&format!("Level {}", index + 1));
        button.add_css_class("flat");
        let dispatch = dispatch.clone();
        button.connect_clicked(move |_| dispatch(Command::SelectLevel(index)));
        list.append(&button);
    }
    let popover = gtk::Popover::new();
    popover.set_child(Some(&list));

    let button = gtk::MenuButton::builder()
        .label("Levels")
        .popover(&popover)
        .build();
    button.set_tooltip_text(Some("Jump to level"));
    button
}

fn config_path() -> PathBuf {
    glib::user_config_dir().join("memoria").join("config.json")
}

fn load_config() -> GameConfig {
    let path = config_path();
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return GameConfig::default();
    }
    match GameConfig::load(&path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config
        }
        Err(err) => {
            log::warn!("could not read {}: {err}", path.display());
            GameConfig::default()
        }
    }
}

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
