use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::carousel::{CARDS_PER_PAGE, CarouselView, Pager};
use crate::gui::reveal::{
    DeviceClass, GALLERY_THRESHOLD, GateEvent, OneShot, RevealSequence, SECTION_THRESHOLD,
    ViewGate, WidgetReveal, bounds_within, visible_fraction,
};
use crate::gui::scroll;
use crate::gui::skills::{SkillsView, TechFilter};
use crate::gui::theme;
use crate::prefs::{self, Theme};
use crate::util::Debouncer;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// A one-shot reveal target: when the anchor first crosses the visibility
/// threshold, its children play the staggered reveal and the tracker is
/// spent.
struct SectionReveal {
    anchor: gtk::Widget,
    children: Vec<gtk::Widget>,
    tracker: OneShot,
}

/// Repeatable viewport gate for one card's image gallery.
struct GalleryGate {
    card: usize,
    gate: ViewGate,
}

pub struct AppModel {
    content: Config,
    theme: Theme,
    /// Shared with the cairo draw closures so a toggle repaints correctly.
    theme_cell: Rc<Cell<Theme>>,
    filter: TechFilter,
    pager: Pager,
    carousel: Option<CarouselView>,
    skills: Option<SkillsView>,
    sections: Vec<SectionReveal>,
    gallery_gates: Vec<GalleryGate>,
    window: gtk::ApplicationWindow,
    scrolled: gtk::ScrolledWindow,
    content_box: gtk::Box,
    back_to_top: gtk::Button,
    nav_toggle: gtk::ToggleButton,
    nav_revealer: gtk::Revealer,
}

#[derive(Debug)]
pub enum AppMsg {
    PrevPage,
    NextPage,
    GoToPage(usize),
    ThemeToggled(bool),
    FilterChanged(TechFilter),
    Scrolled,
    ScrollToTop,
    NavToggled(bool),
    CloseNav,
    NavTo(usize),
    ContentReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ContentReload => AppMsg::ContentReload,
        }
    }
}

fn handle_key(
    sender: &ComponentSender<AppModel>,
    key: gdk::Key,
    state: gdk::ModifierType,
) -> glib::Propagation {
    if key == gdk::Key::Left {
        sender.input(AppMsg::PrevPage);
        glib::Propagation::Proceed
    } else if key == gdk::Key::Right {
        sender.input(AppMsg::NextPage);
        glib::Propagation::Proceed
    } else if key == gdk::Key::Home
        || (key == gdk::Key::Up && state.contains(gdk::ModifierType::CONTROL_MASK))
    {
        sender.input(AppMsg::ScrollToTop);
        glib::Propagation::Stop
    } else {
        glib::Propagation::Proceed
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Theme, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Vitrine"),
            set_default_size: (1100, 780),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, state| {
                    handle_key(&sender, key, state)
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "nav_revealer"]
                gtk::Revealer {
                    set_transition_type: gtk::RevealerTransitionType::SlideDown,
                    set_reveal_child: false,
                },

                #[name = "overlay"]
                gtk::Overlay {
                    set_vexpand: true,

                    #[name = "scrolled"]
                    gtk::ScrolledWindow {
                        set_hscrollbar_policy: gtk::PolicyType::Never,
                        set_vexpand: true,

                        add_controller = gtk::GestureClick {
                            connect_pressed[sender] => move |_, _, _, _| {
                                sender.input(AppMsg::CloseNav);
                            }
                        },

                        #[name = "content_box"]
                        gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_spacing: 56,
                            set_margin_top: 32,
                            set_margin_bottom: 48,
                            set_margin_start: 40,
                            set_margin_end: 40,
                        }
                    },

                    #[name = "back_to_top"]
                    add_overlay = &gtk::Button {
                        set_icon_name: "go-up-symbolic",
                        add_css_class: "back-to-top",
                        set_halign: gtk::Align::End,
                        set_valign: gtk::Align::End,
                        set_visible: false,
                        // The button also activates on Enter/Space while
                        // focused, which GTK wires natively.
                        set_tooltip_text: Some("Back to top"),
                        connect_clicked[sender] => move |_| {
                            sender.input(AppMsg::ScrollToTop);
                        }
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (content, theme, rx) = init;

        theme::load_css();
        theme::apply(&root, theme);

        let model = AppModel {
            content,
            theme,
            theme_cell: Rc::new(Cell::new(theme)),
            filter: TechFilter::All,
            pager: Pager::new(0, CARDS_PER_PAGE),
            carousel: None,
            skills: None,
            sections: Vec::new(),
            gallery_gates: Vec::new(),
            window: root.clone(),
            scrolled: gtk::ScrolledWindow::default(),
            content_box: gtk::Box::default(),
            back_to_top: gtk::Button::default(),
            nav_toggle: gtk::ToggleButton::default(),
            nav_revealer: gtk::Revealer::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.scrolled = widgets.scrolled.clone();
        model.content_box = widgets.content_box.clone();
        model.back_to_top = widgets.back_to_top.clone();
        model.nav_revealer = widgets.nav_revealer.clone();

        let header = gtk::HeaderBar::new();

        let nav_toggle = gtk::ToggleButton::new();
        nav_toggle.set_icon_name("open-menu-symbolic");
        nav_toggle.set_tooltip_text(Some("Menu"));
        {
            let sender = sender.clone();
            nav_toggle.connect_toggled(move |toggle| {
                sender.input(AppMsg::NavToggled(toggle.is_active()));
            });
        }
        header.pack_start(&nav_toggle);
        model.nav_toggle = nav_toggle;

        let theme_switch = gtk::Switch::new();
        theme_switch.set_valign(gtk::Align::Center);
        theme_switch.set_active(theme.is_dark());
        theme_switch.set_tooltip_text(Some("Dark theme"));
        {
            let sender = sender.clone();
            theme_switch.connect_state_set(move |_, active| {
                sender.input(AppMsg::ThemeToggled(active));
                glib::Propagation::Proceed
            });
        }
        header.pack_end(&theme_switch);
        root.set_titlebar(Some(&header));

        // Coalesce adjustment chatter into one viewport pass per burst.
        // Both scrolling (value) and resizing (page size, upper) feed it;
        // a resize can move elements into view without any scrolling.
        let debouncer = Rc::new(Debouncer::new(Duration::from_millis(50)));
        let adjustment = model.scrolled.vadjustment();
        {
            let sender = sender.clone();
            let debouncer = Rc::clone(&debouncer);
            adjustment.connect_value_changed(move |_| {
                let sender = sender.clone();
                debouncer.call(move || sender.input(AppMsg::Scrolled));
            });
        }
        {
            let sender = sender.clone();
            adjustment.connect_changed(move |_| {
                let sender = sender.clone();
                debouncer.call(move || sender.input(AppMsg::Scrolled));
            });
        }

        {
            let sender = sender.clone();
            relm4::spawn(async move {
                while let Ok(event) = rx.recv().await {
                    sender.input(AppMsg::from(event));
                }
            });
        }

        model.rebuild(&sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PrevPage => {
                if self.carousel.is_some() && self.pager.prev() {
                    self.apply_page();
                }
            }
            AppMsg::NextPage => {
                if self.carousel.is_some() && self.pager.next() {
                    self.apply_page();
                }
            }
            AppMsg::GoToPage(page) => {
                if self.carousel.is_some() && self.pager.go_to(page) {
                    self.apply_page();
                }
            }
            AppMsg::ThemeToggled(active) => {
                let theme = Theme::from_switch(active);
                self.theme = theme;
                self.theme_cell.set(theme);
                theme::apply(&self.window, theme);
                prefs::save_theme(theme);
                if let Some(skills) = &self.skills {
                    skills.redraw_progress();
                }
            }
            AppMsg::FilterChanged(filter) => {
                self.filter = filter.clone();
                if let Some(skills) = &self.skills {
                    skills.apply_filter(&filter, self.device());
                }
            }
            AppMsg::Scrolled => self.refresh_viewport(),
            AppMsg::ScrollToTop => scroll::animate_to_top(&self.scrolled),
            AppMsg::NavToggled(open) => self.nav_revealer.set_reveal_child(open),
            AppMsg::CloseNav => self.nav_toggle.set_active(false),
            AppMsg::NavTo(section) => {
                if let Some(target) = self.sections.get(section)
                    && let Some(bounds) =
                        bounds_within(&target.anchor, self.content_box.upcast_ref())
                {
                    scroll::scroll_to(&self.scrolled, bounds.top - 12.0);
                }
                self.nav_toggle.set_active(false);
            }
            AppMsg::ContentReload => match config::load_config() {
                Ok(content) => {
                    self.content = content;
                    self.rebuild(&sender);
                    log::info!("Portfolio content reloaded");
                }
                Err(e) => log::error!("Failed to reload portfolio content: {}", e),
            },
        }
    }
}

impl AppModel {
    fn device(&self) -> DeviceClass {
        let width = self.window.width();
        DeviceClass::from_width(if width > 0 { width } else { 1100 })
    }

    /// One carousel render pass, then a viewport pass because the page
    /// change moved cards in and out of view.
    fn apply_page(&mut self) {
        if let Some(carousel) = &self.carousel {
            carousel.apply(&self.pager.plan(), self.device());
        }
        self.refresh_viewport();
    }

    fn refresh_viewport(&mut self) {
        let adjustment = self.scrolled.vadjustment();
        let offset = adjustment.value();
        let viewport = adjustment.page_size();
        let device = self.device();
        let content: gtk::Widget = self.content_box.clone().upcast();

        self.back_to_top
            .set_visible(scroll::back_to_top_visible(offset));

        for section in &mut self.sections {
            if section.tracker.spent() {
                continue;
            }
            let Some(bounds) = bounds_within(&section.anchor, &content) else {
                continue;
            };
            if section
                .tracker
                .observe(visible_fraction(bounds, offset, viewport))
            {
                let count = section.children.len();
                let mut surface = WidgetReveal::new(section.children.clone());
                RevealSequence::section(device).play(&mut surface, count);
            }
        }

        if let Some(carousel) = &self.carousel {
            for gate in &mut self.gallery_gates {
                let Some(card) = carousel.card_widget(gate.card) else {
                    continue;
                };
                let fraction = match bounds_within(card, &content) {
                    Some(bounds) if card.is_visible() => {
                        visible_fraction(bounds, offset, viewport)
                    }
                    _ => 0.0,
                };
                if let Some(event) = gate.gate.observe(fraction)
                    && let Some(gallery) = carousel.gallery_for(gate.card)
                {
                    gallery.set_in_view(event == GateEvent::Entered);
                }
            }
        }

        if let Some(skills) = &mut self.skills {
            skills.observe_progress(&content, offset, viewport);
        }
    }

    /// Tears down and rebuilds the whole content tree from `self.content`.
    /// Runs once at startup and again on every live content reload.
    fn rebuild(&mut self, sender: &ComponentSender<Self>) {
        while let Some(child) = self.content_box.first_child() {
            self.content_box.remove(&child);
        }
        self.sections.clear();
        self.gallery_gates.clear();
        self.carousel = None;
        self.skills = None;
        self.filter = TechFilter::All;
        self.pager = Pager::new(self.content.projects.len(), CARDS_PER_PAGE);

        let mut nav_targets: Vec<(String, usize)> = Vec::new();

        let hero = gtk::Box::new(gtk::Orientation::Vertical, 8);
        let hero_title = gtk::Label::new(Some(&self.content.owner));
        hero_title.add_css_class("hero-title");
        hero_title.set_halign(gtk::Align::Start);
        hero.append(&hero_title);
        let hero_tagline = gtk::Label::new(Some(&self.content.tagline));
        hero_tagline.add_css_class("hero-tagline");
        hero_tagline.set_halign(gtk::Align::Start);
        hero.append(&hero_tagline);
        self.content_box.append(&hero);
        self.push_section(
            hero.upcast(),
            vec![hero_title.upcast(), hero_tagline.upcast()],
        );

        if !self.content.about.is_empty() {
            let (section, title) = titled_section("About");
            let body = gtk::Label::new(Some(&self.content.about));
            body.set_wrap(true);
            body.set_halign(gtk::Align::Start);
            body.set_xalign(0.0);
            section.append(&body);
            self.content_box.append(&section);
            nav_targets.push(("About".to_string(), self.sections.len()));
            self.push_section(section.upcast(), vec![title, body.upcast()]);
        }

        if !self.content.projects.is_empty() {
            let (section, title) = titled_section("Projects");
            let carousel = CarouselView::new(&self.content.projects, self.pager.page_count(), sender);
            section.append(carousel.widget());
            self.content_box.append(&section);
            nav_targets.push(("Projects".to_string(), self.sections.len()));

            self.gallery_gates = carousel
                .galleries()
                .iter()
                .map(|(card, _)| GalleryGate {
                    card: *card,
                    gate: ViewGate::new(GALLERY_THRESHOLD),
                })
                .collect();
            self.carousel = Some(carousel);
            // Cards cascade with the pager, not with scrolling; only the
            // heading is a one-shot target here.
            self.push_section(section.upcast(), vec![title]);
        }

        if !self.content.skills.is_empty() || !self.content.technologies.is_empty() {
            let (section, title) = titled_section("Skills");
            let skills = SkillsView::new(
                &self.content.skills,
                &self.content.technologies,
                &self.content.categories(),
                &self.theme_cell,
                sender,
            );
            section.append(skills.widget());
            self.content_box.append(&section);
            nav_targets.push(("Skills".to_string(), self.sections.len()));
            let block = skills.widget().clone().upcast::<gtk::Widget>();
            self.skills = Some(skills);
            self.push_section(section.upcast(), vec![title, block]);
        }

        let nav = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        nav.add_css_class("nav-menu");
        nav.set_margin_top(8);
        nav.set_margin_bottom(8);
        nav.set_halign(gtk::Align::Center);
        for (label, index) in nav_targets {
            let button = gtk::Button::with_label(&label);
            button.add_css_class("flat");
            let sender = sender.clone();
            button.connect_clicked(move |_| sender.input(AppMsg::NavTo(index)));
            nav.append(&button);
        }
        self.nav_revealer.set_child(Some(&nav));

        self.apply_page();

        // First visibility pass once the new tree has a layout.
        let sender = sender.clone();
        glib::idle_add_local_once(move || sender.input(AppMsg::Scrolled));
    }

    fn push_section(&mut self, anchor: gtk::Widget, children: Vec<gtk::Widget>) {
        let mut surface = WidgetReveal::new(children.clone());
        surface.hide_all();
        self.sections.push(SectionReveal {
            anchor,
            children,
            tracker: OneShot::new(SECTION_THRESHOLD),
        });
    }
}

fn titled_section(title: &str) -> (gtk::Box, gtk::Widget) {
    let section = gtk::Box::new(gtk::Orientation::Vertical, 16);
    let label = gtk::Label::new(Some(title));
    label.add_css_class("section-title");
    label.set_halign(gtk::Align::Start);
    section.append(&label);
    (section, label.upcast())
}
