use super::model::PagePlan;
use crate::config::Project;
use crate::gui::app::{AppModel, AppMsg};
use crate::gui::gallery::GalleryView;
use crate::gui::reveal::{DeviceClass, RevealSequence, WidgetReveal};
use crate::util::TimerSlot;
use glib::SourceId;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::ComponentSender;
use std::cell::RefCell;
use std::rc::Rc;

/// The paginated project carousel: one row of cards, indicator dots, and
/// prev/next buttons, all synchronized from a `PagePlan`.
pub struct CarouselView {
    root: gtk::Box,
    cards: Vec<gtk::Widget>,
    /// One pending "card-active" stagger timeout per card.
    stagger_timers: Vec<Rc<RefCell<TimerSlot<SourceId>>>>,
    galleries: Vec<(usize, GalleryView)>,
    dots: Vec<gtk::Button>,
    prev_btn: gtk::Button,
    next_btn: gtk::Button,
}

impl CarouselView {
    pub fn new(
        projects: &[Project],
        page_count: usize,
        sender: &ComponentSender<AppModel>,
    ) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 16);
        root.add_css_class("carousel");

        let card_row = gtk::Box::new(gtk::Orientation::Horizontal, 24);
        card_row.set_homogeneous(true);
        card_row.add_css_class("project-container");

        let mut cards = Vec::new();
        let mut galleries = Vec::new();
        for (index, project) in projects.iter().enumerate() {
            let (card, gallery) = build_card(project);
            card_row.append(&card);
            cards.push(card);
            if let Some(gallery) = gallery {
                galleries.push((index, gallery));
            }
        }
        root.append(&card_row);

        let nav = gtk::Box::new(gtk::Orientation::Horizontal, 16);
        nav.set_halign(gtk::Align::Center);

        let prev_btn = gtk::Button::from_icon_name("go-previous-symbolic");
        prev_btn.add_css_class("carousel-nav");
        {
            let sender = sender.clone();
            prev_btn.connect_clicked(move |_| sender.input(AppMsg::PrevPage));
        }
        nav.append(&prev_btn);

        let dot_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        dot_row.set_valign(gtk::Align::Center);
        let dots: Vec<gtk::Button> = (0..page_count)
            .map(|page| {
                let dot = gtk::Button::new();
                dot.add_css_class("carousel-dot");
                dot.set_tooltip_text(Some(&format!("Go to page {}", page + 1)));
                if page == 0 {
                    dot.add_css_class("active");
                }
                let sender = sender.clone();
                dot.connect_clicked(move |_| sender.input(AppMsg::GoToPage(page)));
                dot_row.append(&dot);
                dot
            })
            .collect();
        nav.append(&dot_row);

        let next_btn = gtk::Button::from_icon_name("go-next-symbolic");
        next_btn.add_css_class("carousel-nav");
        {
            let sender = sender.clone();
            next_btn.connect_clicked(move |_| sender.input(AppMsg::NextPage));
        }
        nav.append(&next_btn);

        root.append(&nav);

        let stagger_timers = cards
            .iter()
            .map(|_| Rc::new(RefCell::new(TimerSlot::default())))
            .collect();

        Self {
            root,
            cards,
            stagger_timers,
            galleries,
            dots,
            prev_btn,
            next_btn,
        }
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.root
    }

    pub fn card_widget(&self, index: usize) -> Option<&gtk::Widget> {
        self.cards.get(index)
    }

    pub fn galleries(&self) -> &[(usize, GalleryView)] {
        &self.galleries
    }

    pub fn gallery_for(&self, card: usize) -> Option<&GalleryView> {
        self.galleries
            .iter()
            .find(|(index, _)| *index == card)
            .map(|(_, gallery)| gallery)
    }

    /// One render pass, in plan order: card visibility and staggered active
    /// marking, then indicator and button state, then the deferred reveal of
    /// the freshly shown cards.
    pub fn apply(&self, plan: &PagePlan, device: DeviceClass) {
        for (index, card) in self.cards.iter().enumerate() {
            // A stale stagger from a rapid earlier render would mark a
            // now-hidden card active; cancel it before anything else.
            let timer = &self.stagger_timers[index];
            if let Some(pending) = timer.borrow_mut().disarm() {
                pending.remove();
            }
            card.remove_css_class("card-active");
            let slot = plan.visible.iter().find(|s| s.index == index).copied();
            card.set_visible(slot.is_some());
            if let Some(slot) = slot {
                let card = card.clone();
                let fired = Rc::clone(timer);
                let id = glib::timeout_add_local_once(slot.stagger, move || {
                    fired.borrow_mut().disarm();
                    card.add_css_class("card-active");
                });
                if let Some(stale) = timer.borrow_mut().arm(id) {
                    stale.remove();
                }
            }
        }

        for (page, dot) in self.dots.iter().enumerate() {
            if page == plan.active_dot {
                dot.add_css_class("active");
            } else {
                dot.remove_css_class("active");
            }
        }
        self.prev_btn.set_sensitive(plan.prev_enabled);
        self.next_btn.set_sensitive(plan.next_enabled);

        // Re-shown cards carry no transition history; replay the cascade.
        let shown: Vec<gtk::Widget> = plan
            .visible
            .iter()
            .filter_map(|slot| self.cards.get(slot.index).cloned())
            .collect();
        let count = shown.len();
        let mut surface = WidgetReveal::new(shown);
        RevealSequence::cards(device).play(&mut surface, count);
    }
}

fn build_card(project: &Project) -> (gtk::Widget, Option<GalleryView>) {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 10);
    card.add_css_class("project-card");

    let gallery = GalleryView::new(&project.images);
    match &gallery {
        Some(view) => card.append(view.widget()),
        // 0 or 1 image: static display, no gallery behavior at all.
        None => {
            if let Some(path) = project.images.first() {
                card.append(&crate::gui::gallery::view::static_picture(path));
            }
        }
    }

    let title = gtk::Label::new(Some(&project.title));
    title.add_css_class("card-title");
    title.set_halign(gtk::Align::Start);
    card.append(&title);

    let summary = gtk::Label::new(Some(&project.summary));
    summary.set_wrap(true);
    summary.set_halign(gtk::Align::Start);
    summary.set_xalign(0.0);
    card.append(&summary);

    if let Some(link) = &project.link {
        let button = gtk::LinkButton::with_label(link, "Visit");
        button.set_halign(gtk::Align::Start);
        card.append(&button);
    }

    (card.upcast(), gallery)
}
