use super::model::{ProgressAnimation, TechFilter, filter_plan};
use crate::config::{Category, Skill, Technology};
use crate::gui::app::{AppModel, AppMsg};
use crate::gui::reveal::{
    DeviceClass, OneShot, PROGRESS_THRESHOLD, RevealSequence, WidgetReveal, bounds_within,
    visible_fraction,
};
use crate::gui::theme::ThemeColors;
use crate::prefs::Theme;
use cairo::Context;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::ComponentSender;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

const BAR_HEIGHT: i32 = 10;

/// One skill progress bar: a cairo-drawn fill whose width animates to the
/// configured level the first time the row crosses the visibility
/// threshold.
pub struct ProgressRow {
    row: gtk::Widget,
    area: gtk::DrawingArea,
    fraction: Rc<Cell<f64>>,
    animation: ProgressAnimation,
    tracker: OneShot,
}

impl ProgressRow {
    fn new(skill: &Skill, theme: &Rc<Cell<Theme>>) -> Self {
        let row = gtk::Box::new(gtk::Orientation::Vertical, 6);
        row.add_css_class("skill-row");

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        let name = gtk::Label::new(Some(&skill.name));
        name.set_halign(gtk::Align::Start);
        name.set_hexpand(true);
        header.append(&name);
        let level = gtk::Label::new(Some(&format!("{}%", skill.level.min(100))));
        level.add_css_class("dim-label");
        header.append(&level);
        row.append(&header);

        let area = gtk::DrawingArea::new();
        area.set_content_height(BAR_HEIGHT);
        area.set_hexpand(true);
        area.add_css_class("progress-track");

        let fraction = Rc::new(Cell::new(0.0_f64));
        let draw_fraction = Rc::clone(&fraction);
        let draw_theme = Rc::clone(theme);
        area.set_draw_func(move |_, cr, width, height| {
            let colors = ThemeColors::for_theme(draw_theme.get());
            if let Err(e) = draw_bar(cr, width, height, draw_fraction.get(), &colors) {
                log::error!("Progress bar drawing error: {}", e);
            }
        });
        row.append(&area);

        Self {
            row: row.upcast(),
            area,
            fraction,
            animation: ProgressAnimation::new(skill.level),
            tracker: OneShot::new(PROGRESS_THRESHOLD),
        }
    }

    pub fn widget(&self) -> &gtk::Widget {
        &self.row
    }

    /// Starts the one-shot fill animation once the visible fraction first
    /// reaches the threshold.
    pub fn observe(&mut self, fraction_visible: f64) {
        if !self.tracker.observe(fraction_visible) {
            return;
        }
        let begun = Instant::now();
        let animation = self.animation;
        let value = Rc::clone(&self.fraction);
        self.area.add_tick_callback(move |area, _| {
            let elapsed = begun.elapsed();
            value.set(animation.fraction_at(elapsed));
            area.queue_draw();
            if animation.finished(elapsed) {
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }
}

fn draw_bar(
    cr: &Context,
    width: i32,
    height: i32,
    fraction: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (w, h) = (width as f64, height as f64);
    let radius = h / 2.0;

    let (r, g, b, a) = colors.progress_track.into_components();
    cr.set_source_rgba(r, g, b, a);
    rounded_bar(cr, w, h, radius);
    cr.fill()?;

    let fill_width = w * fraction;
    if fill_width > radius * 2.0 {
        let (r, g, b, a) = colors.progress_fill.into_components();
        cr.set_source_rgba(r, g, b, a);
        rounded_bar(cr, fill_width, h, radius);
        cr.fill()?;
    }
    Ok(())
}

fn rounded_bar(cr: &Context, width: f64, height: f64, radius: f64) {
    use std::f64::consts::PI;
    cr.new_sub_path();
    cr.arc(width - radius, radius, radius, -PI / 2.0, PI / 2.0);
    cr.arc(radius, height - radius, radius, PI / 2.0, 3.0 * PI / 2.0);
    cr.close_path();
}

struct TechCard {
    category: Category,
    wrapper: gtk::Widget,
    card: gtk::Widget,
}

/// Skills section: animated progress bars plus the filterable technology
/// grid.
pub struct SkillsView {
    root: gtk::Box,
    filter_buttons: Vec<(TechFilter, gtk::Button)>,
    tech_cards: Vec<TechCard>,
    progress: Vec<ProgressRow>,
}

impl SkillsView {
    pub fn new(
        skills: &[Skill],
        technologies: &[Technology],
        categories: &[Category],
        theme: &Rc<Cell<Theme>>,
        sender: &ComponentSender<AppModel>,
    ) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 32);
        root.add_css_class("skills-section");

        let progress: Vec<ProgressRow> = if skills.is_empty() {
            Vec::new()
        } else {
            let block = gtk::Box::new(gtk::Orientation::Vertical, 16);
            let rows: Vec<ProgressRow> = skills
                .iter()
                .map(|skill| {
                    let row = ProgressRow::new(skill, theme);
                    block.append(row.widget());
                    row
                })
                .collect();
            root.append(&block);
            rows
        };

        let mut filter_buttons = Vec::new();
        let mut tech_cards = Vec::new();

        if !technologies.is_empty() {
            let filter_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            filter_row.add_css_class("filter-row");

            let filters = std::iter::once(TechFilter::All).chain(
                categories
                    .iter()
                    .cloned()
                    .map(TechFilter::Category),
            );
            for filter in filters {
                let button = gtk::Button::with_label(&filter.label());
                button.add_css_class("filter-btn");
                if filter == TechFilter::All {
                    button.add_css_class("active");
                }
                let msg_filter = filter.clone();
                let sender = sender.clone();
                button.connect_clicked(move |_| {
                    sender.input(AppMsg::FilterChanged(msg_filter.clone()));
                });
                filter_row.append(&button);
                filter_buttons.push((filter, button));
            }
            root.append(&filter_row);

            let grid = gtk::FlowBox::new();
            grid.set_selection_mode(gtk::SelectionMode::None);
            grid.set_max_children_per_line(4);
            grid.set_row_spacing(12);
            grid.set_column_spacing(12);
            grid.set_homogeneous(true);

            for tech in technologies {
                let card = gtk::Box::new(gtk::Orientation::Vertical, 4);
                card.add_css_class("tech-card");
                let name = gtk::Label::new(Some(&tech.name));
                card.append(&name);
                let tag = gtk::Label::new(Some(tech.category.as_str()));
                tag.add_css_class("dim-label");
                card.append(&tag);

                grid.insert(&card, -1);
                // FlowBox wraps each child; visibility toggles go on the
                // wrapper, reveal classes on the card itself.
                let wrapper = card
                    .parent()
                    .map(|p| p.upcast::<gtk::Widget>())
                    .unwrap_or_else(|| card.clone().upcast());
                tech_cards.push(TechCard {
                    category: tech.category.clone(),
                    wrapper,
                    card: card.upcast(),
                });
            }
            root.append(&grid);
        }

        Self {
            root,
            filter_buttons,
            tech_cards,
            progress,
        }
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.root
    }

    /// Applies a filter: one active control, matching cards shown, the rest
    /// hidden, and the visible cards replaying the short staggered fade.
    pub fn apply_filter(&self, filter: &TechFilter, device: DeviceClass) {
        for (candidate, button) in &self.filter_buttons {
            if candidate == filter {
                button.add_css_class("active");
            } else {
                button.remove_css_class("active");
            }
        }

        let categories: Vec<Category> = self
            .tech_cards
            .iter()
            .map(|c| c.category.clone())
            .collect();
        let plan = filter_plan(filter, &categories);

        let mut shown = Vec::new();
        for (card, visible) in self.tech_cards.iter().zip(plan) {
            card.wrapper.set_visible(visible);
            if visible {
                shown.push(card.card.clone());
            }
        }

        // Freshly displayed cards have no transition history; replay the
        // full hidden -> visible sequence.
        let count = shown.len();
        let mut surface = WidgetReveal::new(shown);
        RevealSequence::filter(device).play(&mut surface, count);
    }

    /// Feeds scroll geometry to the one-shot progress trackers.
    pub fn observe_progress(&mut self, content: &gtk::Widget, offset: f64, viewport_height: f64) {
        for row in &mut self.progress {
            if let Some(bounds) = bounds_within(row.widget(), content) {
                row.observe(visible_fraction(bounds, offset, viewport_height));
            }
        }
    }

    /// Theme changes repaint the cairo fills.
    pub fn redraw_progress(&self) {
        for row in &self.progress {
            row.area.queue_draw();
        }
    }
}
