use super::model::{AutoplayAction, Gallery};
use super::{AUTO_SLIDE_INTERVAL, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::util::TimerSlot;
use gdk_pixbuf::Pixbuf;
use glib::SourceId;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Shared by every controller closure of one gallery: the model, the timer
/// slot, and the widgets the current image is projected onto.
#[derive(Clone)]
struct Autoplay {
    model: Rc<RefCell<Gallery>>,
    timer: Rc<RefCell<TimerSlot<SourceId>>>,
    stack: gtk::Stack,
    dots: Rc<Vec<gtk::Button>>,
}

impl Autoplay {
    fn apply_current(&self) {
        let current = self.model.borrow().current();
        self.stack.set_visible_child_name(&current.to_string());
        for (i, dot) in self.dots.iter().enumerate() {
            if i == current {
                dot.add_css_class("active");
            } else {
                dot.remove_css_class("active");
            }
        }
    }

    fn show(&self, index: i64) {
        self.model.borrow_mut().show(index);
        self.apply_current();
    }

    /// Always cancels the previous timer first; two concurrent advance
    /// timers for one gallery is the exact leak this guards against.
    fn start(&self) {
        self.stop();
        if !self.model.borrow().should_autoplay() {
            return;
        }
        let this = self.clone();
        let id = glib::timeout_add_local(AUTO_SLIDE_INTERVAL, move || {
            if this.model.borrow().should_autoplay() {
                this.model.borrow_mut().next();
                this.apply_current();
            }
            glib::ControlFlow::Continue
        });
        if let Some(stale) = self.timer.borrow_mut().arm(id) {
            stale.remove();
        }
    }

    fn stop(&self) {
        if let Some(id) = self.timer.borrow_mut().disarm() {
            id.remove();
        }
    }

    fn dispatch(&self, action: AutoplayAction) {
        match action {
            AutoplayAction::Start => self.start(),
            AutoplayAction::Stop => self.stop(),
            AutoplayAction::None => {}
        }
    }
}

/// The image gallery inside one project card. Only exists for cards with
/// two or more images.
pub struct GalleryView {
    root: gtk::Overlay,
    autoplay: Autoplay,
}

impl GalleryView {
    pub fn new(images: &[PathBuf]) -> Option<Self> {
        let model = Gallery::new(images.len())?;

        let stack = gtk::Stack::new();
        stack.set_transition_type(gtk::StackTransitionType::Crossfade);
        stack.add_css_class("gallery");
        stack.set_size_request(IMAGE_WIDTH, IMAGE_HEIGHT);

        for (i, path) in images.iter().enumerate() {
            stack.add_named(&picture_for(path), Some(&i.to_string()));
        }

        let dots: Vec<gtk::Button> = (0..images.len())
            .map(|i| {
                let dot = gtk::Button::new();
                dot.add_css_class("image-dot");
                dot.set_tooltip_text(Some(&format!("Image {}", i + 1)));
                if i == 0 {
                    dot.add_css_class("active");
                }
                dot
            })
            .collect();

        let autoplay = Autoplay {
            model: Rc::new(RefCell::new(model)),
            timer: Rc::new(RefCell::new(TimerSlot::default())),
            stack: stack.clone(),
            dots: Rc::new(dots),
        };

        let root = gtk::Overlay::new();
        root.add_css_class("gallery-frame");
        root.set_child(Some(&stack));

        let prev = gtk::Button::from_icon_name("go-previous-symbolic");
        prev.add_css_class("gallery-nav");
        prev.set_halign(gtk::Align::Start);
        prev.set_valign(gtk::Align::Center);
        let ap = autoplay.clone();
        prev.connect_clicked(move |_| {
            let current = ap.model.borrow().current() as i64;
            ap.show(current - 1);
        });
        root.add_overlay(&prev);

        let next = gtk::Button::from_icon_name("go-next-symbolic");
        next.add_css_class("gallery-nav");
        next.set_halign(gtk::Align::End);
        next.set_valign(gtk::Align::Center);
        let ap = autoplay.clone();
        next.connect_clicked(move |_| {
            let current = ap.model.borrow().current() as i64;
            ap.show(current + 1);
        });
        root.add_overlay(&next);

        let dot_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        dot_row.set_halign(gtk::Align::Center);
        dot_row.set_valign(gtk::Align::End);
        dot_row.set_margin_bottom(8);
        for (i, dot) in autoplay.dots.iter().enumerate() {
            let ap = autoplay.clone();
            dot.connect_clicked(move |_| ap.show(i as i64));
            dot_row.append(dot);
        }
        root.add_overlay(&dot_row);

        let motion = gtk::EventControllerMotion::new();
        let ap = autoplay.clone();
        motion.connect_enter(move |_, _, _| {
            let action = ap.model.borrow_mut().pointer_entered();
            ap.dispatch(action);
        });
        let ap = autoplay.clone();
        motion.connect_leave(move |_| {
            let action = ap.model.borrow_mut().pointer_left();
            ap.dispatch(action);
        });
        root.add_controller(motion);

        Some(Self { root, autoplay })
    }

    pub fn widget(&self) -> &gtk::Overlay {
        &self.root
    }

    /// Fed from the owning card's viewport gate on scroll changes.
    pub fn set_in_view(&self, in_view: bool) {
        let action = self.autoplay.model.borrow_mut().viewport_changed(in_view);
        self.autoplay.dispatch(action);
    }
}

impl Drop for GalleryView {
    fn drop(&mut self) {
        self.autoplay.stop();
    }
}

/// Single-image display for cards that do not qualify for a gallery.
pub fn static_picture(path: &Path) -> gtk::Widget {
    let picture = picture_for(path);
    picture.set_size_request(IMAGE_WIDTH, IMAGE_HEIGHT);
    picture
}

/// Missing image files degrade to a placeholder; the gallery itself still
/// works off the configured image count.
fn picture_for(path: &Path) -> gtk::Widget {
    match Pixbuf::from_file_at_scale(path, IMAGE_WIDTH, IMAGE_HEIGHT, true) {
        Ok(pixbuf) => {
            let texture = gdk4::Texture::for_pixbuf(&pixbuf);
            gtk::Picture::for_paintable(&texture).upcast()
        }
        Err(e) => {
            log::warn!("Failed to load image {:?}: {}", path, e);
            let fallback = gtk::Image::from_icon_name("image-missing-symbolic");
            fallback.set_pixel_size(64);
            fallback.upcast()
        }
    }
}
