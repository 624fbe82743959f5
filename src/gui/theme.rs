use crate::prefs::Theme;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors for the cairo-drawn progress fills, resolved per theme.
pub struct ThemeColors {
    pub progress_track: Srgba<f64>,
    pub progress_fill: Srgba<f64>,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                progress_track: Srgba::new(0.0, 0.0, 0.0, 0.08),
                progress_fill: Srgba::new(0.16, 0.44, 0.82, 0.95),
            },
            Theme::Dark => Self {
                progress_track: Srgba::new(1.0, 1.0, 1.0, 0.10),
                progress_fill: Srgba::new(0.38, 0.62, 0.94, 0.95),
            },
        }
    }
}

/// Swaps the two mutually exclusive theme classes on the window.
pub fn apply(window: &impl IsA<gtk::Widget>, theme: Theme) {
    let window = window.as_ref();
    window.remove_css_class(theme.opposite_class());
    window.add_css_class(theme.css_class());
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

const CSS: &str = "
window.theme-light {
    background-color: #f7f5f2;
    color: #22211f;
}
window.theme-dark {
    background-color: #18191c;
    color: #e8e6e3;
}

.hero-title { font-size: 28pt; font-weight: 800; }
.hero-tagline { font-size: 13pt; opacity: 0.75; }
.section-title { font-size: 18pt; font-weight: 700; }

.project-card {
    border-radius: 12px;
    padding: 12px;
    background-color: alpha(currentColor, 0.04);
}
.project-card.card-active {
    background-color: alpha(currentColor, 0.08);
}
.card-title { font-weight: 700; }

.carousel-dot, .image-dot {
    min-width: 10px;
    min-height: 10px;
    border-radius: 9999px;
    padding: 0;
    background-color: alpha(currentColor, 0.25);
}
.carousel-dot.active, .image-dot.active {
    background-color: alpha(currentColor, 0.85);
}
.gallery-nav {
    margin: 6px;
    border-radius: 9999px;
    opacity: 0.8;
}

.filter-btn { border-radius: 9999px; padding: 4px 14px; }
.filter-btn.active {
    background-color: alpha(currentColor, 0.15);
    font-weight: 700;
}
.tech-card {
    border-radius: 10px;
    padding: 10px;
    background-color: alpha(currentColor, 0.05);
}

.back-to-top {
    margin: 18px;
    border-radius: 9999px;
    padding: 10px;
}

/* Two-phase reveal: the hidden state carries no transition so it commits
   instantly; the visible variants re-enable it at three speeds. */
.reveal-hidden {
    opacity: 0;
    margin-top: 24px;
}
.reveal-visible {
    opacity: 1;
    margin-top: 0px;
    transition: opacity 700ms ease-out, margin-top 700ms ease-out;
}
.reveal-visible-medium {
    opacity: 1;
    margin-top: 0px;
    transition: opacity 400ms ease-out, margin-top 400ms ease-out;
}
.reveal-visible-fast {
    opacity: 1;
    margin-top: 0px;
    transition: opacity 250ms ease-out, margin-top 250ms ease-out;
}
";
