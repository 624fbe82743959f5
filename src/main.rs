use relm4::prelude::*;
use vitrine::config;
use vitrine::gui::app::AppModel;
use vitrine::prefs;
use vitrine::sys::runtime;

fn main() {
    env_logger::init();

    let content = config::load_or_setup();
    let theme = prefs::load_theme();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone());

    let app = RelmApp::new("org.atelier.vitrine");

    app.run::<AppModel>((content, theme, rx));
}
