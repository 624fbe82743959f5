#[derive(Debug, Clone)]
pub enum AppEvent {
    ContentReload,
}
