pub mod app;
pub mod carousel;
pub mod gallery;
pub mod reveal;
pub mod scroll;
pub mod skills;
pub mod theme;
