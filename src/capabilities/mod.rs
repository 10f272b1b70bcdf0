//! Capabilities the core asks its shell for.
//!
//! Only two are needed: HTTP for the directory and geocoding queries, and
//! Crux's built-in Render capability to tell the shell the view changed.

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
