pub mod draw;
pub mod events;

pub use draw::render_app;
pub use events::EventHandler;
