//! HTTP Handlers

mod audio;
mod forms;
mod ping;
mod websocket;

pub use audio::*;
pub use forms::*;
pub use ping::*;
pub use websocket::*;
