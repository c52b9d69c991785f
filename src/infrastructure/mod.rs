pub mod dto;
pub mod http;
pub mod render_scheduler;
pub mod services;

pub use http::NwsHttpClient;
pub use render_scheduler::{AnimationFrameRequester, FrameRequester, QueuedFrameRequester, RenderScheduler};
pub use services::{BrowserTimeProvider, ConsoleLogger};
