pub mod reconciler;
pub mod recorder;
pub mod server;
