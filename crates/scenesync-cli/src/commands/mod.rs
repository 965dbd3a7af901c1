pub mod common;
pub mod config;
pub mod desktop;
pub mod discovered;
pub mod volume;

pub use common::RunOptions;
pub use config::Config;
pub use desktop::Desktop;
pub use discovered::Discovered;
pub use volume::Volume;
