pub mod config;
pub mod market;
pub mod task;
pub mod ui;
pub mod user;

pub use config::*;
pub use market::*;
pub use task::*;
pub use ui::*;
pub use user::*;
