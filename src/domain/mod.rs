pub mod category;
pub mod channel;

pub use category::{categorize, Category};
pub use channel::Channel;
