pub mod chat;
pub mod record;
pub mod summary;
pub mod view;

pub use chat::*;
pub use record::*;
pub use summary::*;
pub use view::*;
