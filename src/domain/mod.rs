pub mod flag;
pub mod step;
pub mod tool;

pub use flag::{forwarded_flags, Flag};
pub use step::Step;
pub use tool::Tool;
