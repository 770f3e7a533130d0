mod health_check;
mod send_newsletter;

pub use health_check::*;
pub use send_newsletter::*;
