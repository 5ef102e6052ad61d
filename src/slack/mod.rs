mod guard;
mod helpers;
mod server;
mod state;

pub use guard::validate;
pub use server::*;
pub use state::*;
