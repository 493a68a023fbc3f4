pub mod applier;
pub mod attribute;
pub mod controller;
pub mod session;

pub use applier::RenameApplier;
pub use attribute::{InsertedSpan, attribute};
pub use controller::SessionController;
pub use session::{RenameSession, SessionState, Teardown};
