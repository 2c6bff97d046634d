pub mod controller;
pub mod history;
pub mod share;
pub mod state;
pub mod view;

pub use controller::{Controller, Feedback, Intent};
pub use history::History;
pub use share::{Clipboard, SharePayload, ShareTarget};
pub use state::{Session, Snapshot};
pub use view::{render, Body, Screen};
