pub mod error;
pub mod event;
pub mod state;
pub mod surface;

pub use error::{PrefError, Result};
pub use event::Message;
pub use state::{ControlState, MasterState, Step};
pub use surface::{ActionIcon, PopupView, TabHost, TabId};
