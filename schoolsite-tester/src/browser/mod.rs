pub mod probe;
pub mod session;

pub use probe::{PageProbe, PageState};
pub use session::{BrowserConfig, BrowserKind, new_session};
