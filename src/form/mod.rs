pub mod draft;
pub mod input;
pub mod session;
pub mod state;

pub use draft::{DraftStore, FileDraftStore};
pub use session::FormSession;
pub use state::{FormState, Progress, SectionProgress};
