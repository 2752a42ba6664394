pub mod namegen;
mod registry;
mod workspace;

pub use registry::{validate_session_name, ResolvedSession, SessionInfo, SessionRegistry};
pub use workspace::Workspace;
