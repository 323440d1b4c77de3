pub mod path_id;
pub mod session;
pub mod validated_json;

pub use path_id::{ChildId, PathId};
pub use session::Session;
pub use validated_json::ValidatedJson;
