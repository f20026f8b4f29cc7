//! Library side of the guichet CLI: form definitions, submit backends and
//! terminal output helpers. The binary (`src/main.rs`) only orchestrates.

pub mod backend;
pub mod forms;
pub mod output;

pub use backend::{
    ensure_server_or_spawn, spawn_serve, wait_for_server, BackendError, LocalBackend,
    RemoteBackend, SubmitBackend,
};
pub use forms::{FieldDef, FormDef, FormsError, FormsFile};
pub use output::print_outcome;
