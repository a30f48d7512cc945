// rulekeeper-core/src/domain/view/mod.rs
//
// Interaction state for the lists and dialogs of the console. Pure data,
// no I/O: the application layer drives these and talks to the backend.

pub mod dialog;
pub mod expansion;
pub mod selection;

pub use dialog::{ConfirmedDelete, DeleteIntent, EditDialog, GenerateDialog};
pub use expansion::Expansion;
pub use selection::Selection;
