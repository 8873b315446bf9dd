mod controller;
mod state;

pub use controller::WorkflowController;
pub use state::{
    apply_event, EventContext, Page, WorkflowError, WorkflowErrorKind, WorkflowEvent,
    WorkflowState,
};
