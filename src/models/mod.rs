pub mod task;
pub mod user;

pub use task::{list_order, parse_due_date, Task, TaskPayload, TaskPriority};
pub use user::{normalize_email, ChangePasswordRequest, ProfileUpdateRequest, User};
