mod submission;
pub use submission::{Decision, FormData, RoleTag, Status, Submission};

mod store;
pub use store::SubmissionStore;

mod outcome;
pub use outcome::{IgnoreReason, Outcome};

mod context;
pub use context::InteractionContext;

mod application_tracker;
pub use application_tracker::{ApplicationTracker, ROLE_GRANT_MIN_AGE};
