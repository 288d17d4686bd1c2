//! Business logic for reelvote.
//!
//! Services own the domain rules and compose the repositories from
//! `reelvote-db`:
//!
//! - [`VoteService`]: the vote transition engine
//! - [`MovieService`]: bulk movie lookup
//! - [`UserService`]: registration and profile assembly

pub mod services;

pub use services::movie::MovieService;
pub use services::user::{UserProfile, UserService};
pub use services::vote::{VoteDirection, VoteService, VoteTransition};
