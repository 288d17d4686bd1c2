//! Database repositories.

mod movie;
mod user;
mod vote;

pub use movie::MovieRepository;
pub use user::UserRepository;
pub use vote::VoteRepository;
