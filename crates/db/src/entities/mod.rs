//! Database entities.

#![allow(missing_docs)]

pub mod dislike;
pub mod like;
pub mod movie;
pub mod user;

pub use dislike::Entity as Dislike;
pub use like::Entity as Like;
pub use movie::Entity as Movie;
pub use user::Entity as User;
