//! Concrete games implementing [`Game`](crate::rules::Game).

pub mod connect;
