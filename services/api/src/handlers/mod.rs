pub mod auction;
pub mod auth;
pub mod chit_group;
pub mod notification;
pub mod payment;
pub mod user;
