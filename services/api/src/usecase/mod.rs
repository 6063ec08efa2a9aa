pub mod auction;
pub mod auth;
pub mod chit_group;
pub mod member;
pub mod notification;
pub mod password;
pub mod payment;
pub mod user;
