//! sea-orm entity models for the chitfund service.
//!
//! One module per table. Statuses and roles are stored as snake_case strings;
//! the service's domain layer converts them to typed enums.

pub mod auctions;
pub mod bids;
pub mod chit_group_members;
pub mod chit_groups;
pub mod notifications;
pub mod payments;
pub mod users;
