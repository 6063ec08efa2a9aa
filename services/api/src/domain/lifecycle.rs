//! Auction lifecycle rules.
//!
//! `scheduled` is the only initial state; `completed` and `cancelled` are
//! terminal. Terminality is enforced here — the storage layer stays a plain
//! merge and never re-checks these rules.

use chitfund_domain::status::AuctionStatus;

use crate::domain::types::{Auction, AuctionPatch};
use crate::error::{ChitServiceError, FieldError};

/// Validate a patch against the stored auction before it is merged.
///
/// Rejects every update to a terminal auction, completion without both winner
/// fields, and winner fields on any non-completing update.
pub fn check_update(current: &Auction, patch: &AuctionPatch) -> Result<(), ChitServiceError> {
    if current.status.is_terminal() {
        return Err(ChitServiceError::InvalidTransition);
    }

    match patch.status {
        Some(AuctionStatus::Completed) => {
            let mut fields = Vec::new();
            if patch.winner_user_id.is_none() {
                fields.push(FieldError {
                    field: "winner_user_id",
                    message: "required when completing an auction".to_owned(),
                });
            }
            if patch.winning_bid.is_none() {
                fields.push(FieldError {
                    field: "winning_bid",
                    message: "required when completing an auction".to_owned(),
                });
            }
            if !fields.is_empty() {
                return Err(ChitServiceError::Validation(fields));
            }
            Ok(())
        }
        // Staying scheduled or cancelling never carries winner fields.
        Some(AuctionStatus::Scheduled) | Some(AuctionStatus::Cancelled) | None => {
            if patch.winner_user_id.is_some() || patch.winning_bid.is_some() {
                return Err(ChitServiceError::Validation(vec![FieldError {
                    field: "status",
                    message: "winner fields are only accepted when completing an auction"
                        .to_owned(),
                }]));
            }
            Ok(())
        }
    }
}
