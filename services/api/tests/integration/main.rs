mod helpers;

mod auction_test;
mod credential_test;
mod membership_test;
mod partition_test;
mod payment_test;
mod scenario_test;
