//! Action and intent composition for the payments wallet.
//!
//! An intent is one user-level operation — send, receive, remote send —
//! expressed as an ordered, atomic group of low-level on-chain actions.
//! Composition is pure and synchronous: it turns the current bucket state
//! and a requested amount into an [`intents::ActionGroup`] plus the
//! resulting bucket state, enforcing balance invariants before anything
//! touches the network. The only asynchronous pieces are the
//! [`client::TransactionService`] calls and the bounded status poll.

pub mod accounts;
pub mod actions;
pub mod client;
pub mod error;
pub mod intents;
pub mod kin;
pub mod server_parameter;
pub mod tray;

pub use accounts::{AccountCluster, AccountType, GiftCardAccount, SlotType};
pub use actions::{Action, TransferKind, WithdrawKind};
pub use client::{poll_intent_status, submit_intent, IntentStatus, TransactionService};
pub use error::{ClientError, IntentError};
pub use intents::{ActionGroup, Intent, IntentReceive, IntentRemoteSend, IntentTransfer};
pub use kin::Kin;
pub use server_parameter::{NonceConfig, Parameter, ServerParameter};
pub use tray::{Exchange, GreedyLevelling, RebalancePolicy, Tray};
