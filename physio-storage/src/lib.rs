//! Physio Storage - SQLite persistence for Physio Desk
//!
//! Implements the core's `ProtocolStore` and `AccountStore` contracts on a
//! single SQLite file, plus the operations the core never performs itself:
//! registration, credential checks, administrative provisioning and
//! catalog management.
//!
//! ```text
//! ┌──────────────┐   ProtocolStore / AccountStore   ┌──────────────────┐
//! │ physio-core  │ ◄──────────────────────────────── │    PhysioDb      │
//! └──────────────┘                                   │  (Mutex<Conn>)   │
//!                                                    └────────┬─────────┘
//!                                                             ▼
//!                                              accounts · protocols · admin_audit
//! ```

pub mod db;
pub mod error;
pub mod password;
pub mod seed;

pub use db::{AuditEntry, PhysioDb, SYSTEM_ACTOR};
pub use error::StorageError;
