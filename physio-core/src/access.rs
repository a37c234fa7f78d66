//! Trial and subscription access decisions.
//!
//! Access is granted while the 30-day trial window is open, while an
//! administrator-set subscription extension is in the future, or
//! unconditionally for administrator accounts. The decision is a pure
//! function of `(account, now)`.

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::types::Account;

/// Length of the free trial that starts at account creation.
pub const TRIAL_PERIOD_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Days of access left, as shown to the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysRemaining {
    /// Administrator accounts never expire
    Unlimited,
    /// Whole days left; zero once access has lapsed
    Days(u32),
}

impl fmt::Display for DaysRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysRemaining::Unlimited => write!(f, "unlimited"),
            DaysRemaining::Days(days) => write!(f, "{}", days),
        }
    }
}

impl Serialize for DaysRemaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaysRemaining::Unlimited => serializer.serialize_str("unlimited"),
            DaysRemaining::Days(days) => serializer.serialize_u32(*days),
        }
    }
}

/// Which grant an access decision rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessBasis {
    Admin,
    Trial,
    Subscription,
    Expired,
}

/// Result of evaluating an account at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub granted: bool,
    pub days_remaining: DaysRemaining,
    pub basis: AccessBasis,
}

/// Stateless trial/subscription evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessDecisionEngine;

impl AccessDecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `account` may use the lookup tool at `now`.
    pub fn evaluate(&self, account: &Account, now: DateTime<Utc>) -> AccessDecision {
        if account.is_admin {
            return AccessDecision {
                granted: true,
                days_remaining: DaysRemaining::Unlimited,
                basis: AccessBasis::Admin,
            };
        }

        let elapsed_days = elapsed_whole_days(account.created_at, now);
        let trial_days_left = TRIAL_PERIOD_DAYS - elapsed_days;
        let trial_open = trial_days_left > 0;

        let paid_until = account.subscription_end.filter(|end| *end > now);

        match (trial_open, paid_until) {
            (true, _) => AccessDecision {
                granted: true,
                days_remaining: DaysRemaining::Days(clamp_days(trial_days_left)),
                basis: AccessBasis::Trial,
            },
            (false, Some(end)) => AccessDecision {
                granted: true,
                days_remaining: DaysRemaining::Days(clamp_days(days_until(now, end))),
                basis: AccessBasis::Subscription,
            },
            (false, None) => AccessDecision {
                granted: false,
                days_remaining: DaysRemaining::Days(0),
                basis: AccessBasis::Expired,
            },
        }
    }
}

/// Whole days between creation and `now`, floored; negative spans count as zero.
fn elapsed_whole_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = now.signed_duration_since(created_at);
    if elapsed < Duration::zero() {
        return 0;
    }
    elapsed.num_seconds() / SECONDS_PER_DAY
}

/// Days until `end`, rounded up so that an active extension never shows zero.
fn days_until(now: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = end.signed_duration_since(now).num_seconds().max(0);
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

fn clamp_days(days: i64) -> u32 {
    days.clamp(0, i64::from(u32::MAX)) as u32
}
