//! Identity and clock capabilities
//!
//! Record ids and timestamps come from here so hosts (and tests) can inject
//! deterministic sources.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Produces unique record identifiers
pub trait IdentityGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// Produces timestamps in integer epoch seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Random UUID v4 ids (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdentityGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Sequential ids with a fixed prefix: `{prefix}1`, `{prefix}2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdentityGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}{}", self.prefix, n)
    }
}

/// Clock that returns a settable instant
#[derive(Debug, Default)]
pub struct FixedClock {
    seconds: AtomicU64,
}

impl FixedClock {
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds: AtomicU64::new(seconds),
        }
    }

    pub fn set(&self, seconds: u64) {
        self.seconds.store(seconds, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: u64) {
        self.seconds.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.seconds.load(Ordering::SeqCst) as i64
    }
}
