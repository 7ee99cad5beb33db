//! # Identifier Minting
//!
//! Every record gets an ID of the form
//!
//! ```text
//! <prefix>_<12 hex digits: millisecond tick><8 hex digits: random>
//! ```
//!
//! The tick is strictly increasing for the lifetime of an [`IdMinter`], so an ID
//! minted later always sorts after one minted earlier. List endpoints page by
//! `id`, which makes the cursor order chronological. The random tail keeps IDs
//! from separate processes sharing one database apart.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Width of the hex-encoded millisecond tick. 12 digits last until year 10889.
const TICK_WIDTH: usize = 12;
// Ids only sort by creation while the tick fits in TICK_WIDTH hex digits
const MAX_TICK: u64 = (1 << (4 * TICK_WIDTH)) - 1;
/// Width of the random tail
const RANDOM_WIDTH: usize = 8;

/// The kinds of records that receive minted IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Transaction,
}

impl EntityKind {
    /// Short tag that starts every ID of this kind
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Transaction => "txn",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "User"),
            EntityKind::Transaction => write!(f, "Transaction"),
        }
    }
}

/// Mints prefixed, time-ordered IDs. One instance is shared by all requests.
#[derive(Debug, Default)]
pub struct IdMinter {
    last_tick: AtomicU64,
}

impl IdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a minter whose first tick is greater than the tick of every
    /// given ID. Used at startup so a clock that moved backwards between runs
    /// cannot mint IDs that sort before stored ones.
    pub fn resume_after<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let last_tick = ids.into_iter().filter_map(parse_tick).max().unwrap_or(0);
        Self {
            last_tick: AtomicU64::new(last_tick),
        }
    }

    /// Mint a fresh ID for `kind`
    pub fn mint(&self, kind: EntityKind) -> String {
        // A clock before 1970 counts as 0; the tick still advances by one
        let now_millis = Utc::now().timestamp_millis().max(0) as u64;
        let tick = self.next_tick(now_millis);
        debug_assert!(tick <= MAX_TICK, "tick {:#x} overflows {} hex digits", tick, TICK_WIDTH);
        let random = Uuid::new_v4().simple().to_string();

        format!(
            "{}_{:0width$x}{}",
            kind.prefix(),
            tick,
            &random[..RANDOM_WIDTH],
            width = TICK_WIDTH
        )
    }

    /// Advance the tick to `now_millis`, or by one if the clock has not moved
    fn next_tick(&self, now_millis: u64) -> u64 {
        let mut last = self.last_tick.load(Ordering::Acquire);
        loop {
            let next = if now_millis > last { now_millis } else { last + 1 };
            match self
                .last_tick
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Extract the millisecond tick from an ID minted by [`IdMinter`].
/// IDs in any other format yield `None`.
pub fn parse_tick(id: &str) -> Option<u64> {
    let (_, suffix) = id.split_once('_')?;
    if suffix.len() != TICK_WIDTH + RANDOM_WIDTH || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(&suffix[..TICK_WIDTH], 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mint_format() {
        let minter = IdMinter::new();

        let user_id = minter.mint(EntityKind::User);
        let txn_id = minter.mint(EntityKind::Transaction);

        assert!(user_id.starts_with("user_"));
        assert!(txn_id.starts_with("txn_"));
        assert_eq!(user_id.len(), "user_".len() + TICK_WIDTH + RANDOM_WIDTH);
        assert!(user_id["user_".len()..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_later_ids_sort_after_earlier_ids() {
        let minter = IdMinter::new();
        let ids: Vec<String> = (0..500).map(|_| minter.mint(EntityKind::User)).collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_ten_thousand_mintings_never_collide() {
        let minter = IdMinter::new();
        let mut seen = HashSet::new();

        for i in 0..10_000 {
            let kind = if i % 2 == 0 { EntityKind::User } else { EntityKind::Transaction };
            let id = minter.mint(kind);
            assert!(seen.insert(id.clone()), "duplicate id minted: {}", id);
        }
    }

    #[test]
    fn test_tick_advances_when_clock_stalls_or_goes_back() {
        let minter = IdMinter::new();

        assert_eq!(minter.next_tick(1_000), 1_000);
        assert_eq!(minter.next_tick(1_000), 1_001);
        assert_eq!(minter.next_tick(500), 1_002);
        assert_eq!(minter.next_tick(2_000), 2_000);
    }

    #[test]
    fn test_resume_after_stored_ids() {
        let far_future = format!("user_{:012x}{}", u64::MAX >> 20, "0a1b2c3d");
        let minter = IdMinter::resume_after([far_future.as_str(), "legacy-id", "txn_zz"]);

        let next = minter.mint(EntityKind::Transaction);
        assert!(parse_tick(&next).unwrap() > parse_tick(&far_future).unwrap());
    }

    #[test]
    fn test_parse_tick() {
        assert_eq!(parse_tick("user_0000000003e8deadbeef"), Some(1_000));
        assert_eq!(parse_tick("user_abc12345"), None);
        assert_eq!(parse_tick("does-not-exist"), None);
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::User.to_string(), "User");
        assert_eq!(EntityKind::Transaction.to_string(), "Transaction");
    }

    #[test]
    fn test_max_tick_is_twelve_hex_digits() {
        assert_eq!(format!("{:x}", MAX_TICK), "ffffffffffff");
        let minter = IdMinter::resume_after(["user_fffffffffffe00000000"]);
        assert_eq!(parse_tick(&minter.mint(EntityKind::User)), Some(MAX_TICK));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "overflows")]
    fn test_tick_past_twelve_hex_digits_is_caught() {
        let minter = IdMinter::resume_after(["user_ffffffffffff00000000"]);
        minter.mint(EntityKind::User);
    }
}
