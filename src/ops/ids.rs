use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::warn;

use crate::model::config::IdStrategy;
use crate::model::{Task, TaskId};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random base-36 characters appended after the timestamp
const TOKEN_SUFFIX_LEN: usize = 8;

/// Mints task ids that do not collide with the live list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdGenerator {
    Token,
    Counter { next: u64 },
}

impl IdGenerator {
    /// Build a generator for `strategy`. For counters, `stored` is the
    /// persisted next value; it is raised past any numeric id already in
    /// `tasks` so ids are never reused. A counter with no room left falls
    /// back to time tokens.
    pub fn new(strategy: IdStrategy, stored: Option<u64>, tasks: &[Task]) -> Self {
        match strategy {
            IdStrategy::Token => IdGenerator::Token,
            IdStrategy::Counter => {
                let after_max = tasks
                    .iter()
                    .filter_map(|t| t.id.as_number())
                    .max()
                    .map_or(Some(1), |n| n.checked_add(1));
                match after_max {
                    Some(after_max) => IdGenerator::Counter {
                        next: stored.unwrap_or(1).max(after_max),
                    },
                    None => {
                        warn!("numeric ids exhausted, using time tokens");
                        IdGenerator::Token
                    }
                }
            }
        }
    }

    /// The next counter value to persist, if counting
    pub fn counter(&self) -> Option<u64> {
        match self {
            IdGenerator::Token => None,
            IdGenerator::Counter { next } => Some(*next),
        }
    }

    /// Produce an id for which `taken` is false
    pub fn next_id(&mut self, now: DateTime<Utc>, taken: impl Fn(&TaskId) -> bool) -> TaskId {
        loop {
            let id = match self {
                IdGenerator::Token => TaskId::new(time_token(now)),
                IdGenerator::Counter { next } => {
                    let Some(after) = next.checked_add(1) else {
                        warn!(counter = *next, "id counter exhausted, using time tokens");
                        *self = IdGenerator::Token;
                        continue;
                    };
                    let id = TaskId::from(*next);
                    *next = after;
                    id
                }
            };
            if !taken(&id) {
                return id;
            }
        }
    }
}

/// Base-36 milliseconds followed by a random base-36 suffix
fn time_token(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    let mut token = to_base36(millis);
    let mut rng = rand::thread_rng();
    for _ in 0..TOKEN_SUFFIX_LEN {
        token.push(char::from(BASE36[rng.gen_range(0..BASE36.len())]));
    }
    token
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
