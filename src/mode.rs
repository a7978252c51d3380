//! Mode finding over a sequence, using `ChainingMap` as a frequency counter.

use crate::chaining::ChainingMap;
use crate::hash::sum_hash;

/// The most frequent values of a sequence and how often they occur.
///
/// `values` follows the counter map's key order (slot, then chain
/// position), not the order of first appearance in the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mode {
    pub values: Vec<String>,
    pub frequency: usize,
}

pub fn find_mode<S>(input: &[S]) -> Mode
where
    S: AsRef<str>,
{
    let capacity = (input.len() / 3).max(1);
    let mut counts: ChainingMap<usize> = match ChainingMap::new(capacity, sum_hash) {
        Ok(m) => m,
        Err(_) => return Mode::default(),
    };

    for item in input {
        let key = item.as_ref();
        let seen = counts.get(key).copied().unwrap_or(0);
        counts.put(key, seen + 1);
    }

    let mut mode = Mode::default();
    for (key, &count) in counts.iter() {
        if count > mode.frequency {
            mode.values.clear();
            mode.values.push(key.to_owned());
            mode.frequency = count;
        } else if count == mode.frequency {
            mode.values.push(key.to_owned());
        }
    }
    mode
}
