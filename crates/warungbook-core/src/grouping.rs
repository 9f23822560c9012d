//! Group-by-key then fold, shared by every report builder

use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Group items by `key` and fold each group into an accumulator
///
/// Groups come back ordered by key. An accumulator starts from its
/// `Default` value the first time its key is seen.
pub fn group_fold<T, K, A, FK, FA>(items: impl IntoIterator<Item = T>, key: FK, mut fold: FA) -> BTreeMap<K, A>
where
    K: Ord,
    A: Default,
    FK: Fn(&T) -> K,
    FA: FnMut(&mut A, T),
{
    let mut groups = BTreeMap::new();
    for item in items {
        let group = groups.entry(key(&item)).or_insert_with(A::default);
        fold(group, item);
    }
    groups
}

/// Division that yields zero for a zero denominator
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100`, zero when `whole` is zero
pub fn percent(part: Decimal, whole: Decimal) -> Decimal {
    safe_div(part, whole) * Decimal::ONE_HUNDRED
}
