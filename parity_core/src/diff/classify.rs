//! Classification of a key's values across profiles into a [`DiffType`].

use std::collections::HashSet;

use super::DiffType;

/// How an even two-way split (one profile true, the other false) reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TwoWaySplit {
    /// Permission flags: the baseline is having the permission, so the odd
    /// one out is the profile lacking it.
    Removed,
    /// Membership (classes, pages, apps...): the baseline is absence, so the
    /// odd one out is the profile granting it.
    Added,
}

/// Classify boolean values, one per profile.
///
/// * all equal: unchanged
/// * two profiles, one of each: decided by `split`
/// * exactly one true among three or more: added
/// * anything else: changed
pub(crate) fn classify_bools<I>(values: I, split: TwoWaySplit) -> DiffType
where
    I: IntoIterator<Item = bool>,
{
    let (trues, falses) = values.into_iter().fold((0usize, 0usize), |(t, f), v| {
        if v {
            (t + 1, f)
        } else {
            (t, f + 1)
        }
    });

    if trues == 0 || falses == 0 {
        return DiffType::Unchanged;
    }

    match (trues, falses) {
        (1, 1) => match split {
            TwoWaySplit::Removed => DiffType::Removed,
            TwoWaySplit::Added => DiffType::Added,
        },
        (1, _) => DiffType::Added,
        _ => DiffType::Changed,
    }
}

/// Classify string values, one per profile. Strings only ever change.
pub(crate) fn classify_strings<'a, I>(values: I) -> DiffType
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: HashSet<&str> = values.into_iter().collect();
    if distinct.len() <= 1 {
        DiffType::Unchanged
    } else {
        DiffType::Changed
    }
}
