//! Index label algebra.
//!
//! Labels follow the Einstein convention: one character per axis, with
//! repeats (within or across operands) tying axes together. The helpers
//! here compute the sorted label sets the validator and folder partition
//! operations by.

/// A single einsum index label.
pub type Label = char;

pub(crate) fn to_labels(idx: &str) -> Vec<Label> {
    idx.chars().collect()
}

/// Sorted, deduplicated labels.
pub(crate) fn unique(idx: &[Label]) -> Vec<Label> {
    let mut v = idx.to_vec();
    v.sort_unstable();
    v.dedup();
    v
}

/// Labels of `a` that also appear in `b`, sorted and deduplicated.
pub(crate) fn intersection(a: &[Label], b: &[Label]) -> Vec<Label> {
    let mut v = unique(a);
    v.retain(|l| b.contains(l));
    v
}

/// Labels of `a` that appear in both `b` and `c`, sorted and deduplicated.
pub(crate) fn intersection3(a: &[Label], b: &[Label], c: &[Label]) -> Vec<Label> {
    let mut v = unique(a);
    v.retain(|l| b.contains(l) && c.contains(l));
    v
}

/// Labels of `a` that appear in none of `others`, sorted and deduplicated.
pub(crate) fn exclusion(a: &[Label], others: &[&[Label]]) -> Vec<Label> {
    let mut v = unique(a);
    v.retain(|l| !others.iter().any(|o| o.contains(l)));
    v
}

/// Position of `label` within `idx`, if present.
pub(crate) fn position(idx: &[Label], label: Label) -> Option<usize> {
    idx.iter().position(|&l| l == label)
}

/// For each label in `select`, the value at that label's position in `idx`.
///
/// Requires every selected label to occur in `idx`; repeated labels take
/// their first occurrence.
pub(crate) fn select_from(values: &[i64], idx: &[Label], select: &[Label]) -> Vec<i64> {
    select
        .iter()
        .map(|&l| values[position(idx, l).expect("selected label not present")])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_sorts_and_dedups() {
        assert_eq!(unique(&['b', 'a', 'b', 'c']), vec!['a', 'b', 'c']);
        assert_eq!(unique(&[]), Vec::<Label>::new());
    }

    #[test]
    fn test_intersection_exclusion() {
        let a = ['i', 'j', 'k'];
        let b = ['k', 'l', 'j'];
        assert_eq!(intersection(&a, &b), vec!['j', 'k']);
        assert_eq!(exclusion(&a, &[&b]), vec!['i']);
        assert_eq!(exclusion(&b, &[&a]), vec!['l']);
    }

    #[test]
    fn test_intersection3() {
        let a = ['i', 'j', 'k'];
        let b = ['j', 'k', 'l'];
        let c = ['k', 'm', 'j'];
        assert_eq!(intersection3(&a, &b, &c), vec!['j', 'k']);
    }

    #[test]
    fn test_select_from() {
        let idx = ['i', 'j', 'k'];
        let len = [2, 3, 4];
        assert_eq!(select_from(&len, &idx, &['k', 'i']), vec![4, 2]);
        assert_eq!(select_from(&len, &idx, &[]), Vec::<i64>::new());
    }
}
