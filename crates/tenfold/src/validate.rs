//! Index validation.
//!
//! Each operation declares which label partition classes it permits;
//! the checks here assert that the actual partition of the call is a
//! subset of the permitted one and that repeated labels tag axes of
//! equal length. Violations are programming errors and abort.

use crate::labels::{exclusion, intersection, intersection3, unique, Label};
use crate::view::Extent;

fn check_label_lengths(operands: &[(&[Extent], &[Label])]) {
    let mut idx_len: Vec<(Label, Extent)> = Vec::new();

    for &(len, idx) in operands {
        assert_eq!(
            idx.len(),
            len.len(),
            "index string length {} does not match dimensionality {}",
            idx.len(),
            len.len()
        );
        for (d, &l) in idx.iter().enumerate() {
            idx_len.push((l, len[d]));
        }
    }

    idx_len.sort_unstable();

    for w in idx_len.windows(2) {
        if w[0].0 == w[1].0 {
            assert_eq!(
                w[0].1, w[1].1,
                "index '{}' is bound to lengths {} and {}",
                w[0].0, w[0].1, w[1].1
            );
        }
    }
}

fn check_class(class: &[Label], permitted: bool, name: &str) {
    assert!(
        class.is_empty() || permitted,
        "operation does not permit {name} indices: {class:?}"
    );
}

/// Validate a single-operand call.
pub(crate) fn check_indices_1(len_a: &[Extent], idx_a: &[Label]) {
    check_label_lengths(&[(len_a, idx_a)]);
}

/// Validate a two-operand call against its permitted label partition.
pub(crate) fn check_indices_2(
    len_a: &[Extent],
    idx_a: &[Label],
    len_b: &[Extent],
    idx_b: &[Label],
    has_a_only: bool,
    has_b_only: bool,
    has_ab: bool,
) {
    check_label_lengths(&[(len_a, idx_a), (len_b, idx_b)]);

    let a = unique(idx_a);
    let b = unique(idx_b);

    check_class(&intersection(&a, &b), has_ab, "shared");
    check_class(&exclusion(&a, &[&b]), has_a_only, "A-only");
    check_class(&exclusion(&b, &[&a]), has_b_only, "B-only");
}

/// Validate a three-operand call against its permitted label partition.
#[allow(clippy::too_many_arguments)]
pub(crate) fn check_indices_3(
    len_a: &[Extent],
    idx_a: &[Label],
    len_b: &[Extent],
    idx_b: &[Label],
    len_c: &[Extent],
    idx_c: &[Label],
    has_a_only: bool,
    has_b_only: bool,
    has_c_only: bool,
    has_ab: bool,
    has_ac: bool,
    has_bc: bool,
    has_abc: bool,
) {
    check_label_lengths(&[(len_a, idx_a), (len_b, idx_b), (len_c, idx_c)]);

    let a = unique(idx_a);
    let b = unique(idx_b);
    let c = unique(idx_c);

    let abc = intersection3(&a, &b, &c);
    check_class(&abc, has_abc, "ABC");
    check_class(&exclusion(&intersection(&a, &b), &[&c]), has_ab, "AB");
    check_class(&exclusion(&intersection(&a, &c), &[&b]), has_ac, "AC");
    check_class(&exclusion(&intersection(&b, &c), &[&a]), has_bc, "BC");
    check_class(&exclusion(&a, &[&b, &c]), has_a_only, "A-only");
    check_class(&exclusion(&b, &[&a, &c]), has_b_only, "B-only");
    check_class(&exclusion(&c, &[&a, &b]), has_c_only, "C-only");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_lengths_pass() {
        check_indices_2(&[2, 3], &['i', 'j'], &[3, 2], &['j', 'i'], false, false, true);
    }

    #[test]
    #[should_panic(expected = "bound to lengths")]
    fn test_inconsistent_lengths_abort() {
        check_indices_2(&[2, 3], &['i', 'j'], &[4, 2], &['j', 'i'], false, false, true);
    }

    #[test]
    #[should_panic(expected = "does not match dimensionality")]
    fn test_wrong_index_string_length_aborts() {
        check_indices_1(&[2, 3], &['i']);
    }

    #[test]
    #[should_panic(expected = "bound to lengths")]
    fn test_repeated_label_within_operand() {
        check_indices_1(&[2, 3], &['i', 'i']);
    }

    #[test]
    #[should_panic(expected = "A-only")]
    fn test_disallowed_class_aborts() {
        // Transpose permits only shared labels.
        check_indices_2(&[2, 3], &['i', 'j'], &[3], &['j'], false, false, true);
    }

    #[test]
    fn test_three_operand_partition() {
        // Contraction: AB, AC, BC allowed; nothing else present.
        check_indices_3(
            &[2, 4],
            &['i', 'k'],
            &[4, 3],
            &['k', 'j'],
            &[2, 3],
            &['i', 'j'],
            false,
            false,
            false,
            true,
            true,
            true,
            false,
        );
    }

    #[test]
    #[should_panic(expected = "ABC")]
    fn test_three_operand_abc_disallowed() {
        check_indices_3(
            &[2],
            &['i'],
            &[2],
            &['i'],
            &[2],
            &['i'],
            false,
            false,
            false,
            true,
            true,
            true,
            false,
        );
    }
}
