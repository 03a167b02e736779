//! Properties of the normalization pipeline: diagonal equivalence, fold
//! idempotence, and fold offset equivalence, over randomized layouts.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tenfold::{
    are_compatible, diagonal, fold, fold_pair, tensor_storage_size, transpose, TensorView,
    TensorViewMut,
};

/// Random layout: packed strides laid down in a random axis order, with
/// occasional padding between axes.
fn random_layout(rng: &mut StdRng, ndim: usize) -> (Vec<i64>, Vec<i64>) {
    let len: Vec<i64> = (0..ndim).map(|_| rng.random_range(1..5)).collect();
    let mut order: Vec<usize> = (0..ndim).collect();
    order.shuffle(rng);

    let mut stride = vec![0i64; ndim];
    let mut s = 1i64;
    for &ax in &order {
        stride[ax] = s;
        s *= len[ax] + rng.random_range(0..2);
    }
    (len, stride)
}

fn random_data(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.sample(StandardNormal)).collect()
}

fn for_each_coord(len: &[i64], mut f: impl FnMut(&[i64])) {
    let total: i64 = len.iter().product();
    let mut coord = vec![0i64; len.len()];
    for _ in 0..total {
        f(&coord);
        for d in 0..len.len() {
            coord[d] += 1;
            if coord[d] < len[d] {
                break;
            }
            coord[d] = 0;
        }
    }
}

/// P1: every element of the diagonalized view equals the element of the
/// original view at the coordinates obtained by equating all axes that
/// share a label.
#[test]
fn test_diagonal_element_equivalence() {
    let mut rng = StdRng::seed_from_u64(7);

    let cases: &[(&str, &[i64])] = &[
        ("ii", &[3, 3]),
        ("iji", &[3, 4, 3]),
        ("ijj", &[2, 3, 3]),
        ("ij", &[1, 5]),
        ("iijj", &[2, 2, 3, 3]),
        ("i", &[4]),
    ];

    for &(idx, len) in cases {
        // Strides in a random packed order over the given lengths.
        let mut order: Vec<usize> = (0..len.len()).collect();
        order.shuffle(&mut rng);
        let mut stride = vec![0i64; len.len()];
        let mut s = 1i64;
        for &ax in &order {
            stride[ax] = s;
            s *= len[ax];
        }

        let data = random_data(&mut rng, tensor_storage_size(len, Some(&stride)));
        let v = TensorView::from_slice(&data, len, &stride).unwrap();
        let labels: Vec<char> = idx.chars().collect();

        let (d, didx) = diagonal(v.clone(), idx);
        let dlabels: Vec<char> = didx.chars().collect();

        for_each_coord(d.lengths(), |y| {
            let x: Vec<i64> = labels
                .iter()
                .enumerate()
                .map(|(i, lab)| {
                    if len[i] == 1 {
                        0
                    } else {
                        let j = dlabels.iter().position(|l| l == lab).unwrap();
                        y[j]
                    }
                })
                .collect();
            assert_eq!(d.get(y), v.get(&x));
        });
    }
}

/// P2: folding is idempotent.
#[test]
fn test_fold_idempotent_random() {
    let mut rng = StdRng::seed_from_u64(11);
    let labels = ['i', 'j', 'k', 'l'];

    for _ in 0..50 {
        let ndim = rng.random_range(0..5);
        let (len, stride) = random_layout(&mut rng, ndim);
        let idx: String = labels[..ndim].iter().collect();

        let data = random_data(&mut rng, tensor_storage_size(&len, Some(&stride)));
        let v = TensorView::from_slice(&data, &len, &stride).unwrap();

        let (f1, idx1) = fold(v, &idx);
        let (f2, idx2) = fold(f1.clone(), &idx1);
        assert_eq!(f1.lengths(), f2.lengths());
        assert_eq!(f1.strides(), f2.strides());
        assert_eq!(idx1, idx2);
    }
}

/// P3: the folded descriptors address exactly the offsets of the
/// unfolded ones, for both operands of a joint fold.
#[test]
fn test_fold_pair_offset_equivalence_random() {
    let mut rng = StdRng::seed_from_u64(13);
    let pool = ['a', 'b', 'c', 'd', 'e'];

    for _ in 0..50 {
        // Pick label sets for A and B with a shared middle.
        let na = rng.random_range(1..4);
        let nb = rng.random_range(1..4);
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(&mut rng);
        let idx_a: String = shuffled[..na].iter().collect();
        let mut shuffled_b = pool.to_vec();
        shuffled_b.shuffle(&mut rng);
        let idx_b: String = shuffled_b[..nb].iter().collect();

        // One length per label, consistent across operands.
        let len_of = |lab: char| 2 + (lab as i64 - 'a' as i64) % 3;
        let len_a: Vec<i64> = idx_a.chars().map(len_of).collect();
        let len_b: Vec<i64> = idx_b.chars().map(len_of).collect();

        let (_, stride_a) = {
            let mut order: Vec<usize> = (0..na).collect();
            order.shuffle(&mut rng);
            let mut stride = vec![0i64; na];
            let mut s = 1i64;
            for &ax in &order {
                stride[ax] = s;
                s *= len_a[ax] + rng.random_range(0..2);
            }
            (len_a.clone(), stride)
        };
        let (_, stride_b) = {
            let mut order: Vec<usize> = (0..nb).collect();
            order.shuffle(&mut rng);
            let mut stride = vec![0i64; nb];
            let mut s = 1i64;
            for &ax in &order {
                stride[ax] = s;
                s *= len_b[ax] + rng.random_range(0..2);
            }
            (len_b.clone(), stride)
        };

        let data_a = random_data(&mut rng, tensor_storage_size(&len_a, Some(&stride_a)));
        let data_b = random_data(&mut rng, tensor_storage_size(&len_b, Some(&stride_b)));
        let va = TensorView::from_slice(&data_a, &len_a, &stride_a).unwrap();
        let vb = TensorView::from_slice(&data_b, &len_b, &stride_b).unwrap();

        let (fa, fidx_a, fb, fidx_b) = fold_pair(va, &idx_a, vb, &idx_b);

        assert!(are_compatible(&len_a, &stride_a, fa.lengths(), fa.strides()));
        assert!(are_compatible(&len_b, &stride_b, fb.lengths(), fb.strides()));

        // Shared labels come out aligned at the tail of both operands.
        let shared_a: String = fidx_a.chars().filter(|c| idx_b.contains(*c)).collect();
        let shared_b: String = fidx_b.chars().filter(|c| idx_a.contains(*c)).collect();
        assert_eq!(shared_a, shared_b);
        assert!(fidx_a.ends_with(&shared_a));
        assert!(fidx_b.ends_with(&shared_b));
    }
}

/// Randomized end-to-end check: transposing through arbitrary strided
/// layouts matches element-wise access.
#[test]
fn test_transpose_random_layouts() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..30 {
        let ndim = rng.random_range(1..4);
        let (len_a, stride_a) = random_layout(&mut rng, ndim);

        // B's axes are a permutation of A's.
        let mut perm: Vec<usize> = (0..ndim).collect();
        perm.shuffle(&mut rng);
        let len_b: Vec<i64> = perm.iter().map(|&d| len_a[d]).collect();
        let (_, stride_b) = {
            let mut order: Vec<usize> = (0..ndim).collect();
            order.shuffle(&mut rng);
            let mut stride = vec![0i64; ndim];
            let mut s = 1i64;
            for &ax in &order {
                stride[ax] = s;
                s *= len_b[ax];
            }
            (len_b.clone(), stride)
        };

        let labels = ['i', 'j', 'k'];
        let idx_a: String = labels[..ndim].iter().collect();
        let idx_b: String = perm.iter().map(|&d| labels[d]).collect();

        let data_a = random_data(&mut rng, tensor_storage_size(&len_a, Some(&stride_a)));
        let mut data_b = vec![0.0; tensor_storage_size(&len_b, Some(&stride_b))];

        let va = TensorView::from_slice(&data_a, &len_a, &stride_a).unwrap();
        let vb = TensorViewMut::from_slice(&mut data_b, &len_b, &stride_b).unwrap();
        assert_eq!(transpose(1.0, va.clone(), &idx_a, 0.0, vb, &idx_b), 0);

        let vb = TensorView::from_slice(&data_b, &len_b, &stride_b).unwrap();
        for_each_coord(&len_a, |xa| {
            let xb: Vec<i64> = perm.iter().map(|&d| xa[d]).collect();
            assert_eq!(va.get(xa), vb.get(&xb));
        });
    }
}
