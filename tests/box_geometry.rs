use detfilter::lowlevel::{center_to_corner, corner_areas, pair_iou};
use detfilter::{compute_ious, CenterBox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_boxes(rng: &mut StdRng, n: usize, lo: f32, hi: f32) -> Vec<CenterBox> {
    (0..n)
        .map(|_| {
            CenterBox::new(
                rng.random_range(lo..hi),
                rng.random_range(lo..hi),
                rng.random_range(lo..hi),
                rng.random_range(lo..hi),
            )
        })
        .collect()
}

#[test]
fn corners_always_lie_in_unit_square() {
    let mut rng = StdRng::seed_from_u64(7);
    // Widely out of range, including negative extents.
    let boxes = random_boxes(&mut rng, 500, -2.0, 3.0);
    for corner in center_to_corner(&boxes) {
        for v in corner.to_array() {
            assert!((0.0..=1.0).contains(&v), "coordinate {v} out of range");
        }
        assert!(corner.height() >= 0.0);
        assert!(corner.width() >= 0.0);
    }
}

#[test]
fn well_formed_boxes_keep_ordered_corners() {
    let mut rng = StdRng::seed_from_u64(8);
    let boxes = random_boxes(&mut rng, 500, 0.0, 1.0);
    for corner in center_to_corner(&boxes) {
        assert!(0.0 <= corner.i0 && corner.i0 <= corner.i1 && corner.i1 <= 1.0);
        assert!(0.0 <= corner.j0 && corner.j0 <= corner.j1 && corner.j1 <= 1.0);
    }
}

#[test]
fn iou_is_symmetric_and_bounded() {
    let mut rng = StdRng::seed_from_u64(9);
    let a = random_boxes(&mut rng, 40, -0.2, 1.2);
    let b = random_boxes(&mut rng, 25, -0.2, 1.2);

    let ab = compute_ious(&a, &b);
    let ba = compute_ious(&b, &a);
    assert_eq!((ab.rows(), ab.cols()), (40, 25));
    assert_eq!((ba.rows(), ba.cols()), (25, 40));

    for r in 0..a.len() {
        for c in 0..b.len() {
            let v = ab.get(r, c).unwrap();
            assert!((0.0..=1.0).contains(&v), "iou {v} out of range");
            assert!((v - ba.get(c, r).unwrap()).abs() < 1e-6);
        }
    }
}

#[test]
fn self_iou_is_one_for_positive_area() {
    let mut rng = StdRng::seed_from_u64(10);
    let boxes = random_boxes(&mut rng, 60, 0.05, 0.95);
    let ious = compute_ious(&boxes, &boxes);
    let areas = corner_areas(&center_to_corner(&boxes));
    for (k, area) in areas.iter().enumerate() {
        if *area > 0.0 {
            assert!((ious.get(k, k).unwrap() - 1.0).abs() < 1e-6);
        } else {
            assert_eq!(ious.get(k, k).unwrap(), 0.0);
        }
    }
}

#[test]
fn disjoint_boxes_have_zero_iou() {
    let a = CenterBox::new(0.1, 0.1, 0.1, 0.1);
    let b = CenterBox::new(0.9, 0.9, 0.1, 0.1);
    let m = compute_ious(&[a], &[b]);
    assert_eq!(m.get(0, 0), Some(0.0));
}

#[test]
fn matrix_matches_pairwise_reference() {
    let mut rng = StdRng::seed_from_u64(11);
    let rows = random_boxes(&mut rng, 13, 0.0, 1.0);
    let cols = random_boxes(&mut rng, 19, 0.0, 1.0);
    let m = compute_ious(&rows, &cols);
    for (r, rb) in rows.iter().enumerate() {
        let rc = rb.to_corner();
        for (c, cb) in cols.iter().enumerate() {
            let cc = cb.to_corner();
            let expected = pair_iou(rc, rc.area(), cc, cc.area());
            assert!((m.get(r, c).unwrap() - expected).abs() < 1e-6);
        }
    }
}

#[test]
fn empty_collections_give_empty_matrices() {
    let b = [CenterBox::new(0.5, 0.5, 0.1, 0.1)];
    let m = compute_ious(&b, &[]);
    assert_eq!((m.rows(), m.cols()), (1, 0));
    assert!(m.row(0).unwrap().is_empty());
    let m = compute_ious(&[], &[]);
    assert_eq!((m.rows(), m.cols()), (0, 0));
}
