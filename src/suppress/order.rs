//! Deterministic confidence ordering.

use std::cmp::Ordering;

fn conf_cmp_desc(confs: &[f32], a: usize, b: usize) -> Ordering {
    confs[b].total_cmp(&confs[a]).then_with(|| a.cmp(&b))
}

/// Returns `0..confs.len()` sorted by descending confidence.
///
/// Equal confidences keep ascending index order. Comparison uses
/// `f32::total_cmp`, so a positive NaN ranks above every finite value.
pub fn order_by_confidence_desc(confs: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..confs.len()).collect();
    order.sort_by(|&a, &b| conf_cmp_desc(confs, a, b));
    order
}

#[cfg(test)]
mod tests {
    use super::order_by_confidence_desc;

    #[test]
    fn ties_break_by_ascending_index() {
        let order = order_by_confidence_desc(&[0.5, 0.9, 0.5, 0.9, 0.1]);
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn empty_input_gives_empty_order() {
        assert!(order_by_confidence_desc(&[]).is_empty());
    }
}
