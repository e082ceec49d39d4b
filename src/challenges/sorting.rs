/// Top-down stable merge sort producing a new ascending list.
pub fn merge_sort(numbers: &[i64]) -> Vec<i64> {
    if numbers.len() <= 1 {
        return numbers.to_vec();
    }

    let mid = numbers.len() / 2;
    let left = merge_sort(&numbers[..mid]);
    let right = merge_sort(&numbers[mid..]);
    merge(&left, &right)
}

// Takes the lesser-or-equal element from the left half first, which keeps
// equal keys in their original relative order.
fn merge(left: &[i64], right: &[i64]) -> Vec<i64> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }

    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
