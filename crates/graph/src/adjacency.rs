//! Small helpers shared by the `Array` and `Linked` backends for keeping a per-vertex
//! adjacency list in sync with the edge-index swap protocol.

/// Remove the first occurrence of `value` from `list` using swap-remove (O(1) once found).
pub(crate) fn remove_from_list(list: &mut Vec<usize>, value: usize) {
    if let Some(pos) = list.iter().position(|&x| x == value) {
        list.swap_remove(pos);
    }
}

/// Replace the first occurrence of `from` with `to` in `list`.
pub(crate) fn replace_in_list(list: &mut Vec<usize>, from: usize, to: usize) {
    if let Some(pos) = list.iter().position(|&x| x == from) {
        list[pos] = to;
    }
}
