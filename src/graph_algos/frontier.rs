use std::cmp::Ordering;


/// Frontier entry
/// - for ordering we only need a priority and a way to identify the node
/// - `priority` is the cost for Dijkstra, cost + heuristic for A*
/// - equal priorities fall back to the lower map index, i.e. the node discovered first
#[derive(Debug)]
pub(crate) struct Frontier<T> {
    pub index: usize, // index in the node map
    pub cost: T, // confirmed cost from the start node
    pub priority: T,
}

// BinaryHeap pops the biggest element, so both comparisons are reversed
impl<T: Ord> Ord for Frontier<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for Frontier<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: Ord> PartialEq for Frontier<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<T: Ord> Eq for Frontier<T> {}
