use super::Candidate;


/// Decides how attractive a feasible candidate is
/// The planner keeps the candidate with the strictly highest rank
/// `None` disqualifies the candidate altogether
pub trait SelectionStrategy {
    fn rank(&self, candidate: &Candidate) -> Option<f64>;
}

impl<S: SelectionStrategy + ?Sized> SelectionStrategy for &S {
    fn rank(&self, candidate: &Candidate) -> Option<f64> {
        (**self).rank(candidate)
    }
}


/// Best priority per unit of time spent: pickup + treatment + drop-off
/// Greedy and single pass, no lookahead
/// Candidates with a non-positive total cost or a zero ratio are disqualified
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyRatio;

impl SelectionStrategy for GreedyRatio {
    fn rank(&self, candidate: &Candidate) -> Option<f64> {
        candidate.ratio().filter(|ratio| *ratio > 0.0)
    }
}
