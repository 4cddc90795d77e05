//! The clusters and edit script of one text change.

use crate::cluster::GraphemeCluster;
use crate::diff::{DiffKind, DiffOp, DiffOptions, diff_with};
use crate::error::{Error, Result};

/// Animation family an op belongs to; each family is staggered on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaggerGroup {
    Insert,
    Remove,
    /// `Move` and `Stay` share one wave.
    Reposition,
    Update,
}

impl StaggerGroup {
    #[must_use]
    pub fn of(kind: DiffKind) -> Self {
        match kind {
            DiffKind::Insert => Self::Insert,
            DiffKind::Remove => Self::Remove,
            DiffKind::Move | DiffKind::Stay => Self::Reposition,
            DiffKind::Update => Self::Update,
        }
    }
}

/// Zero-based rank of every op within its [`StaggerGroup`], in op order.
#[must_use]
pub fn stagger_offsets(ops: &[DiffOp]) -> Vec<usize> {
    let mut counters = [0usize; 4];
    ops.iter()
        .map(|op| {
            let slot = match StaggerGroup::of(op.kind) {
                StaggerGroup::Insert => 0,
                StaggerGroup::Remove => 1,
                StaggerGroup::Reposition => 2,
                StaggerGroup::Update => 3,
            };
            let offset = counters[slot];
            counters[slot] += 1;
            offset
        })
        .collect()
}

/// Old clusters, new clusters and the ops between them.
///
/// Ops refer to clusters by index. A new transition replaces the previous
/// one wholesale, progress included.
#[derive(Clone, Debug, Default)]
pub struct Transition {
    old: Vec<GraphemeCluster>,
    new: Vec<GraphemeCluster>,
    ops: Vec<DiffOp>,
}

impl Transition {
    /// Diff `old` against `new` and start every cluster at zero progress.
    #[must_use]
    pub fn new(old: Vec<GraphemeCluster>, new: Vec<GraphemeCluster>, options: DiffOptions) -> Self {
        let ops = diff_with(&old, &new, options);
        Self::from_parts(old, new, ops)
    }

    /// Assemble a transition from a precomputed script.
    #[must_use]
    pub fn from_parts(
        mut old: Vec<GraphemeCluster>,
        mut new: Vec<GraphemeCluster>,
        ops: Vec<DiffOp>,
    ) -> Self {
        old.iter_mut().for_each(GraphemeCluster::reset_animation);
        new.iter_mut().for_each(GraphemeCluster::reset_animation);
        Self { old, new, ops }
    }

    #[must_use]
    pub fn old(&self) -> &[GraphemeCluster] {
        &self.old
    }

    #[must_use]
    pub fn new_clusters(&self) -> &[GraphemeCluster] {
        &self.new
    }

    #[must_use]
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The old cluster an op carries, if any and in bounds.
    #[must_use]
    pub fn old_cluster(&self, op: &DiffOp) -> Option<&GraphemeCluster> {
        op.old_cluster.and_then(|i| self.old.get(i))
    }

    /// The new cluster an op carries, if any and in bounds.
    #[must_use]
    pub fn new_cluster(&self, op: &DiffOp) -> Option<&GraphemeCluster> {
        op.new_cluster.and_then(|i| self.new.get(i))
    }

    /// Check that every op references clusters that exist.
    pub fn validate(&self) -> Result<()> {
        for op in &self.ops {
            check_index(op.kind, op.old_cluster, self.old.len())?;
            check_index(op.kind, op.new_cluster, self.new.len())?;
        }
        Ok(())
    }

    /// Number of referenced clusters that have not finished animating.
    #[must_use]
    pub fn unfinished(&self) -> usize {
        let mut seen_old = vec![false; self.old.len()];
        let mut seen_new = vec![false; self.new.len()];
        let mut count = 0;
        for op in &self.ops {
            count += count_unfinished(op.old_cluster, &self.old, &mut seen_old);
            count += count_unfinished(op.new_cluster, &self.new, &mut seen_new);
        }
        count
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&[DiffOp], &mut [GraphemeCluster], &mut [GraphemeCluster]) {
        (&self.ops, &mut self.old, &mut self.new)
    }
}

fn check_index(kind: DiffKind, index: Option<usize>, len: usize) -> Result<()> {
    match index {
        Some(index) if index >= len => Err(Error::OpOutOfBounds { kind, index, len }),
        _ => Ok(()),
    }
}

fn count_unfinished(index: Option<usize>, clusters: &[GraphemeCluster], seen: &mut [bool]) -> usize {
    let Some(i) = index else { return 0 };
    match (clusters.get(i), seen.get_mut(i)) {
        (Some(cluster), Some(seen)) if !*seen => {
            *seen = true;
            usize::from(!cluster.is_finished())
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::clusters_from_text;

    #[test]
    fn test_stagger_offsets_rank_per_group() {
        let t = Transition::new(
            clusters_from_text("abc"),
            clusters_from_text("xbcyz"),
            DiffOptions::default(),
        );
        let kinds: Vec<_> = t.ops().iter().map(|op| op.kind).collect();
        let offsets = stagger_offsets(t.ops());
        let inserts: Vec<_> = kinds
            .iter()
            .zip(&offsets)
            .filter(|(k, _)| **k == DiffKind::Insert)
            .map(|(_, o)| *o)
            .collect();
        assert_eq!(inserts, vec![0, 1, 2]);
        // The lone removal leads its own group.
        assert_eq!(kinds[0], DiffKind::Remove);
        assert_eq!(offsets[0], 0);
    }

    #[test]
    fn test_move_and_stay_share_a_group() {
        assert_eq!(StaggerGroup::of(DiffKind::Move), StaggerGroup::of(DiffKind::Stay));
        assert_ne!(StaggerGroup::of(DiffKind::Insert), StaggerGroup::of(DiffKind::Update));
    }

    #[test]
    fn test_validate_reports_out_of_bounds() {
        let ops = vec![DiffOp {
            kind: DiffKind::Insert,
            old_cluster: None,
            new_cluster: Some(5),
            old_index: 5,
            new_index: 5,
        }];
        let t = Transition::from_parts(Vec::new(), clusters_from_text("ab"), ops);
        match t.validate() {
            Err(Error::OpOutOfBounds { index, len, .. }) => assert_eq!((index, len), (5, 2)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(t.unfinished(), 0);
    }

    #[test]
    fn test_unfinished_counts_each_cluster_once() {
        let t = Transition::new(
            clusters_from_text("ab"),
            clusters_from_text("ab"),
            DiffOptions::default(),
        );
        assert!(t.validate().is_ok());
        assert_eq!(t.unfinished(), 4);
        assert_eq!(t.old_cluster(&t.ops()[1]).unwrap().characters, "b");
        assert!(Transition::default().is_empty());
    }
}
