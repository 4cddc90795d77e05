//! Grapheme cluster diffing.
//!
//! [`diff`] turns an old and a new cluster sequence into an ordered edit
//! script of [`DiffOp`]s. The algorithm is Paul Heckel's symbol-table diff
//! keyed on each cluster's `characters`:
//!
//! 1. Count occurrences of every key in the new sequence.
//! 2. Count occurrences in the old sequence and queue old indices per key.
//! 3. Pair each new cluster with the oldest unpaired old cluster of the same
//!    key (a FIFO multiset match, not an LCS).
//! 4. Extend pairs forward to unpaired, content-equal neighbours.
//! 5. Extend pairs backward the same way.
//!
//! Emission lists every removal first (old order), then walks the new
//! sequence emitting `Insert`, `Update`, `Move` and `Stay` ops.
//!
//! # Examples
//!
//! ```
//! use textfx::cluster::clusters_from_text;
//! use textfx::diff::{DiffKind, diff};
//!
//! let ops = diff(&clusters_from_text("ab"), &clusters_from_text("ba"));
//! let kinds: Vec<_> = ops.iter().map(|op| op.kind).collect();
//! assert_eq!(kinds, vec![DiffKind::Move, DiffKind::Move]);
//! ```

use std::collections::{HashMap, VecDeque};

use crate::cluster::GraphemeCluster;

/// Kind of edit a [`DiffOp`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffKind {
    /// New cluster with no counterpart in the old sequence.
    Insert,
    /// Old cluster with no counterpart in the new sequence.
    Remove,
    /// Paired clusters whose content differs.
    Update,
    /// Paired clusters whose rendered position changed.
    Move,
    /// Paired clusters at the same position.
    Stay,
}

impl DiffKind {
    /// Lowercase name, used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::Move => "move",
            Self::Stay => "stay",
        }
    }
}

/// One instruction of an edit script.
///
/// `old_cluster` and `new_cluster` index into the sequences passed to
/// [`diff`]. `old_index` and `new_index` are the positions that produced the
/// op; they are not unique across ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOp {
    pub kind: DiffKind,
    pub old_cluster: Option<usize>,
    pub new_cluster: Option<usize>,
    pub old_index: usize,
    pub new_index: usize,
}

impl DiffOp {
    fn insert(i: usize) -> Self {
        Self {
            kind: DiffKind::Insert,
            old_cluster: None,
            new_cluster: Some(i),
            old_index: i,
            new_index: i,
        }
    }

    fn remove(j: usize) -> Self {
        Self {
            kind: DiffKind::Remove,
            old_cluster: Some(j),
            new_cluster: None,
            old_index: j,
            new_index: j,
        }
    }

    fn paired(kind: DiffKind, j: usize, i: usize) -> Self {
        Self {
            kind,
            old_cluster: Some(j),
            new_cluster: Some(i),
            old_index: j,
            new_index: i,
        }
    }
}

/// Options for [`diff_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Pair clusters left unmatched at the same index so a substitution is
    /// reported as `Update` instead of `Remove` + `Insert`.
    pub substitute_in_place: bool,
}

impl DiffOptions {
    #[must_use]
    pub fn with_substitute_in_place(mut self, enabled: bool) -> Self {
        self.substitute_in_place = enabled;
        self
    }
}

#[derive(Default)]
struct TableEntry {
    old_count: usize,
    new_count: usize,
    old_indices: VecDeque<usize>,
}

/// Diff two cluster sequences with default options.
#[must_use]
pub fn diff(old: &[GraphemeCluster], new: &[GraphemeCluster]) -> Vec<DiffOp> {
    diff_with(old, new, DiffOptions::default())
}

/// Diff two cluster sequences.
///
/// Total and deterministic: any pair of sequences, including empty ones,
/// yields a script whose indices are in bounds.
#[must_use]
pub fn diff_with(
    old: &[GraphemeCluster],
    new: &[GraphemeCluster],
    options: DiffOptions,
) -> Vec<DiffOp> {
    if old.is_empty() && new.is_empty() {
        return Vec::new();
    }

    let mut table: HashMap<&str, TableEntry> = HashMap::new();
    for cluster in new {
        table.entry(cluster.characters.as_str()).or_default().new_count += 1;
    }
    for (j, cluster) in old.iter().enumerate() {
        let entry = table.entry(cluster.characters.as_str()).or_default();
        entry.old_count += 1;
        entry.old_indices.push_back(j);
    }

    // na[i] = old position paired with new i; oa[j] = new position paired with old j.
    let mut na: Vec<Option<usize>> = vec![None; new.len()];
    let mut oa: Vec<Option<usize>> = vec![None; old.len()];

    for (i, cluster) in new.iter().enumerate() {
        if let Some(entry) = table.get_mut(cluster.characters.as_str()) {
            if entry.old_count > 0 && entry.new_count > 0 {
                if let Some(j) = entry.old_indices.pop_front() {
                    na[i] = Some(j);
                    oa[j] = Some(i);
                }
            }
        }
    }

    for i in 0..new.len().saturating_sub(1) {
        let Some(j) = na[i] else { continue };
        if j + 1 < old.len()
            && na[i + 1].is_none()
            && oa[j + 1].is_none()
            && new[i + 1].content_eq(&old[j + 1])
        {
            na[i + 1] = Some(j + 1);
            oa[j + 1] = Some(i + 1);
        }
    }

    for i in (1..new.len()).rev() {
        let Some(j) = na[i] else { continue };
        if j > 0 && na[i - 1].is_none() && oa[j - 1].is_none() && new[i - 1].content_eq(&old[j - 1])
        {
            na[i - 1] = Some(j - 1);
            oa[j - 1] = Some(i - 1);
        }
    }

    if options.substitute_in_place {
        for i in 0..new.len().min(old.len()) {
            if na[i].is_none() && oa[i].is_none() {
                na[i] = Some(i);
                oa[i] = Some(i);
            }
        }
    }

    emit(old, new, &na, &oa)
}

fn emit(
    old: &[GraphemeCluster],
    new: &[GraphemeCluster],
    na: &[Option<usize>],
    oa: &[Option<usize>],
) -> Vec<DiffOp> {
    let mut ops = Vec::with_capacity(old.len().max(new.len()) + 4);

    // Removals seen before each old position.
    let mut remove_offsets = vec![0usize; oa.len()];
    let mut removed = 0usize;
    for (j, pair) in oa.iter().enumerate() {
        remove_offsets[j] = removed;
        if pair.is_none() {
            ops.push(DiffOp::remove(j));
            removed += 1;
        }
    }

    let mut inserted = 0usize;
    for (i, pair) in na.iter().enumerate() {
        let Some(j) = *pair else {
            ops.push(DiffOp::insert(i));
            inserted += 1;
            continue;
        };

        if !old[j].content_eq(&new[i]) {
            ops.push(DiffOp::paired(DiffKind::Update, j, i));
        }

        if i != j {
            ops.push(DiffOp::paired(DiffKind::Move, j, i));
            continue;
        }

        ops.push(DiffOp::paired(DiffKind::Stay, j, i));

        // Same raw index, but earlier inserts and removes shifted where it renders.
        if i + remove_offsets[j] != j + inserted {
            ops.push(DiffOp::paired(DiffKind::Move, j, i));
        }
    }

    ops
}

/// Per-kind op counts of an edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub inserts: usize,
    pub removes: usize,
    pub updates: usize,
    pub moves: usize,
    pub stays: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn of(ops: &[DiffOp]) -> Self {
        ops.iter().fold(Self::default(), |mut acc, op| {
            match op.kind {
                DiffKind::Insert => acc.inserts += 1,
                DiffKind::Remove => acc.removes += 1,
                DiffKind::Update => acc.updates += 1,
                DiffKind::Move => acc.moves += 1,
                DiffKind::Stay => acc.stays += 1,
            }
            acc
        })
    }

    /// Whether the script changes nothing.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.inserts == 0 && self.removes == 0 && self.updates == 0 && self.moves == 0
    }
}

/// Replay an edit script against the old sequence.
///
/// Each new position is filled by its `Insert`, by the old cluster its
/// `Move`/`Stay` carries, or by the new content of its `Update`. Returns
/// `None` if a position is left empty or an op is out of bounds.
#[must_use]
pub fn replay<'a>(
    old: &'a [GraphemeCluster],
    new: &'a [GraphemeCluster],
    ops: &[DiffOp],
) -> Option<Vec<&'a str>> {
    let mut slots: Vec<Option<&'a str>> = vec![None; new.len()];

    for op in ops {
        match op.kind {
            DiffKind::Remove => {
                old.get(op.old_cluster?)?;
            }
            DiffKind::Insert | DiffKind::Update => {
                let i = op.new_cluster?;
                *slots.get_mut(i)? = Some(new.get(i)?.characters.as_str());
            }
            DiffKind::Move | DiffKind::Stay => {
                let source = old.get(op.old_cluster?)?.characters.as_str();
                slots.get_mut(op.new_cluster?)?.get_or_insert(source);
            }
        }
    }

    slots.into_iter().collect()
}
