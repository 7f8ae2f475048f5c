//! Hierarchy-aware project ordering
//!
//! [`OrderBuilder`] collects project metadata and parent links while a
//! solution is parsed. [`OrderBuilder::build`] turns them into a
//! [`ProjectOrder`]: a rank per project identifier following the solution
//! tree depth first, folders before other items at every level, names in
//! ordinal order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::FOLDER_TYPE_GUID;
use crate::{Error, Result};

/// Metadata recorded for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub type_guid: String,
    pub name: String,
}

impl ProjectInfo {
    pub fn is_folder(&self) -> bool {
        self.type_guid == FOLDER_TYPE_GUID
    }
}

/// One level of a project's ancestry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingPathSegment {
    pub is_folder: bool,
    pub name: String,
}

impl NestingPathSegment {
    /// Folders first, then names by ordinal comparison.
    fn cmp_display(&self, other: &Self) -> Ordering {
        other
            .is_folder
            .cmp(&self.is_folder)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Compare two nesting paths, root segment first.
///
/// Segments are compared pairwise; if one path is a prefix of the other, the
/// shorter one comes first.
pub fn compare_paths(a: &[NestingPathSegment], b: &[NestingPathSegment]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp_display(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Accumulates project metadata and nesting before computing an order.
#[derive(Debug, Default, Clone)]
pub struct OrderBuilder {
    infos: HashMap<String, ProjectInfo>,
    parents: HashMap<String, String>,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record metadata for a project. A later call for the same id wins.
    pub fn set_project_info(
        &mut self,
        id: impl Into<String>,
        type_guid: impl Into<String>,
        name: impl Into<String>,
    ) {
        self.infos.insert(
            id.into(),
            ProjectInfo {
                type_guid: type_guid.into(),
                name: name.into(),
            },
        );
    }

    /// Record that `child` is nested in `parent`. A later call for the same child wins.
    pub fn set_project_parent(&mut self, child: impl Into<String>, parent: impl Into<String>) {
        self.parents.insert(child.into(), parent.into());
    }

    /// Root-first nesting path of a known project.
    ///
    /// The walk stops at a project without a recorded parent, or at a parent
    /// with no recorded metadata. Returns `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParentCycle`] if the chain is longer than the number of
    /// known projects, which only a cycle can cause.
    pub fn nesting_path(&self, id: &str) -> Result<Option<Vec<NestingPathSegment>>> {
        let Some(mut info) = self.infos.get(id) else {
            return Ok(None);
        };
        let mut key = id;
        let mut path = Vec::new();
        loop {
            if path.len() == self.infos.len() {
                return Err(Error::ParentCycle {
                    project: id.to_string(),
                });
            }
            path.push(NestingPathSegment {
                is_folder: info.is_folder(),
                name: info.name.clone(),
            });

            let Some((parent, parent_info)) = self
                .parents
                .get(key)
                .and_then(|parent| Some((parent, self.infos.get(parent)?)))
            else {
                break;
            };
            key = parent.as_str();
            info = parent_info;
        }
        path.reverse();
        Ok(Some(path))
    }

    /// Finalize the order over every recorded project.
    ///
    /// Projects whose paths compare equal are ranked by identifier, so the
    /// result never depends on the order calls were made in.
    pub fn build(&self) -> Result<ProjectOrder> {
        let mut entries = Vec::with_capacity(self.infos.len());
        for id in self.infos.keys() {
            if let Some(path) = self.nesting_path(id)? {
                entries.push((id.as_str(), path));
            }
        }

        entries.sort_by(|(a_id, a_path), (b_id, b_path)| {
            compare_paths(a_path, b_path).then_with(|| a_id.cmp(b_id))
        });

        let ranks = entries
            .iter()
            .enumerate()
            .map(|(rank, (id, _))| (id.to_string(), rank))
            .collect();

        tracing::debug!(projects = entries.len(), "Built project order");
        Ok(ProjectOrder { ranks })
    }
}

/// Finalized total order over project identifiers.
///
/// Identifiers without a rank sort after all ranked ones and compare equal to
/// each other, so a stable sort keeps them in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOrder {
    ranks: HashMap<String, usize>,
}

impl ProjectOrder {
    /// Zero-based position of a project, if known.
    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// Number of ranked projects.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Compare two identifiers by rank.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Whether `items` are already non-decreasing under this order.
    pub fn is_sorted_by_key<T>(&self, items: &[T], key: impl Fn(&T) -> &str) -> bool {
        items.is_sorted_by(|a, b| self.compare(key(a), key(b)).is_le())
    }

    /// Stable sort of `items` by this order.
    pub fn sort_by_key<T>(&self, items: &mut [T], key: impl Fn(&T) -> &str) {
        items.sort_by(|a, b| self.compare(key(a), key(b)));
    }
}
