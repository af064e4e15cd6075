//! Hierarchical projections of a flat category list.
//!
//! Every function here is pure. A [`CategoryForest`] indexes the list once per
//! render pass (id lookup, children per parent, roots) so the projections do
//! not rescan the whole list for each node.
//!
//! Input order is significant: roots and siblings are always emitted in the
//! relative order they have in the input slice.

use std::collections::{HashMap, HashSet};

use crate::category::model::Category;
use crate::error::{AdminError, Result};

/// Prefix repeated once per level in hierarchical labels.
const LEVEL_PREFIX: &str = "──";

/// A category with its depth, as produced by [`CategoryForest::flatten_with_indent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedCategory {
    pub category: Category,
    pub level: usize,
}

/// A row of the interactive (collapsible) category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub category: Category,
    /// Depth from the root; roots are 0.
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_sub_category: bool,
}

/// A row of a fully expanded hierarchical listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyEntry {
    pub category: Category,
    pub level: usize,
    /// Display name prefixed by `──` per level.
    pub label: String,
}

/// A choice in the parent picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentOption {
    pub id: i64,
    pub label: String,
    pub level: usize,
}

/// Index over a borrowed category slice.
///
/// Construction fails with [`AdminError::CorruptHierarchy`] when two records
/// share an id or the parent links form a cycle, so every traversal below
/// is guaranteed to terminate.
#[derive(Debug)]
pub struct CategoryForest<'a> {
    categories: &'a [Category],
    by_id: HashMap<i64, usize>,
    children: HashMap<i64, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> CategoryForest<'a> {
    pub fn new(categories: &'a [Category]) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(categories.len());
        let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (pos, category) in categories.iter().enumerate() {
            if by_id.insert(category.id, pos).is_some() {
                return Err(AdminError::CorruptHierarchy { id: category.id });
            }
            match category.parent() {
                Some(parent) => children.entry(parent).or_default().push(pos),
                None => roots.push(pos),
            }
        }

        let forest = Self {
            categories,
            by_id,
            children,
            roots,
        };
        forest.check_acyclic()?;
        Ok(forest)
    }

    /// Walks every parent chain once; ids proven to reach a root (or a
    /// dangling parent) are remembered so the check stays linear.
    fn check_acyclic(&self) -> Result<()> {
        let mut settled: HashSet<i64> = HashSet::with_capacity(self.categories.len());

        for category in self.categories {
            if settled.contains(&category.id) {
                continue;
            }
            let mut path = vec![category.id];
            let mut on_path: HashSet<i64> = HashSet::from([category.id]);
            let mut current = category;

            while let Some(parent_id) = current.parent() {
                if on_path.contains(&parent_id) {
                    return Err(AdminError::CorruptHierarchy { id: parent_id });
                }
                if settled.contains(&parent_id) {
                    break;
                }
                let Some(parent) = self.get(parent_id) else {
                    break;
                };
                path.push(parent_id);
                on_path.insert(parent_id);
                current = parent;
            }
            settled.extend(path);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&'a Category> {
        self.by_id.get(&id).map(|&pos| &self.categories[pos])
    }

    /// Root categories in input order.
    pub fn roots(&self) -> impl Iterator<Item = &'a Category> + '_ {
        self.roots.iter().map(|&pos| &self.categories[pos])
    }

    /// Direct children of `id` in input order.
    pub fn children_of(&self, id: i64) -> impl Iterator<Item = &'a Category> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.categories[pos])
    }

    /// Whether any record names `id` as its parent.
    pub fn has_children(&self, id: i64) -> bool {
        self.children.get(&id).is_some_and(|c| !c.is_empty())
    }

    /// Parent chain of `category`, nearest first.
    ///
    /// Stops at a root or at a parent id that is not in the list.
    pub fn ancestors(&self, category: &'a Category) -> Ancestors<'_, 'a> {
        Ancestors {
            forest: self,
            current: category,
        }
    }

    /// Whether walking up from `category` reaches `ancestor_id`.
    ///
    /// A category is not its own descendant. Dangling chains terminate and
    /// count as "not a descendant".
    pub fn is_descendant_of(&self, category: &'a Category, ancestor_id: i64) -> bool {
        if category.parent() == Some(ancestor_id) {
            return true;
        }
        self.ancestors(category).any(|a| a.id == ancestor_id)
    }

    /// Categories a record may be re-parented under: everything except
    /// `exclude_id` itself and its whole subtree, in input order.
    pub fn selectable(&self, exclude_id: i64) -> Vec<&'a Category> {
        self.categories
            .iter()
            .filter(|c| c.id != exclude_id && !self.is_descendant_of(*c, exclude_id))
            .collect()
    }

    /// Roots, each immediately followed by its direct children (level 1).
    ///
    /// Only two levels are materialised; grandchildren are not emitted.
    pub fn flatten_with_indent(&self) -> Vec<IndentedCategory> {
        let mut rows = Vec::with_capacity(self.categories.len());
        for root in self.roots() {
            rows.push(IndentedCategory {
                category: root.clone(),
                level: 0,
            });
            rows.extend(self.children_of(root.id).map(|child| IndentedCategory {
                category: child.clone(),
                level: 1,
            }));
        }
        rows
    }

    /// Depth-first rows for the collapsible table.
    ///
    /// Roots are always shown; any other node is shown only when its parent is
    /// shown and its parent's id is in `expanded`.
    pub fn project_collapsible(&self, expanded: &HashSet<i64>) -> Vec<DisplayNode> {
        let mut rows = Vec::new();
        for root in self.roots() {
            self.visit_collapsible(root, 0, true, expanded, &mut rows);
        }
        rows
    }

    fn visit_collapsible(
        &self,
        category: &'a Category,
        level: usize,
        parent_expanded: bool,
        expanded: &HashSet<i64>,
        rows: &mut Vec<DisplayNode>,
    ) {
        if level > 0 && !parent_expanded {
            return;
        }

        let has_children = self.has_children(category.id);
        let is_expanded = expanded.contains(&category.id);
        rows.push(DisplayNode {
            category: category.clone(),
            level,
            has_children,
            is_expanded,
            is_sub_category: level > 0,
        });

        if has_children {
            for child in self.children_of(category.id) {
                self.visit_collapsible(child, level + 1, is_expanded, expanded, rows);
            }
        }
    }

    /// Fully expanded depth-first listing with `──` level prefixes.
    pub fn hierarchical(&self) -> Vec<HierarchyEntry> {
        let mut rows = Vec::with_capacity(self.categories.len());
        self.walk_depth_first(None, &mut |category, level| {
            rows.push(HierarchyEntry {
                category: category.clone(),
                level,
                label: indent_label(level, category.display_name()),
            });
        });
        rows
    }

    /// Parent picker options, excluding `exclude_id` and its subtree.
    pub fn parent_options(&self, exclude_id: Option<i64>) -> Vec<ParentOption> {
        let mut options = Vec::new();
        self.walk_depth_first(exclude_id, &mut |category, level| {
            options.push(ParentOption {
                id: category.id,
                label: indent_label(level, &category.bilingual_label()),
                level,
            });
        });
        options
    }

    /// Pre-order traversal from every root; a subtree rooted at `skip` is pruned.
    fn walk_depth_first<F>(&self, skip: Option<i64>, visit: &mut F)
    where
        F: FnMut(&'a Category, usize),
    {
        let mut stack: Vec<(&'a Category, usize)> =
            self.roots().map(|root| (root, 0)).collect();
        stack.reverse();

        while let Some((category, level)) = stack.pop() {
            if Some(category.id) == skip {
                continue;
            }
            visit(category, level);
            let children: Vec<_> = self.children_of(category.id).collect();
            stack.extend(children.into_iter().rev().map(|c| (c, level + 1)));
        }
    }
}

/// Iterator over a category's ancestors. See [`CategoryForest::ancestors`].
pub struct Ancestors<'f, 'a> {
    forest: &'f CategoryForest<'a>,
    current: &'a Category,
}

impl<'a> Iterator for Ancestors<'_, 'a> {
    type Item = &'a Category;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = self.forest.get(self.current.parent()?)?;
        self.current = parent;
        Some(parent)
    }
}

fn indent_label(level: usize, name: &str) -> String {
    if level == 0 {
        name.to_string()
    } else {
        format!("{} {}", LEVEL_PREFIX.repeat(level), name)
    }
}

/// Ancestor-inclusive search.
///
/// Keeps every category whose display name contains `term`
/// (case-insensitive) plus all of its ancestors, in input order. A blank
/// term returns the list unchanged.
pub fn search_filter(categories: &[Category], term: &str) -> Result<Vec<Category>> {
    if term.trim().is_empty() {
        return Ok(categories.to_vec());
    }

    let forest = CategoryForest::new(categories)?;
    let needle = term.to_lowercase();
    let mut keep: HashSet<i64> = HashSet::new();

    for category in categories {
        if category.display_name().to_lowercase().contains(&needle) {
            keep.insert(category.id);
            keep.extend(forest.ancestors(category).map(|a| a.id));
        }
    }

    Ok(categories
        .iter()
        .filter(|c| keep.contains(&c.id))
        .cloned()
        .collect())
}

/// Orders categories for the interactive table: roots first, then by `sort`
/// ascending. The sort is stable, so equal keys keep their input order.
///
/// Sibling order is all the collapsible projection observes, so roots-first
/// plus `sort` yields the same rows as grouping non-roots by parent id.
pub fn sort_for_table(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        b.is_root()
            .cmp(&a.is_root())
            .then_with(|| a.sort_key().cmp(&b.sort_key()))
    });
}

/// Full pipeline behind the interactive table: search, sort, then project.
pub fn table_rows(
    categories: &[Category],
    search: &str,
    expanded: &HashSet<i64>,
) -> Result<Vec<DisplayNode>> {
    let mut visible = search_filter(categories, search)?;
    sort_for_table(&mut visible);
    let forest = CategoryForest::new(&visible)?;
    Ok(forest.project_collapsible(expanded))
}
