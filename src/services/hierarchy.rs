//! Category hierarchy
//!
//! Turns a flat list of categories linked by parent ids into a forest sorted
//! by name at every level, and flattens that forest into the indented option
//! list used when picking a parent category.
//!
//! Nodes are first laid out in an id-indexed arena with parent links as
//! indices. Parent links are then resolved with an in-progress marker per
//! node, so a self reference or a longer cycle is cut at the node whose
//! parent is already on the chain being attached. That node becomes a root.
//! Only after the links form a proper forest are owned `CategoryNode`s built.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Category, CategoryId};

/// Prefix repeated once per level of depth in option labels
pub const INDENT_MARKER: &str = "— ";

/// A category together with its sorted subcategories
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn id(&self) -> CategoryId {
        self.category.id
    }

    pub fn name(&self) -> &str {
        &self.category.name
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        let mut len = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            len += 1;
            stack.extend(&node.children);
        }
        len
    }
}

// Parent chains can be arbitrarily long, so tear subtrees down with a work
// list instead of the default recursive drop.
impl Drop for CategoryNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// One row of a parent-selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    /// 0 for roots
    pub depth: usize,
    /// Name prefixed with `depth` indent markers
    pub label: String,
}

impl CategoryOption {
    fn new(node: &CategoryNode, depth: usize) -> Self {
        Self {
            id: node.id(),
            name: node.category.name.clone(),
            depth,
            label: format!("{}{}", INDENT_MARKER.repeat(depth), node.category.name),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Attach {
    Pending,
    InProgress,
    Done,
}

/// Build a name-sorted forest from a flat list of categories.
///
/// A category is a root when it has no parent, when its parent id is not in
/// `categories`, or when attaching it to its parent would close a cycle.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let mut index: HashMap<CategoryId, usize> = HashMap::with_capacity(categories.len());
    for (i, category) in categories.iter().enumerate() {
        index.entry(category.id).or_insert(i);
    }

    let mut parents: Vec<Option<usize>> = categories
        .iter()
        .map(|category| {
            let parent_id = category.parent_category_id?;
            let parent = index.get(&parent_id).copied();
            if parent.is_none() {
                debug!(
                    category = %category.id,
                    parent = %parent_id,
                    "parent not in input, treating category as root"
                );
            }
            parent
        })
        .collect();

    break_cycles(categories, &mut parents);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
    let mut roots = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    let sort_keys: Vec<String> = categories.iter().map(|c| c.name.to_lowercase()).collect();
    let by_name = |list: &mut Vec<usize>| list.sort_by(|a, b| sort_keys[*a].cmp(&sort_keys[*b]));
    by_name(&mut roots);
    for list in &mut children {
        by_name(list);
    }

    materialize(&roots, categories, &children)
}

/// Walk each node's ancestor chain, demoting the first node whose parent is
/// already on the chain.
fn break_cycles(categories: &[Category], parents: &mut [Option<usize>]) {
    let mut state = vec![Attach::Pending; parents.len()];
    let mut chain = Vec::new();

    for start in 0..parents.len() {
        if state[start] != Attach::Pending {
            continue;
        }

        let mut current = start;
        loop {
            state[current] = Attach::InProgress;
            chain.push(current);

            let Some(parent) = parents[current] else {
                break;
            };
            match state[parent] {
                Attach::Done => break,
                Attach::Pending => current = parent,
                Attach::InProgress => {
                    debug!(
                        category = %categories[current].id,
                        parent = %categories[parent].id,
                        "cyclic parent reference, treating category as root"
                    );
                    parents[current] = None;
                    break;
                }
            }
        }

        for node in chain.drain(..) {
            state[node] = Attach::Done;
        }
    }
}

/// Build owned nodes bottom-up so every child exists before its parent.
fn materialize(
    roots: &[usize],
    categories: &[Category],
    children: &[Vec<usize>],
) -> Vec<CategoryNode> {
    let mut order = Vec::with_capacity(categories.len());
    let mut stack = roots.to_vec();
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend_from_slice(&children[node]);
    }

    let mut built: Vec<Option<CategoryNode>> = (0..categories.len()).map(|_| None).collect();
    for &node in order.iter().rev() {
        let subtree = children[node]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[node] = Some(CategoryNode {
            category: categories[node].clone(),
            children: subtree,
        });
    }

    roots.iter().filter_map(|&root| built[root].take()).collect()
}

/// Flatten a forest into pre-order options, keeping the forest's order.
pub fn build_options(forest: &[CategoryNode]) -> Vec<CategoryOption> {
    let mut options = Vec::new();
    let mut stack: Vec<(&CategoryNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        options.push(CategoryOption::new(node, depth));
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;

    fn cat(id: i64, name: &str) -> Category {
        Category::new(id, name, CategoryKind::Expense)
    }

    fn child(id: i64, name: &str, parent: i64) -> Category {
        cat(id, name).with_parent(parent)
    }

    fn names(nodes: &[CategoryNode]) -> Vec<&str> {
        nodes.iter().map(CategoryNode::name).collect()
    }

    fn contains_id(node: &CategoryNode, id: CategoryId) -> bool {
        node.children
            .iter()
            .any(|c| c.id() == id || contains_id(c, id))
    }

    fn assert_no_self_descendant(nodes: &[CategoryNode]) {
        for node in nodes {
            assert!(
                !contains_id(node, node.id()),
                "{} appears below itself",
                node.id()
            );
            assert_no_self_descendant(&node.children);
        }
    }

    #[test]
    fn test_roots_and_children() {
        let forest = build_tree(&[
            cat(1, "Operating"),
            child(2, "Rent", 1),
            child(3, "Utilities", 1),
            cat(4, "Sales"),
        ]);

        assert_eq!(names(&forest), vec!["Operating", "Sales"]);
        assert_eq!(names(&forest[0].children), vec!["Rent", "Utilities"]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let forest = build_tree(&[cat(1, "Travel"), child(2, "Orphan", 99)]);

        assert_eq!(names(&forest), vec!["Orphan", "Travel"]);
        assert_eq!(forest[0].category.parent_category_id, Some(CategoryId::new(99)));
    }

    #[test]
    fn test_child_listed_once() {
        let forest = build_tree(&[child(2, "Rent", 1), cat(1, "Operating")]);
        let total: usize = forest.iter().map(CategoryNode::subtree_len).sum();
        assert_eq!(total, 2);
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn test_sorting_is_case_insensitive_at_every_level() {
        let forest = build_tree(&[
            cat(1, "beta"),
            cat(2, "Alpha"),
            cat(3, "gamma"),
            child(4, "zeta", 2),
            child(5, "Eta", 2),
            child(6, "delta", 2),
            child(7, "Omega", 4),
            child(8, "alpha", 4),
        ]);

        assert_eq!(names(&forest), vec!["Alpha", "beta", "gamma"]);
        assert_eq!(names(&forest[0].children), vec!["delta", "Eta", "zeta"]);
        assert_eq!(names(&forest[0].children[2].children), vec!["alpha", "Omega"]);
    }

    #[test]
    fn test_equal_names_keep_input_order() {
        let forest = build_tree(&[cat(1, "rent"), cat(2, "Rent")]);
        let ids: Vec<_> = forest.iter().map(|n| n.id().value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_self_reference_terminates_as_root() {
        let forest = build_tree(&[child(1, "Loop", 1), child(2, "Inner", 1)]);

        assert_eq!(names(&forest), vec!["Loop"]);
        assert_eq!(names(&forest[0].children), vec!["Inner"]);
        assert_no_self_descendant(&forest);
    }

    #[test]
    fn test_three_cycle_terminates() {
        // A -> B -> C -> A
        let forest = build_tree(&[child(1, "A", 2), child(2, "B", 3), child(3, "C", 1)]);

        let total: usize = forest.iter().map(CategoryNode::subtree_len).sum();
        assert_eq!(total, 3);
        assert_eq!(forest.len(), 1);
        assert_no_self_descendant(&forest);

        // Walking from A reaches C last, so C is cut loose.
        assert_eq!(forest[0].name(), "C");
        assert_eq!(names(&forest[0].children), vec!["B"]);
        assert_eq!(names(&forest[0].children[0].children), vec!["A"]);
    }

    #[test]
    fn test_cycle_with_tail() {
        // D hangs off a two-cycle between A and B.
        let forest = build_tree(&[
            child(4, "D", 1),
            child(1, "A", 2),
            child(2, "B", 1),
            cat(3, "Standalone"),
        ]);

        let total: usize = forest.iter().map(CategoryNode::subtree_len).sum();
        assert_eq!(total, 4);
        assert_no_self_descendant(&forest);
        let options = build_options(&forest);
        assert_eq!(options.len(), 4);
    }

    #[test]
    fn test_long_parent_chain() {
        let depth = 200_000;
        let mut categories = vec![cat(0, "level 0")];
        categories.extend((1..depth).map(|i| child(i, &format!("level {}", i), i - 1)));

        let forest = build_tree(&categories);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].subtree_len(), depth as usize);

        let options = build_options(&forest);
        assert_eq!(options.len(), depth as usize);
        assert_eq!(options[depth as usize - 1].depth, depth as usize - 1);
        assert_eq!(options[depth as usize - 1].name, format!("level {}", depth - 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&[]).is_empty());
        assert!(build_options(&[]).is_empty());
    }

    #[test]
    fn test_options_pre_order_with_labels() {
        let forest = build_tree(&[
            cat(1, "Expenses"),
            child(2, "Rent", 1),
            child(3, "Office", 1),
            child(4, "Paper", 3),
            cat(5, "Assets"),
        ]);
        let options = build_options(&forest);

        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Assets", "Expenses", "— Office", "— — Paper", "— Rent"]
        );
        let depths: Vec<_> = options.iter().map(|o| o.depth).collect();
        assert_eq!(depths, vec![0, 0, 1, 2, 1]);
        assert_eq!(options[3].name, "Paper");
        assert_eq!(options[3].id, CategoryId::new(4));
    }

    #[test]
    fn test_depth_matches_ancestor_chain_length() {
        let categories = vec![
            cat(1, "L0"),
            child(2, "L1", 1),
            child(3, "L2", 2),
            child(4, "L3", 3),
            child(5, "L1b", 1),
            child(6, "dangling", 42),
        ];
        let options = build_options(&build_tree(&categories));
        let by_id: HashMap<_, _> = categories.iter().map(|c| (c.id, c)).collect();

        for option in &options {
            let mut chain = 0;
            let mut current = by_id[&option.id].parent_category_id;
            while let Some(parent) = current.and_then(|id| by_id.get(&id)) {
                chain += 1;
                current = parent.parent_category_id;
            }
            assert_eq!(option.depth, chain, "depth of {}", option.name);
        }
    }

    #[test]
    fn test_parent_precedes_descendants() {
        let categories = vec![
            child(10, "leaf", 11),
            child(11, "mid", 12),
            cat(12, "top"),
            child(13, "other leaf", 12),
        ];
        let options = build_options(&build_tree(&categories));
        let position: HashMap<_, _> = options
            .iter()
            .enumerate()
            .map(|(i, o)| (o.id, i))
            .collect();

        for category in &categories {
            if let Some(parent) = category.parent_category_id {
                assert!(position[&parent] < position[&category.id]);
            }
        }
    }
}
