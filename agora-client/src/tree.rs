use std::collections::HashMap;

use crate::api::{Comment, CommentId};

/// A comment along with all the replies it received, in fetch order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

impl Drop for CommentNode {
    // Reply chains can be arbitrarily deep, do not recurse when freeing them
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl CommentNode {
    pub fn id(&self) -> CommentId {
        self.comment.id
    }

    /// Pre-order traversal of this node and all its descendants
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Number of comments in this subtree, including this one
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// 1 for a comment without replies
    pub fn depth(&self) -> usize {
        let mut res = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            res = res.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        res
    }

    pub fn find(&self, id: CommentId) -> Option<&CommentNode> {
        self.iter().find(|n| n.id() == id)
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a CommentNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CommentNode;

    fn next(&mut self) -> Option<&'a CommentNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

pub fn find_in(forest: &[CommentNode], id: CommentId) -> Option<&CommentNode> {
    forest.iter().find_map(|root| root.find(id))
}

pub fn forest_len(forest: &[CommentNode]) -> usize {
    forest.iter().map(|root| root.len()).sum()
}

const UNVISITED: u8 = 0;
const ON_PATH: u8 = 1;
const DONE: u8 = 2;

/// Builds the comment forest out of a flat list of comments.
///
/// Comments without a parent, or whose parent is not in `flat`, become roots.
/// Siblings keep the relative order they have in `flat`. If parent references
/// form a cycle, the member of the cycle that comes first in `flat` becomes a
/// root, so that every comment of `flat` appears exactly once in the result.
pub fn build_tree(flat: &[Comment]) -> Vec<CommentNode> {
    // With duplicate ids, replies attach to the last comment bearing the id
    let index = flat
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect::<HashMap<CommentId, usize>>();
    let mut parents = flat
        .iter()
        .map(|c| c.parent_comment_id.and_then(|p| index.get(&p).copied()))
        .collect::<Vec<Option<usize>>>();
    break_cycles(flat, &mut parents);

    let mut roots: Vec<usize> = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }
    assemble(flat, &roots, &children)
}

fn break_cycles(flat: &[Comment], parents: &mut [Option<usize>]) {
    let mut state = vec![UNVISITED; parents.len()];
    let mut path: Vec<usize> = Vec::new();
    for start in 0..parents.len() {
        let mut cur = start;
        loop {
            match state[cur] {
                DONE => break,
                ON_PATH => {
                    let cycle_start = path.iter().position(|i| *i == cur).unwrap_or(0);
                    if let Some(first) = path[cycle_start..].iter().min().copied() {
                        tracing::warn!(
                            comment = ?flat[first].id,
                            parent = ?flat[first].parent_comment_id,
                            "comment parents form a cycle, showing comment as top-level"
                        );
                        parents[first] = None;
                    }
                    break;
                }
                _ => {
                    state[cur] = ON_PATH;
                    path.push(cur);
                    match parents[cur] {
                        Some(p) => cur = p,
                        None => break,
                    }
                }
            }
        }
        for i in path.drain(..) {
            state[i] = DONE;
        }
    }
}

fn assemble(flat: &[Comment], roots: &[usize], children: &[Vec<usize>]) -> Vec<CommentNode> {
    let mut built = flat.iter().map(|_| None).collect::<Vec<Option<CommentNode>>>();
    // (index, children already built)
    let mut stack = roots.iter().rev().map(|r| (*r, false)).collect::<Vec<_>>();
    while let Some((i, ready)) = stack.pop() {
        if ready {
            let node_children = children[i]
                .iter()
                .filter_map(|c| built[*c].take())
                .collect();
            built[i] = Some(CommentNode {
                comment: flat[i].clone(),
                children: node_children,
            });
        } else {
            stack.push((i, true));
            stack.extend(children[i].iter().map(|c| (*c, false)));
        }
    }
    roots.iter().filter_map(|r| built[*r].take()).collect()
}
