//! Per-method route tree.
//!
//! # Responsibilities
//! - Insert route patterns segment by segment
//! - Keep sibling nodes ordered for traversal
//! - Find the endpoint that consumes a request path completely
//!
//! # Design Decisions
//! - Nodes live in an arena (`Vec`) and refer to children by index
//! - No parent pointers: matching is top-down only
//! - Depth-first descent with backtracking over ordered siblings
//! - Immutable once serving starts (`&self` lookups)

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::routing::matcher::{split_segments, Rank, Segment};
use crate::routing::params::Params;

const ROOT: usize = 0;

/// How siblings are ordered before traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingOrder {
    /// Descending priority only. Literal, parameter and wildcard siblings
    /// compete on how many registrations pass through them.
    #[default]
    Priority,
    /// Literal, then wildcard, then parameter; priority breaks ties.
    Specificity,
}

/// Position of a named parameter within a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSlot {
    pub name: String,
    pub position: usize,
}

/// A registered route at the node where its pattern ends.
#[derive(Debug)]
pub struct Endpoint<H> {
    pattern: String,
    params: Vec<ParamSlot>,
    wildcard: bool,
    handler: H,
}

impl<H> Endpoint<H> {
    /// Normalized pattern text, e.g. `/users/:id`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Whether the pattern ends in a wildcard segment.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn param_slots(&self) -> &[ParamSlot] {
        &self.params
    }

    /// Replay the registered parameter positions against a request path.
    pub fn bind(&self, segments: &[&str]) -> Params {
        self.params
            .iter()
            .filter_map(|slot| {
                segments
                    .get(slot.position)
                    .map(|value| (slot.name.as_str(), *value))
            })
            .collect()
    }
}

#[derive(Debug)]
struct Node<H> {
    /// `None` only for the root, which stands for `/`.
    segment: Option<Segment>,
    endpoint: Option<Endpoint<H>>,
    children: Vec<usize>,
    priority: u32,
}

impl<H> Node<H> {
    fn new(segment: Option<Segment>) -> Self {
        Self {
            segment,
            endpoint: None,
            children: Vec::new(),
            priority: 0,
        }
    }

    fn rank(&self) -> Rank {
        self.segment.as_ref().map(Segment::rank).unwrap_or(Rank::Literal)
    }
}

/// Prefix tree over path segments for a single HTTP method.
#[derive(Debug)]
pub struct RouteTree<H> {
    nodes: Vec<Node<H>>,
    case_sensitive: bool,
    order: SiblingOrder,
}

impl<H> Default for RouteTree<H> {
    fn default() -> Self {
        Self::new(true, SiblingOrder::default())
    }
}

impl<H> RouteTree<H> {
    pub fn new(case_sensitive: bool, order: SiblingOrder) -> Self {
        Self {
            nodes: vec![Node::new(None)],
            case_sensitive,
            order,
        }
    }

    /// Register `handler` under `pattern`.
    ///
    /// Returns the handler previously registered for the same pattern, if
    /// any; the new one replaces it. Every node on the way gains one unit
    /// of priority, including on replacement.
    pub fn insert(&mut self, pattern: &str, handler: H) -> Option<H> {
        let mut current = ROOT;
        let mut params = Vec::new();
        let mut normalized = String::new();

        self.nodes[ROOT].priority += 1;

        for (position, raw) in split_segments(pattern).into_iter().enumerate() {
            let segment = Segment::parse(raw);
            if let Segment::Param(name) = &segment {
                params.push(ParamSlot {
                    name: name.clone(),
                    position,
                });
            }
            normalized.push('/');
            normalized.push_str(raw);

            let child = match self.find_child(current, &segment) {
                Some(child) => child,
                None => self.push_child(current, segment),
            };
            self.nodes[child].priority += 1;
            self.sort_children(current);
            current = child;
        }

        if normalized.is_empty() {
            normalized.push('/');
        }

        let wildcard = matches!(self.nodes[current].segment, Some(Segment::Wildcard { .. }));
        let endpoint = Endpoint {
            pattern: normalized,
            params,
            wildcard,
            handler,
        };

        self.nodes[current]
            .endpoint
            .replace(endpoint)
            .map(|previous| previous.handler)
    }

    /// Find the endpoint whose pattern consumes every segment of the path.
    ///
    /// A path that only reaches a transit node (no endpoint) is a miss.
    pub fn find(&self, segments: &[&str]) -> Option<&Endpoint<H>> {
        self.descend(ROOT, segments, 0)
    }

    /// All endpoints in the tree, in arena order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint<H>> {
        self.nodes.iter().filter_map(|node| node.endpoint.as_ref())
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.endpoints().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn descend(&self, node: usize, segments: &[&str], depth: usize) -> Option<&Endpoint<H>> {
        let current = &self.nodes[node];
        if depth == segments.len() {
            return current.endpoint.as_ref();
        }

        let is_last = depth + 1 == segments.len();
        current
            .children
            .iter()
            .copied()
            .filter(|&child| self.admits(child, segments[depth], is_last))
            .find_map(|child| self.descend(child, segments, depth + 1))
    }

    fn admits(&self, node: usize, segment: &str, is_last: bool) -> bool {
        self.nodes[node]
            .segment
            .as_ref()
            .map(|s| s.admits(segment, is_last, self.case_sensitive))
            .unwrap_or(false)
    }

    fn find_child(&self, parent: usize, segment: &Segment) -> Option<usize> {
        self.nodes[parent].children.iter().copied().find(|&child| {
            self.nodes[child]
                .segment
                .as_ref()
                .map(|s| s.same_key(segment, self.case_sensitive))
                .unwrap_or(false)
        })
    }

    fn push_child(&mut self, parent: usize, segment: Segment) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node::new(Some(segment)));
        self.nodes[parent].children.push(idx);
        idx
    }

    fn sort_children(&mut self, parent: usize) {
        let mut children = std::mem::take(&mut self.nodes[parent].children);
        let nodes = &self.nodes;
        // Stable: equal keys keep registration order.
        match self.order {
            SiblingOrder::Priority => {
                children.sort_by_key(|&c| Reverse(nodes[c].priority));
            }
            SiblingOrder::Specificity => {
                children.sort_by_key(|&c| (nodes[c].rank(), Reverse(nodes[c].priority)));
            }
        }
        self.nodes[parent].children = children;
    }
}
