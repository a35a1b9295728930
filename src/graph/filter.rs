use super::entity::{DataSource, Node, NodeType};
use super::relationship::{Edge, EdgeType};

/// Conjunction of optional node criteria; omitted criteria always match.
///
/// ```
/// use biokg::graph::{NodeFilter, NodeType};
///
/// let filter = NodeFilter::new()
///     .node_type(NodeType::Gene)
///     .predicate(|n| n.label.starts_with("TP"));
/// # let _ = filter;
/// ```
#[derive(Default)]
pub struct NodeFilter<'a> {
    predicate: Option<Box<dyn Fn(&Node) -> bool + 'a>>,
    node_type: Option<NodeType>,
    source: Option<DataSource>,
}

impl<'a> NodeFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    pub fn source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn predicate(mut self, predicate: impl Fn(&Node) -> bool + 'a) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn matches(&self, node: &Node) -> bool {
        if let Some(node_type) = self.node_type {
            if node.node_type != node_type {
                return false;
            }
        }
        if let Some(source) = self.source {
            if node.source != source {
                return false;
            }
        }
        match &self.predicate {
            Some(predicate) => predicate(node),
            None => true,
        }
    }
}

/// Conjunction of optional edge criteria; omitted criteria always match.
#[derive(Default)]
pub struct EdgeFilter<'a> {
    predicate: Option<Box<dyn Fn(&Edge) -> bool + 'a>>,
    relation: Option<EdgeType>,
    min_weight: Option<f64>,
}

impl<'a> EdgeFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relation(mut self, relation: EdgeType) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn min_weight(mut self, min_weight: f64) -> Self {
        self.min_weight = Some(min_weight);
        self
    }

    pub fn predicate(mut self, predicate: impl Fn(&Edge) -> bool + 'a) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn matches(&self, edge: &Edge) -> bool {
        if let Some(relation) = self.relation {
            if edge.relation != relation {
                return false;
            }
        }
        if let Some(min_weight) = self.min_weight {
            if edge.weight < min_weight {
                return false;
            }
        }
        match &self.predicate {
            Some(predicate) => predicate(edge),
            None => true,
        }
    }
}
