//! The `Element` item, provides distinction for
//! Nodes, Ways and Relations as delivered by a source.

use crate::element::variants::{Node, OsmEntryId, Relation, Way};

#[derive(Clone, Debug)]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl Element {
    pub fn id(&self) -> i64 {
        match self {
            Element::Node(node) => node.id,
            Element::Way(way) => way.id,
            Element::Relation(relation) => relation.id,
        }
    }

    pub fn entry(&self) -> OsmEntryId {
        match self {
            Element::Node(node) => node.entry(),
            Element::Way(way) => way.entry(),
            Element::Relation(relation) => relation.entry(),
        }
    }
}

impl From<Node> for Element {
    fn from(value: Node) -> Self {
        Element::Node(value)
    }
}

impl From<Way> for Element {
    fn from(value: Way) -> Self {
        Element::Way(value)
    }
}

impl From<Relation> for Element {
    fn from(value: Relation) -> Self {
        Element::Relation(value)
    }
}
