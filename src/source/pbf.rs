//! Reads `.osm.pbf` extracts.
//!
//! Way geometry is resolved from a cache of every node position seen
//! earlier in the stream, so the input must be sorted with nodes
//! ahead of ways, as extracts are.

use std::path::{Path, PathBuf};

use geo::{Coord, LineString, Point};
use log::{debug, warn};
use osmpbf::{ElementReader, RelMemberType};
use rustc_hash::FxHashMap;

use crate::element::{
    Element, MemberType, Node, OsmEntryId, Reference, References, Relation, Tags, Way,
};
use crate::source::{Source, SourceError};

#[derive(Debug, Clone)]
pub struct PbfSource {
    path: PathBuf,
}

impl PbfSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        PbfSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn reader(&self) -> Result<ElementReader<std::io::BufReader<std::fs::File>>, SourceError> {
        ElementReader::from_path(&self.path).map_err(|err| SourceError::Open(self.path.clone(), err))
    }
}

impl From<&RelMemberType> for MemberType {
    fn from(value: &RelMemberType) -> Self {
        match value {
            RelMemberType::Node => MemberType::Node,
            RelMemberType::Way => MemberType::Way,
            RelMemberType::Relation => MemberType::Relation,
        }
    }
}

fn relation(relation: &osmpbf::Relation) -> Relation {
    let refs = relation
        .members()
        .map(|member| {
            let id = OsmEntryId::new(member.member_id, MemberType::from(&member.member_type));
            Reference::with_role(id, member.role().unwrap_or_default())
        })
        .collect::<References>();

    Relation::new(relation.id(), relation.tags().collect::<Tags>(), refs)
}

impl Source for PbfSource {
    fn scan_relations<F>(&mut self, mut visit: F) -> Result<(), SourceError>
    where
        F: FnMut(Relation),
    {
        self.reader()?.for_each(|element| {
            if let osmpbf::Element::Relation(inner) = element {
                visit(relation(&inner));
            }
        })?;

        Ok(())
    }

    fn scan_entities<F>(&mut self, mut visit: F) -> Result<(), SourceError>
    where
        F: FnMut(Element),
    {
        let mut positions: FxHashMap<i64, Coord> = FxHashMap::default();
        let mut unresolved = 0usize;

        self.reader()?.for_each(|element| match element {
            osmpbf::Element::Node(node) => {
                let position = Coord { x: node.lon(), y: node.lat() };
                positions.insert(node.id(), position);
                visit(Element::Node(Node::new(
                    node.id(),
                    Point(position),
                    node.tags().collect(),
                )));
            }
            osmpbf::Element::DenseNode(node) => {
                let position = Coord { x: node.lon(), y: node.lat() };
                positions.insert(node.id(), position);
                visit(Element::Node(Node::new(
                    node.id(),
                    Point(position),
                    node.tags().collect(),
                )));
            }
            osmpbf::Element::Way(way) => {
                let refs = way.refs().collect::<Vec<_>>();
                let coords = refs
                    .iter()
                    .filter_map(|id| positions.get(id).copied())
                    .collect::<Vec<_>>();

                if coords.len() != refs.len() {
                    unresolved += 1;
                }

                visit(Element::Way(Way::new(
                    way.id(),
                    LineString::new(coords),
                    way.tags().collect(),
                )));
            }
            osmpbf::Element::Relation(inner) => visit(Element::Relation(relation(&inner))),
        })?;

        if unresolved > 0 {
            warn!("{unresolved} ways referenced nodes missing from the extract");
        }

        debug!("Cached {} node positions", positions.len());
        Ok(())
    }
}
