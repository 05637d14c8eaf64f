use crate::element::{Element, Relation};
use crate::source::{Source, SourceError};

/// Entities held in memory, replayed in their given order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    elements: Vec<Element>,
}

impl MemorySource {
    pub fn new(elements: Vec<Element>) -> Self {
        MemorySource { elements }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }
}

impl FromIterator<Element> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        MemorySource::new(iter.into_iter().collect())
    }
}

impl Source for MemorySource {
    fn scan_relations<F>(&mut self, mut visit: F) -> Result<(), SourceError>
    where
        F: FnMut(Relation),
    {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Relation(relation) => Some(relation.clone()),
                _ => None,
            })
            .for_each(&mut visit);

        Ok(())
    }

    fn scan_entities<F>(&mut self, visit: F) -> Result<(), SourceError>
    where
        F: FnMut(Element),
    {
        self.elements.iter().cloned().for_each(visit);
        Ok(())
    }
}
