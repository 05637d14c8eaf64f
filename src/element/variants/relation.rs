use super::common::{OsmEntryId, References, Tags, TagString};

#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    pub id: i64,
    pub tags: Tags,
    pub refs: References,
}

impl Relation {
    pub fn new(id: i64, tags: Tags, refs: References) -> Self {
        Self { id, tags, refs }
    }

    #[inline]
    pub fn entry(&self) -> OsmEntryId {
        OsmEntryId::relation(self.id)
    }

    /// The declared `type=*` of the relation.
    #[inline]
    pub fn kind(&self) -> Option<&str> {
        self.tags.get(TagString::TYPE)
    }

    /// Members holding `role`, in declaration order.
    pub fn members_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = OsmEntryId> + 'a {
        self.refs
            .iter()
            .filter(move |reference| reference.has_role(role))
            .map(|reference| reference.id)
    }
}
