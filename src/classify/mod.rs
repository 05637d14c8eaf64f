//! Decides whether a filtered entity becomes a [`Road`], a [`Poi`], or nothing.
//!
//! Classification walks the ordered [`RULES`] table once per entity and
//! takes the first rule accepting both the entity's shape and its tags.

pub mod poi;
pub mod road;
pub mod road_class;
pub mod rules;


#[doc(inline)]
pub use poi::{Poi, PoiGeometry, PoiSource};
#[doc(inline)]
pub use road::Road;
#[doc(inline)]
pub use road_class::RoadClass;
#[doc(inline)]
pub use rules::{Category, Predicate, Rule, Shape, RULES};

use geo::{ChamberlainDuquetteArea, Polygon};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use strum::IntoEnumIterator;

use crate::config::ClassifyConfig;
use crate::element::{Node, TagString, Tags, Way};
use crate::filter::{Filtered, TagFilter};

/// Closed ways smaller than this (m²) are reduced to their centroid.
pub const DEFAULT_AREA_THRESHOLD: f64 = 2_500.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Road(Road),
    Poi(Poi),
}

#[derive(Debug, Clone)]
pub struct Classifier {
    filter: TagFilter,
    roadways: FxHashSet<RoadClass>,
    area_threshold: f64,
    rules: &'static [Rule],
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(
            TagFilter::default(),
            RoadClass::iter(),
            DEFAULT_AREA_THRESHOLD,
        )
    }
}

impl Classifier {
    pub fn new(
        filter: TagFilter,
        roadways: impl IntoIterator<Item = RoadClass>,
        area_threshold: f64,
    ) -> Self {
        Classifier {
            filter,
            roadways: roadways.into_iter().collect(),
            area_threshold,
            rules: &RULES,
        }
    }

    pub fn from_config(filter: TagFilter, config: &ClassifyConfig) -> Self {
        match &config.roadways {
            Some(roadways) => Classifier::new(filter, roadways.iter().copied(), config.area_threshold),
            None => Classifier::new(filter, RoadClass::iter(), config.area_threshold),
        }
    }

    #[inline]
    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    /// Filters the tags, then applies the inherited street name.
    /// `None` once the filter leaves nothing behind.
    fn prepare(&self, tags: Tags, street: Option<&str>) -> Option<Tags> {
        let Filtered { mut tags, empty } = self.filter.filter(tags);
        if empty {
            return None;
        }

        if let Some(street) = street {
            tags.insert(TagString::ADDR_STREET, street);
        }

        Some(tags)
    }

    fn rule_for(&self, shape: Shape, tags: &Tags) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.accepts(shape, tags, &self.roadways))
    }

    pub fn classify_node(&self, node: Node, street: Option<&str>) -> Option<Classified> {
        let tags = self.prepare(node.tags, street)?;

        match self.rule_for(Shape::Point, &tags)?.category {
            Category::Poi => Some(Classified::Poi(Poi::new(
                PoiSource::Node(node.id),
                tags,
                PoiGeometry::Point(node.position),
            ))),
            Category::Road => None,
        }
    }

    /// Classifies a way. `rel_ids` are the restriction relations the
    /// way belongs to and only survive if it becomes a road.
    pub fn classify_way(
        &self,
        way: Way,
        street: Option<&str>,
        rel_ids: IndexSet<i64>,
    ) -> Option<Classified> {
        let shape = if way.is_closed() {
            Shape::Area
        } else {
            Shape::Line
        };

        match shape {
            Shape::Line if way.vertex_count() < 2 => return None,
            Shape::Area if way.vertex_count() < 4 => return None,
            _ => {}
        }

        let tags = self.prepare(way.tags, street)?;

        match self.rule_for(shape, &tags)?.category {
            Category::Road => Some(Classified::Road(Road::new(
                way.id,
                tags,
                rel_ids,
                way.geometry,
            ))),
            Category::Poi => {
                let polygon = Polygon::new(way.geometry, vec![]);
                let geometry = if polygon.chamberlain_duquette_unsigned_area() < self.area_threshold {
                    PoiGeometry::Polygon(polygon)
                        .representative_point()
                        .map(PoiGeometry::Point)?
                } else {
                    PoiGeometry::Polygon(polygon)
                };

                Some(Classified::Poi(Poi::new(PoiSource::Way(way.id), tags, geometry)))
            }
        }
    }
}
