//! Map graphic parsing.
//!
//! Turns an SVG document into a set of regions keyed by element id. Only the
//! geometry is kept: fills, strokes and CSS from the file are ignored since
//! the quiz decides how every region is painted.

use crate::error::LoadError;
use geo::{BoundingRect, Contains, TriangulateEarcut};
use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon, Rect};
use glam::{DAffine2, DVec2};
use std::collections::HashMap;
use std::str::FromStr;

/// Number of line segments used to approximate one curve segment.
const CURVE_STEPS: usize = 8;

/// Number of points used to approximate circles and ellipses.
const ELLIPSE_STEPS: usize = 32;

/// Container elements whose content is never drawn directly.
const NON_RENDERED: &[&str] = &[
    "defs", "clipPath", "mask", "pattern", "symbol", "marker", "style", "title", "desc",
    "metadata",
];

/// Elements that carry drawable geometry.
const SHAPES: &[&str] = &[
    "path", "polygon", "polyline", "rect", "circle", "ellipse",
];

/// One clickable area of the map.
#[derive(Debug, Clone)]
pub struct Region {
    /// Element id, matched against country identifiers.
    pub id: String,
    /// Geometry in map (SVG user) space.
    pub shape: MultiPolygon<f64>,
    /// Bounding box of `shape`.
    pub bounds: Rect<f64>,
    /// Fill triangles in map space, computed once at load.
    pub triangles: Vec<[Coord<f64>; 3]>,
}

impl Region {
    fn new(id: String, shape: MultiPolygon<f64>) -> Option<Self> {
        let bounds = shape.bounding_rect()?;
        let triangles = shape
            .0
            .iter()
            .flat_map(|polygon| polygon.earcut_triangles())
            .map(|t| t.to_array())
            .collect();

        Some(Self {
            id,
            shape,
            bounds,
            triangles,
        })
    }

    /// Whether a map-space point lies inside the region.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        let min = self.bounds.min();
        let max = self.bounds.max();
        if point.x < min.x || point.x > max.x || point.y < min.y || point.y > max.y {
            return false;
        }
        self.shape.contains(&Point::from(point))
    }

    /// Outline rings (exteriors and holes) for stroking.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.shape
            .0
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors().iter()))
    }
}

/// A parsed map graphic.
#[derive(Debug, Clone)]
pub struct MapGraphic {
    /// Regions in document order (later regions are drawn on top).
    pub regions: Vec<Region>,
    /// Area of map space to fit into the canvas.
    pub bounds: Rect<f64>,
    by_id: HashMap<String, usize>,
}

impl MapGraphic {
    /// Parses SVG text into regions.
    ///
    /// A region is an element with an `id` attribute that has drawable
    /// geometry. A group whose id satisfies `is_country` is always a single
    /// region, whatever its children are called. Other groups with an id become
    /// a region unless one of their descendants is itself an id'd shape, in
    /// which case the group is only a container (e.g. an editor layer) and its
    /// children are regions.
    pub fn parse(svg: &str, is_country: impl Fn(&str) -> bool) -> Result<Self, LoadError> {
        let doc = roxmltree::Document::parse(svg)?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(LoadError::Map(format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }

        let mut regions = Vec::new();
        let root_transform = parse_transform(root)?;
        for child in root.children().filter(|n| n.is_element()) {
            collect_regions(child, root_transform, &is_country, &mut regions)?;
        }

        if regions.is_empty() {
            return Err(LoadError::Map("no regions with an id found".to_string()));
        }

        let bounds = match parse_view_box(root) {
            Some(view_box) => view_box,
            None => union_bounds(&regions),
        };

        let mut by_id = HashMap::with_capacity(regions.len());
        for (idx, region) in regions.iter().enumerate() {
            if by_id.insert(region.id.clone(), idx).is_some() {
                log::warn!("Duplicate region id '{}' in map graphic", region.id);
            }
        }

        Ok(Self {
            regions,
            bounds,
            by_id,
        })
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.by_id.get(id).map(|&idx| &self.regions[idx])
    }

    /// Region ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.id.as_str())
    }

    /// Top-most region under a map-space point.
    pub fn region_at(&self, point: Coord<f64>) -> Option<&Region> {
        self.regions.iter().rev().find(|r| r.contains(point))
    }
}

fn collect_regions(
    node: roxmltree::Node<'_, '_>,
    parent_transform: DAffine2,
    is_country: &dyn Fn(&str) -> bool,
    regions: &mut Vec<Region>,
) -> Result<(), LoadError> {
    let name = node.tag_name().name();
    if NON_RENDERED.contains(&name) {
        return Ok(());
    }

    let transform = parent_transform * parse_transform(node)?;

    if let Some(id) = node.attribute("id") {
        let is_container = name == "g" && !is_country(id) && has_identified_shape(node);
        if !is_container {
            let mut rings = Vec::new();
            collect_rings(node, transform, &mut rings)?;
            if let Some(region) = Region::new(id.to_string(), rings_to_shape(rings)) {
                regions.push(region);
            }
            return Ok(());
        }
    }

    for child in node.children().filter(|n| n.is_element()) {
        collect_regions(child, transform, is_country, regions)?;
    }
    Ok(())
}

/// Whether any descendant shape (or group of shapes) carries its own id.
fn has_identified_shape(node: roxmltree::Node<'_, '_>) -> bool {
    node.descendants().skip(1).any(|d| {
        d.is_element()
            && d.attribute("id").is_some()
            && (SHAPES.contains(&d.tag_name().name()) || d.tag_name().name() == "g")
            && !d
                .ancestors()
                .any(|a| NON_RENDERED.contains(&a.tag_name().name()))
    })
}

fn collect_rings(
    node: roxmltree::Node<'_, '_>,
    transform: DAffine2,
    rings: &mut Vec<Vec<Coord<f64>>>,
) -> Result<(), LoadError> {
    let name = node.tag_name().name();
    if NON_RENDERED.contains(&name) {
        return Ok(());
    }

    let points: Vec<Vec<DVec2>> = match name {
        "path" => node.attribute("d").map(path_rings).unwrap_or_default(),
        "polygon" | "polyline" => node
            .attribute("points")
            .map(|s| {
                vec![svgtypes::PointsParser::from(s)
                    .map(|(x, y)| DVec2::new(x, y))
                    .collect()]
            })
            .unwrap_or_default(),
        "rect" => rect_ring(node).into_iter().collect(),
        "circle" => {
            let r = number_attr(node, "r");
            ellipse_ring(node, r, r).into_iter().collect()
        }
        "ellipse" => {
            ellipse_ring(node, number_attr(node, "rx"), number_attr(node, "ry"))
                .into_iter()
                .collect()
        }
        _ => Vec::new(),
    };

    for ring in points {
        if ring.len() >= 3 {
            rings.push(
                ring.into_iter()
                    .map(|p| {
                        let p = transform.transform_point2(p);
                        Coord { x: p.x, y: p.y }
                    })
                    .collect(),
            );
        }
    }

    for child in node.children().filter(|n| n.is_element()) {
        let child_transform = transform * parse_transform(child)?;
        collect_rings(child, child_transform, rings)?;
    }
    Ok(())
}

/// Flattens path data into closed rings of absolute points.
fn path_rings(data: &str) -> Vec<Vec<DVec2>> {
    let mut rings = Vec::new();
    let mut current: Vec<DVec2> = Vec::new();
    let mut cursor = DVec2::ZERO;

    for segment in svgtypes::SimplifyingPathParser::from(data) {
        let segment = match segment {
            Ok(segment) => segment,
            Err(e) => {
                // Keep what was parsed so far, like a browser does.
                log::warn!("Malformed path data: {}", e);
                break;
            }
        };

        match segment {
            svgtypes::SimplePathSegment::MoveTo { x, y } => {
                if current.len() >= 3 {
                    rings.push(std::mem::take(&mut current));
                }
                current.clear();
                cursor = DVec2::new(x, y);
                current.push(cursor);
            }
            svgtypes::SimplePathSegment::LineTo { x, y } => {
                cursor = DVec2::new(x, y);
                current.push(cursor);
            }
            svgtypes::SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let (p0, p1, p2, p3) = (
                    cursor,
                    DVec2::new(x1, y1),
                    DVec2::new(x2, y2),
                    DVec2::new(x, y),
                );
                for step in 1..=CURVE_STEPS {
                    let t = step as f64 / CURVE_STEPS as f64;
                    let mt = 1.0 - t;
                    current.push(
                        p0 * mt * mt * mt
                            + p1 * 3.0 * mt * mt * t
                            + p2 * 3.0 * mt * t * t
                            + p3 * t * t * t,
                    );
                }
                cursor = p3;
            }
            svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                let (p0, p1, p2) = (cursor, DVec2::new(x1, y1), DVec2::new(x, y));
                for step in 1..=CURVE_STEPS {
                    let t = step as f64 / CURVE_STEPS as f64;
                    let mt = 1.0 - t;
                    current.push(p0 * mt * mt + p1 * 2.0 * mt * t + p2 * t * t);
                }
                cursor = p2;
            }
            svgtypes::SimplePathSegment::ClosePath => {
                if let Some(&start) = current.first() {
                    cursor = start;
                }
                if current.len() >= 3 {
                    rings.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(cursor);
            }
        }
    }

    if current.len() >= 3 {
        rings.push(current);
    }
    rings
}

fn rect_ring(node: roxmltree::Node<'_, '_>) -> Option<Vec<DVec2>> {
    let (x, y) = (number_attr(node, "x"), number_attr(node, "y"));
    let (w, h) = (number_attr(node, "width"), number_attr(node, "height"));
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(vec![
        DVec2::new(x, y),
        DVec2::new(x + w, y),
        DVec2::new(x + w, y + h),
        DVec2::new(x, y + h),
    ])
}

fn ellipse_ring(node: roxmltree::Node<'_, '_>, rx: f64, ry: f64) -> Option<Vec<DVec2>> {
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let center = DVec2::new(number_attr(node, "cx"), number_attr(node, "cy"));
    Some(
        (0..ELLIPSE_STEPS)
            .map(|i| {
                let angle = i as f64 / ELLIPSE_STEPS as f64 * std::f64::consts::TAU;
                center + DVec2::new(rx * angle.cos(), ry * angle.sin())
            })
            .collect(),
    )
}

fn number_attr(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|s| svgtypes::Length::from_str(s).ok())
        .map(|length| length.number)
        .unwrap_or(0.0)
}

fn parse_transform(node: roxmltree::Node<'_, '_>) -> Result<DAffine2, LoadError> {
    let Some(value) = node.attribute("transform") else {
        return Ok(DAffine2::IDENTITY);
    };
    let t = svgtypes::Transform::from_str(value)
        .map_err(|e| LoadError::Map(format!("bad transform '{}': {}", value, e)))?;
    Ok(DAffine2::from_cols_array(&[t.a, t.b, t.c, t.d, t.e, t.f]))
}

fn parse_view_box(root: roxmltree::Node<'_, '_>) -> Option<Rect<f64>> {
    let view_box = svgtypes::ViewBox::from_str(root.attribute("viewBox")?).ok()?;
    if view_box.w <= 0.0 || view_box.h <= 0.0 {
        return None;
    }
    Some(Rect::new(
        Coord {
            x: view_box.x,
            y: view_box.y,
        },
        Coord {
            x: view_box.x + view_box.w,
            y: view_box.y + view_box.h,
        },
    ))
}

fn union_bounds(regions: &[Region]) -> Rect<f64> {
    let (mut min, mut max) = (regions[0].bounds.min(), regions[0].bounds.max());
    for region in &regions[1..] {
        min.x = min.x.min(region.bounds.min().x);
        min.y = min.y.min(region.bounds.min().y);
        max.x = max.x.max(region.bounds.max().x);
        max.y = max.y.max(region.bounds.max().y);
    }
    Rect::new(min, max)
}

/// Builds polygons from rings; a ring lying inside an earlier polygon becomes its hole.
fn rings_to_shape(rings: Vec<Vec<Coord<f64>>>) -> MultiPolygon<f64> {
    let mut polygons: Vec<Polygon<f64>> = Vec::new();

    for ring in rings {
        let first = Point::from(ring[0]);
        let parent = polygons
            .iter_mut()
            .find(|p| Polygon::new(p.exterior().clone(), vec![]).contains(&first));

        match parent {
            Some(parent) => parent.interiors_push(LineString::new(ring)),
            None => polygons.push(Polygon::new(LineString::new(ring), vec![])),
        }
    }

    MultiPolygon::new(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(svg: &str) -> Result<MapGraphic, LoadError> {
        MapGraphic::parse(svg, |_| false)
    }

    const WORLD: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50">
  <defs>
    <pattern id="existing" width="4" height="4"><rect id="tile" width="4" height="4"/></pattern>
  </defs>
  <rect width="100" height="50" fill="#aad3df"/>
  <g id="layer1">
    <path id="A1" d="M 0 0 L 10 0 L 10 10 L 0 10 Z"/>
    <path id="B2" d="m 20 0 h 10 v 10 h -10 z"/>
    <g id="C3" transform="translate(40 0)">
      <rect x="0" y="0" width="5" height="5"/>
      <rect x="10" y="0" width="5" height="5"/>
    </g>
    <polygon id="D4" points="60,0 70,0 70,10 60,10" transform="scale(0.5)"/>
    <path id="E5" d="M 0 20 L 20 20 L 20 40 L 0 40 Z M 5 25 L 15 25 L 15 35 L 5 35 Z"/>
    <g id="empty"></g>
  </g>
</svg>"##;

    #[test]
    fn test_parse_regions() {
        let map = parse(WORLD).unwrap();
        let ids: Vec<&str> = map.ids().collect();
        assert_eq!(ids, vec!["A1", "B2", "C3", "D4", "E5"]);

        assert_eq!(map.bounds.min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(map.bounds.max(), Coord { x: 100.0, y: 50.0 });
    }

    #[test]
    fn test_relative_path_commands() {
        let map = parse(WORLD).unwrap();
        let b2 = map.region("B2").unwrap();
        assert_eq!(b2.bounds.min(), Coord { x: 20.0, y: 0.0 });
        assert_eq!(b2.bounds.max(), Coord { x: 30.0, y: 10.0 });
    }

    #[test]
    fn test_group_region_with_transform() {
        let map = parse(WORLD).unwrap();
        let c3 = map.region("C3").unwrap();
        assert_eq!(c3.shape.0.len(), 2);
        assert!(c3.contains(Coord { x: 42.0, y: 2.0 }));
        assert!(c3.contains(Coord { x: 52.0, y: 2.0 }));
        assert!(!c3.contains(Coord { x: 47.5, y: 2.0 }));

        let d4 = map.region("D4").unwrap();
        assert_eq!(d4.bounds.min(), Coord { x: 30.0, y: 0.0 });
        assert_eq!(d4.bounds.max(), Coord { x: 35.0, y: 5.0 });
    }

    #[test]
    fn test_inner_ring_is_a_hole() {
        let map = parse(WORLD).unwrap();
        let e5 = map.region("E5").unwrap();
        assert_eq!(e5.shape.0.len(), 1);
        assert_eq!(e5.shape.0[0].interiors().len(), 1);
        assert!(e5.contains(Coord { x: 2.0, y: 22.0 }));
        assert!(!e5.contains(Coord { x: 10.0, y: 30.0 }));
        assert!(!e5.triangles.is_empty());
    }

    #[test]
    fn test_region_at() {
        let map = parse(WORLD).unwrap();
        assert_eq!(map.region_at(Coord { x: 5.0, y: 5.0 }).map(|r| r.id.as_str()), Some("A1"));
        assert_eq!(map.region_at(Coord { x: 25.0, y: 5.0 }).map(|r| r.id.as_str()), Some("B2"));
        assert!(map.region_at(Coord { x: 90.0, y: 45.0 }).is_none());
    }

    #[test]
    fn test_curves_are_flattened() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <path id="X" d="M 0 0 C 0 10 10 10 10 0 Q 5 -5 0 0 Z"/>
        </svg>"#;
        let map = parse(svg).unwrap();
        let x = map.region("X").unwrap();
        assert_eq!(x.shape.0[0].exterior().0.len(), 1 + 2 * CURVE_STEPS);
        // Bounds fall back to the geometry when there is no viewBox
        assert_eq!(map.bounds, x.bounds);
    }

    #[test]
    fn test_rejects_map_without_regions() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="5" height="5"/></svg>"#;
        assert!(matches!(parse(svg), Err(LoadError::Map(_))));
    }

    #[test]
    fn test_rejects_non_svg_document() {
        assert!(parse("<html></html>").is_err());
        assert!(parse("not xml at all").is_err());
    }

    #[test]
    fn test_country_group_with_named_parts_is_one_region() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 20">
            <g id="layer1">
                <g id="FRA">
                    <path id="FRA-main" d="M 0 0 H 10 V 10 H 0 Z"/>
                    <path id="FRA-corsica" d="M 20 0 H 25 V 5 H 20 Z"/>
                </g>
                <path id="ESP" d="M 0 12 H 10 V 20 H 0 Z"/>
            </g>
        </svg>"#;
        let map = MapGraphic::parse(svg, |id| id == "FRA" || id == "ESP").unwrap();

        let ids: Vec<&str> = map.ids().collect();
        assert_eq!(ids, vec!["FRA", "ESP"]);
        let fra = map.region("FRA").unwrap();
        assert_eq!(fra.shape.0.len(), 2);
        assert_eq!(
            map.region_at(Coord { x: 22.0, y: 2.0 }).map(|r| r.id.as_str()),
            Some("FRA")
        );
        assert!(map.region("FRA-main").is_none());

        // Without country data the same group is only a layer
        let ids: Vec<String> = parse(svg).unwrap().ids().map(str::to_string).collect();
        assert_eq!(ids, vec!["FRA-main", "FRA-corsica", "ESP"]);
    }
}
