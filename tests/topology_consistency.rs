//! FE topology: node identity, chain ordering, hand-off format and external failures

use std::collections::HashSet;

use solar_mount::intersect::IntersectionTracker;
use solar_mount::prelude::*;

fn skeleton(params: &ParameterSet) -> Skeleton {
    generate_topology(params).unwrap()
}

fn farm() -> ParameterSet {
    ParameterSet {
        rows: 3,
        cols: 4,
        angle: 25.0,
        columns_x: 3,
        columns_y: 3,
        copies_in_x: 2,
        copies_in_y: 2,
        ..ParameterSet::default()
    }
}

#[test]
fn test_node_names_are_unique() {
    let s = skeleton(&farm());
    let names: HashSet<&str> = s.topology.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names.len(), s.topology.nodes.len());
    let keys: HashSet<NodeKey> = s.topology.node_points().iter().map(Point3::key).collect();
    assert_eq!(keys.len(), s.topology.nodes.len());
}

#[test]
fn test_crossings_resolve_to_one_node_from_both_sides() {
    let s = skeleton(&farm());
    let names: HashSet<String> = s.topology.nodes.iter().map(|n| n.name.clone()).collect();
    for rafter in &s.intersections.rafters {
        for p in &rafter.purlin_points {
            let name = p.key().to_string();
            assert!(names.contains(&name), "rafter crossing {} has no node", name);
        }
    }
    // every purlin-side crossing matches a rafter-side crossing
    for purlin in &s.intersections.purlins {
        for p in &purlin.rafter_points {
            let found = s
                .intersections
                .rafters
                .iter()
                .flat_map(|r| &r.purlin_points)
                .any(|q| q.key() == p.key());
            assert!(found);
        }
    }
}

#[test]
fn test_member_chains_advance_along_their_axis() {
    let s = skeleton(&farm());
    let topo = &s.topology;
    for member in &topo.members {
        let i = topo.node(&member.i_node).unwrap();
        let j = topo.node(&member.j_node).unwrap();
        assert_ne!(member.i_node, member.j_node);
        match member.role {
            MemberRole::Purlin => {
                assert!(i.x < j.x, "{} not ascending in X", member.name);
                assert_eq!(i.y, j.y);
            }
            MemberRole::Rafter => {
                assert!(i.y < j.y, "{} not ascending in Y", member.name);
                assert_eq!(i.x, j.x);
            }
            MemberRole::Column => {
                assert!(i.z < j.z, "{} not ascending in Z", member.name);
                assert_eq!(i.z, 0.0);
            }
        }
    }
}

#[test]
fn test_column_tops_between_purlins_join_rafter_chain() {
    // three column lines: the middle one stands between purlin rows
    let p = ParameterSet {
        columns_y: 3,
        ..ParameterSet::default()
    };
    let s = skeleton(&p);
    let purlin_keys: HashSet<NodeKey> = s
        .intersections
        .rafters
        .iter()
        .flat_map(|r| r.purlin_points.iter().map(Point3::key))
        .collect();

    let mut between = 0;
    for column in &s.intersections.columns {
        let top = column.top.key().to_string();
        let ends = s
            .topology
            .members_of(MemberRole::Rafter)
            .filter(|m| m.i_node == top || m.j_node == top)
            .count();
        assert!(ends > 0, "column top {} is not on a rafter chain", top);
        if !purlin_keys.contains(&column.top.key()) {
            // an interior station splits the rafter into two members
            assert_eq!(ends, 2, "column top {} does not split its rafter", top);
            between += 1;
        }
    }
    assert_eq!(between, p.columns_x);
}

#[test]
fn test_member_names_follow_end_nodes() {
    let s = skeleton(&ParameterSet::default());
    let mut seen = HashSet::new();
    for m in &s.topology.members {
        assert_eq!(m.name, format!("M_{}_{}", m.i_node, m.j_node));
        assert!(seen.insert(m.name.clone()));
    }
}

#[test]
fn test_support_and_load_nodes_exist() {
    let p = farm();
    let s = skeleton(&p);
    let topo = &s.topology;
    assert_eq!(
        topo.support_nodes.len(),
        p.columns_x * p.columns_y * p.copies()
    );
    for name in topo.support_nodes.iter().chain(&topo.load_nodes) {
        assert!(topo.node(name).is_some(), "missing node {}", name);
    }
    for name in &topo.support_nodes {
        assert_eq!(topo.node(name).unwrap().z, 0.0);
    }
}

#[test]
fn test_copies_do_not_share_nodes() {
    let single = skeleton(&ParameterSet::default());
    let double = skeleton(&ParameterSet {
        copies_in_x: 2,
        ..ParameterSet::default()
    });
    assert_eq!(double.topology.nodes.len(), 2 * single.topology.nodes.len());
    assert_eq!(double.topology.members.len(), 2 * single.topology.members.len());
}

#[test]
fn test_handoff_json_shape() {
    let s = skeleton(&ParameterSet::default());
    let json = serde_json::to_value(&s.topology).unwrap();
    let node = &json["nodes"][0];
    for key in ["name", "x", "y", "z"] {
        assert!(node.get(key).is_some(), "node missing {}", key);
    }
    let material = &json["materials"][0];
    for key in ["name", "e", "g", "nu", "rho"] {
        assert!(material.get(key).is_some(), "material missing {}", key);
    }
    let section = &json["sections"][0];
    for key in ["name", "a", "iy", "iz", "j"] {
        assert!(section.get(key).is_some(), "section missing {}", key);
    }
    let member = &json["members"][0];
    for key in ["name", "i_node", "j_node", "material", "section", "rotation"] {
        assert!(member.get(key).is_some(), "member missing {}", key);
    }
    assert!(json["load_nodes"].is_array());
    assert!(json["support_nodes"].is_array());
}

#[test]
fn test_frame_model_check_passes() {
    let s = skeleton(&farm());
    let mut model = FrameModel::new();
    s.topology.apply_to(&mut model).unwrap();
    model.analyze().unwrap();
    let summary = model.summary().unwrap();
    assert_eq!(summary.num_members, s.topology.members.len());
    assert!(summary.total_length > 0.0);
    assert_eq!(summary.length_by_role.len(), 3);
}

#[test]
fn test_tracker_and_builder_compose_by_hand() {
    let params = ParameterSet::default();
    let layout = LayoutCalculator::new(&params).unwrap().calculate().unwrap();
    let sets = IntersectionTracker::new(&layout).track().unwrap();
    let topo = TopologyBuilder::new(params.angle).build(&sets).unwrap();
    assert_eq!(topo, skeleton(&params).topology);
}

#[derive(Debug, thiserror::Error)]
#[error("tessellator out of memory")]
struct OutOfMemory;

/// Kernel whose tessellation always fails
struct BrokenTessellator;

impl SolidBuilder for BrokenTessellator {
    type Solid = ();
    type Error = OutOfMemory;

    fn make_box(&mut self, _: f64, _: f64, _: f64) -> Result<(), OutOfMemory> {
        Ok(())
    }

    fn make_channel(&mut self, _: f64, _: f64, _: f64, _: f64) -> Result<(), OutOfMemory> {
        Ok(())
    }

    fn rotate(&mut self, _: (), _: Axis, _: f64) -> Result<(), OutOfMemory> {
        Ok(())
    }

    fn translate(&mut self, _: (), _: Point3) -> Result<(), OutOfMemory> {
        Ok(())
    }

    fn tessellate(&mut self, _: &()) -> Result<TriangleMesh, OutOfMemory> {
        Err(OutOfMemory)
    }
}

#[test]
fn test_kernel_failure_reaches_caller() {
    let err = generate(&ParameterSet::default(), &mut BrokenTessellator).unwrap_err();
    assert!(matches!(err, LayoutError::Kernel(_)));
    assert!(err.to_string().contains("tessellator out of memory"));
}
