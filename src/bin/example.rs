//! Solar Mount Example - Default Two-Row Table

use solar_mount::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("=== Solar Mount Example: 2 x 3 Panel Table ===\n");

    //   rear  ___________________
    //        |  R2C1  R2C2  R2C3 |   <- purlins under each row
    //        |  R1C1  R1C2  R1C3 |
    //   front ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
    //         ^               ^
    //      rafter          rafter   (2 columns each)
    let params = ParameterSet::default();
    println!(
        "Panels {} x {} at {:.0} deg, {} x {} columns, min height {:.2}",
        params.rows, params.cols, params.angle, params.columns_x, params.columns_y,
        params.column_min_height
    );

    let mut kernel = MeshKernel::new();
    let structure = generate(&params, &mut kernel)?;
    let dims = &structure.layout.dimensions;

    println!("\n--- Dimensions ---");
    println!("Total width:        {:.3}", dims.total_width);
    println!("Total slope length: {:.3}", dims.total_slope_length);
    println!("Ground length:      {:.3}", dims.total_ground_length);
    for (i, support) in structure.layout.supports.iter().enumerate() {
        println!(
            "Column line {}: y = {:.3}, height = {:.3}",
            i + 1,
            support.y_position,
            support.height
        );
    }

    println!("\n--- Components ---");
    for kind in ComponentKind::ALL {
        println!("{:8} {}", kind.name(), structure.layout.count(kind));
    }
    let triangles: usize = structure
        .primitives
        .iter()
        .map(|p| match p {
            RenderPrimitive::Mesh { mesh, .. } => mesh.triangles.len(),
            RenderPrimitive::NodeCloud { .. } => 0,
        })
        .sum();
    println!("Render primitives: {} ({} triangles)", structure.primitives.len(), triangles);

    let topology = &structure.topology;
    println!("\n--- FE Topology ---");
    println!("Nodes:         {}", topology.nodes.len());
    for role in MemberRole::ALL {
        println!("{:?} members: {}", role, topology.members_of(role).count());
    }
    println!("Load nodes:    {}", topology.load_nodes.len());
    println!("Support nodes: {}", topology.support_nodes.len());

    let mut model = FrameModel::new();
    topology.apply_to(&mut model)?;
    model.analyze()?;

    if let Some(summary) = model.summary() {
        println!("\n--- Frame Model Check ---");
        println!("Total member length: {:.3}", summary.total_length);
        for (role, length) in &summary.length_by_role {
            println!("  {:?}: {:.3}", role, length);
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
