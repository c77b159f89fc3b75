use culture_shapes::prelude::*;
use culture_shapes_examples::{init_tracing, print_summary};
use geo::Polygon;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let defaults = PropertyMap::new().with("excitability", 1.0)?;
    let mut region = Region::rectangle(
        400.0,
        1200.0,
        DVec2::ZERO,
        RegionOptions::default().with_default_properties(defaults),
    )?;

    let left: Polygon<f64> = Bounds::new(-600.0, -200.0, -200.0, 200.0).to_polygon();
    let right: Polygon<f64> = Bounds::new(200.0, -200.0, 600.0, 200.0).to_polygon();

    region.add_area(
        AreaSpec::from_polygon(left)
            .with_name("left")
            .with_height(20.0)
            .with_properties(PropertyMap::new().with("excitability", 1.4)?),
    )?;
    region.add_area(AreaSpec::from_polygon(right).with_height(5.0))?;

    // Overlapping an existing area is rejected and leaves the partition untouched.
    let overlapping = Bounds::new(-300.0, -50.0, -100.0, 50.0).to_polygon();
    if let Err(err) = region.add_area(overlapping) {
        println!("rejected: {err}");
    }

    let mut rng = StdRng::seed_from_u64(3);
    for name in region.area_names() {
        let Some(area) = region.area(&name) else {
            continue;
        };
        println!(
            "{name}: surface {:.0}, height {}, excitability {}",
            area.surface(),
            area.height(),
            area.modulation("excitability")
        );
        let positions = Seeder::new().seed(&area, &SeedRequest::new(50), &mut rng)?;
        print_summary(&name, &positions);
    }

    region.reset_areas();
    println!("after reset: {:?}", region.area_names());
    Ok(())
}
