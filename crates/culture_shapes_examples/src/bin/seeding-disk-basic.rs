use culture_shapes::prelude::*;
use culture_shapes_examples::{init_tracing, print_summary};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A 1 mm culture dish, expressed in micrometers.
    let dish = Region::disk(500.0, DVec2::ZERO, RegionOptions::new(Unit::Micrometer))?;
    println!(
        "dish: surface {:.0} {}^2, bounds {:?}",
        dish.surface(),
        dish.unit(),
        dish.bounds()
    );

    let mut rng = StdRng::seed_from_u64(42);
    let request = SeedRequest::new(2_000).with_exclusion_radius(10.0);
    let positions = Seeder::new().seed(&dish, &request, &mut rng)?;
    print_summary("disk", &positions);

    let in_mm = request.with_output_unit(Unit::Millimeter);
    let positions = Seeder::new().seed(&dish, &in_mm, &mut rng)?;
    print_summary("disk (mm)", &positions);

    Ok(())
}
