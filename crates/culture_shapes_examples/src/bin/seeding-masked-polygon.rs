use anyhow::anyhow;
use culture_shapes::prelude::*;
use culture_shapes_examples::{init_tracing, print_summary};
use geo::Polygon;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // An L-shaped chamber drawn in arbitrary units, rescaled to 800 um along x.
    let outline = Polygon::new(
        vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]
        .into(),
        vec![],
    );
    let chamber = Region::from_polygon(outline, Some((0.0, 800.0)), RegionOptions::default())?;
    let b = chamber
        .bounds()
        .ok_or_else(|| anyhow!("chamber has no extent"))?;
    println!("chamber bounds: {b:?}, surface {:.0}", chamber.surface());

    let mut rng = StdRng::seed_from_u64(7);
    let seeder = Seeder::new();

    let whole = seeder.seed(
        &chamber,
        &SeedRequest::new(500).with_exclusion_radius(15.0),
        &mut rng,
    )?;
    print_summary("whole chamber", &whole);

    // Only the lower arm, which is 200 um tall after rescaling.
    let lower = seeder.seed(
        &chamber,
        &SeedRequest::new(300)
            .with_y_bounds(None, Some(b.min_y + 150.0))
            .with_exclusion_radius(15.0),
        &mut rng,
    )?;
    print_summary("lower arm", &lower);

    // Restricted to a disk container around the corner.
    let corner = Region::disk(
        250.0,
        DVec2::new(b.min_x + 100.0, b.min_y + 100.0),
        RegionOptions::default(),
    )?;
    let contained = seeder.seed(
        &chamber,
        &SeedRequest::new(200).with_container(&corner),
        &mut rng,
    )?;
    print_summary("corner container", &contained);

    Ok(())
}
