use culture_shapes::prelude::*;
use culture_shapes_examples::{init_tracing, print_summary};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A stand-in for a neuron population.
struct Culture {
    size: usize,
}

impl Population for Culture {
    fn required_entity_count(&self) -> usize {
        self.size
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut parents = ParentRegistry::new();
    let population = parents.register(Culture { size: 250 });

    let region = Region::ellipse(
        (300.0, 150.0),
        DVec2::ZERO,
        RegionOptions::default().with_parent(population),
    )?;

    let mut rng = StdRng::seed_from_u64(11);

    // The parent decides the count; the requested one is overridden.
    let positions =
        Seeder::with_parents(&parents).seed(&region, &SeedRequest::new(10), &mut rng)?;
    print_summary("from parent", &positions);

    parents.unregister(population);
    match Seeder::with_parents(&parents).seed(&region, &SeedRequest::from_parent(), &mut rng) {
        Ok(_) => println!("unexpected success after unregistering {population}"),
        Err(err) => println!("after unregistering: {err}"),
    }

    Ok(())
}
