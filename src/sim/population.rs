// Random population generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::sim::*;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

/// A uniform position in the unit hypercube, each component rounded to two decimals.
pub fn random_ideology<R: Rng>(rng: &mut R) -> IdeologyVector {
    let mut component = || (rng.gen::<f64>() * 100.0).round() / 100.0;
    IdeologyVector::new(component(), component(), component(), component())
}

/// Adds `count` parties with random positions. Names are taken in order.
pub fn generate_parties<R: Rng>(
    election: &mut Election,
    names: &[String],
    count: usize,
    rng: &mut R,
) -> SimResult<()> {
    ensure!(
        names.len() >= count,
        NotEnoughPartyNamesSnafu {
            requested: count,
            available: names.len()
        }
    );
    for name in names.iter().take(count) {
        let ideology = random_ideology(rng);
        election.add_party(name, ideology).context(VotingSnafu {})?;
    }
    Ok(())
}

/// Adds `count` voters with random names, ages and positions.
pub fn generate_voters<R: Rng>(
    election: &mut Election,
    first_names: &[String],
    last_names: &[String],
    count: usize,
    rng: &mut R,
) -> SimResult<()> {
    for _ in 0..count {
        let first_name = first_names
            .choose(rng)
            .context(EmptyNamesSnafu { name: "first names" })?;
        let last_name = last_names
            .choose(rng)
            .context(EmptyNamesSnafu { name: "last names" })?;
        let age = rng.gen_range(MIN_AGE..=MAX_AGE);
        let ideology = random_ideology(rng);
        election
            .add_voter(first_name, last_name, age, ideology)
            .context(VotingSnafu {})?;
    }
    Ok(())
}
