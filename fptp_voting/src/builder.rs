pub use crate::config::*;
use crate::Election;

/// A builder for assembling an election.
///
/// Unlike [`Election::add_voter`], voters can be declared before the parties:
/// all the parties are registered first when the election is built, so every
/// voter is matched against the complete set.
///
/// ```
/// use fptp_voting::builder::Builder;
/// use fptp_voting::IdeologyVector;
/// # use fptp_voting::ElectionErrors;
///
/// let mut builder = Builder::new();
/// builder.add_voter("Ada", "Lovelace", 36, IdeologyVector::new(0.6, 0.4, 0.5, 0.3))?;
///
/// let mut election = builder
///     .parties(&[
///         ("Party 1".to_string(), IdeologyVector::new(0.5, 0.5, 0.5, 0.5)),
///         ("Party 2".to_string(), IdeologyVector::new(0.8, 0.2, 0.7, 0.3)),
///     ])?
///     .build()?;
///
/// let result = election.tally()?;
/// assert_eq!(result.winner_tally().unwrap().name, "Party 1");
///
/// # Ok::<(), ElectionErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _parties: Vec<(String, IdeologyVector)>,
    pub(crate) _voters: Vec<(String, String, u32, IdeologyVector)>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Replaces the registered parties.
    pub fn parties(self, parties: &[(String, IdeologyVector)]) -> Result<Builder, ElectionErrors> {
        let mut res = Builder {
            _parties: Vec::new(),
            _voters: self._voters,
        };
        for (name, ideology) in parties {
            res.add_party(name, *ideology)?;
        }
        Ok(res)
    }

    pub fn add_party(&mut self, name: &str, ideology: IdeologyVector) -> Result<(), ElectionErrors> {
        if name.trim().is_empty() {
            return Err(ElectionErrors::InvalidField {
                field: "name".to_string(),
                reason: "party name must not be empty".to_string(),
            });
        }
        self._parties.push((name.to_string(), ideology));
        Ok(())
    }

    /// Adds a voter. The remaining fields are checked when the election is built.
    pub fn add_voter(
        &mut self,
        first_name: &str,
        last_name: &str,
        age: u32,
        ideology: IdeologyVector,
    ) -> Result<(), ElectionErrors> {
        self._voters.push((
            first_name.to_string(),
            last_name.to_string(),
            age,
            ideology,
        ));
        Ok(())
    }

    pub fn build(self) -> Result<Election, ElectionErrors> {
        let mut election = Election::new();
        for (name, ideology) in self._parties.iter() {
            election.add_party(name, *ideology)?;
        }
        for (first_name, last_name, age, ideology) in self._voters.iter() {
            election.add_voter(first_name, last_name, *age, *ideology)?;
        }
        Ok(election)
    }
}
