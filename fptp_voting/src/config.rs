// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A position in the four-dimensional ideology space.
///
/// Each axis is conventionally in the closed interval `[0, 1]`. This is not
/// enforced: callers may build vectors outside of that range, the metric
/// stays well defined. Components must be finite numbers.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct IdeologyVector {
    pub economic: f64,
    pub diplomatic: f64,
    pub civil: f64,
    pub social: f64,
}

impl IdeologyVector {
    pub const fn new(economic: f64, diplomatic: f64, civil: f64, social: f64) -> IdeologyVector {
        IdeologyVector {
            economic,
            diplomatic,
            civil,
            social,
        }
    }

    /// The components, in the order economic, diplomatic, civil, social.
    pub fn components(&self) -> [f64; 4] {
        [self.economic, self.diplomatic, self.civil, self.social]
    }

    /// Sum of the absolute differences along each axis (L1 metric).
    pub fn distance(&self, other: &IdeologyVector) -> f64 {
        self.components()
            .iter()
            .zip(other.components().iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }

    /// True if every component lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.components().iter().all(|x| (0.0..=1.0).contains(x))
    }

    pub(crate) fn check_finite(&self) -> Result<(), ElectionErrors> {
        let names = ["economic", "diplomatic", "civil", "social"];
        for (name, x) in names.iter().zip(self.components().iter()) {
            if !x.is_finite() {
                return Err(ElectionErrors::InvalidField {
                    field: name.to_string(),
                    reason: format!("ideology component must be finite, got {}", x),
                });
            }
        }
        Ok(())
    }
}

impl From<[f64; 4]> for IdeologyVector {
    fn from(c: [f64; 4]) -> IdeologyVector {
        IdeologyVector::new(c[0], c[1], c[2], c[3])
    }
}

/// Identifier of a party, unique within one election.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct PartyId(pub u32);

/// Identifier of a voter, unique within one election.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct VoterId(pub u32);

impl Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl Display for VoterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// A contender in the election.
///
/// The vote counter is only written by [`crate::Election::tally`].
#[derive(PartialEq, Debug, Clone)]
pub struct Party {
    pub(crate) id: PartyId,
    pub(crate) name: String,
    pub(crate) ideology: IdeologyVector,
    pub(crate) votes: u64,
}

impl Party {
    pub fn id(&self) -> PartyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ideology(&self) -> &IdeologyVector {
        &self.ideology
    }

    pub fn votes(&self) -> u64 {
        self.votes
    }
}

/// A member of the population.
///
/// The preferred party is a snapshot taken when the voter was added. It is
/// not updated when the set of parties changes, see
/// [`crate::Election::recompute_preferences`].
#[derive(PartialEq, Debug, Clone)]
pub struct Voter {
    pub(crate) id: VoterId,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) age: u32,
    pub(crate) ideology: IdeologyVector,
    pub(crate) preferred_party: PartyId,
}

impl Voter {
    pub fn id(&self) -> VoterId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn ideology(&self) -> &IdeologyVector {
        &self.ideology
    }

    /// The cached preference. It may point to a party that has since been removed.
    pub fn preferred_party(&self) -> PartyId {
        self.preferred_party
    }
}

impl Display for Voter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} (age {}) [{:.2}, {:.2}, {:.2}, {:.2}] -> {}",
            self.id,
            self.first_name,
            self.last_name,
            self.age,
            self.ideology.economic,
            self.ideology.diplomatic,
            self.ideology.civil,
            self.ideology.social,
            self.preferred_party
        )
    }
}

// ******** Output data structures *********

/// The count of one party after a tally.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartyTally {
    pub id: PartyId,
    pub name: String,
    pub votes: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyResult {
    pub winner: PartyId,
    /// Every party, in party order, including the ones with no vote.
    pub tally: Vec<PartyTally>,
    /// Number of voters counted, attributed or not.
    pub total_votes: u64,
    /// Votes whose preferred party no longer exists in the election.
    pub unattributed: u64,
}

impl TallyResult {
    /// The entry of the winning party.
    pub fn winner_tally(&self) -> Option<&PartyTally> {
        self.tally.iter().find(|pt| pt.id == self.winner)
    }
}

/// Errors surfaced by the election model. None of them is retried internally.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ElectionErrors {
    /// An operation needed at least one party.
    EmptyPartySet,
    /// A required field is missing, empty or out of range.
    InvalidField { field: String, reason: String },
    PartyNotFound(PartyId),
    VoterNotFound(VoterId),
    /// The preferred party of this voter has been removed.
    DanglingReference { voter: VoterId, party: PartyId },
}

impl Error for ElectionErrors {}

impl Display for ElectionErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElectionErrors::EmptyPartySet => write!(f, "no party registered in the election"),
            ElectionErrors::InvalidField { field, reason } => {
                write!(f, "invalid field {}: {}", field, reason)
            }
            ElectionErrors::PartyNotFound(pid) => write!(f, "party {} not found", pid),
            ElectionErrors::VoterNotFound(vid) => write!(f, "voter {} not found", vid),
            ElectionErrors::DanglingReference { voter, party } => write!(
                f,
                "voter {} prefers party {} which is not in the election anymore",
                voter, party
            ),
        }
    }
}
