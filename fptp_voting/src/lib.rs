mod config;
pub mod builder;
pub mod manual;

use log::{debug, info, warn};

use std::collections::HashMap;

pub use crate::config::*;

/// L1 distance between two ideology positions.
///
/// Symmetric, zero on identical inputs, and in `[0, 4]` when both inputs are
/// normalized.
pub fn distance(a: &IdeologyVector, b: &IdeologyVector) -> f64 {
    a.distance(b)
}

/// Returns the party closest to the given ideology.
///
/// Parties are scanned in the order they are provided. When several parties are
/// at the same distance, the first one in that order is returned.
///
/// Fails with [`ElectionErrors::EmptyPartySet`] if `parties` is empty.
pub fn most_suitable_party<'a>(
    ideology: &IdeologyVector,
    parties: &'a [Party],
) -> Result<&'a Party, ElectionErrors> {
    let mut iter = parties.iter();
    let mut best: &Party = iter.next().ok_or(ElectionErrors::EmptyPartySet)?;
    let mut best_distance = distance(ideology, &best.ideology);
    for party in iter {
        let d = distance(ideology, &party.ideology);
        // Strict: a tie never replaces the earlier party.
        if d < best_distance {
            best = party;
            best_distance = d;
        }
    }
    debug!(
        "most_suitable_party: {:?} -> {} ({}) at distance {}",
        ideology, best.id, best.name, best_distance
    );
    Ok(best)
}

/// Hands out party and voter identifiers for one election.
///
/// Identifiers start at 1 and are never reused, even after the collections
/// are cleared.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct IdAllocator {
    last_party: u32,
    last_voter: u32,
}

impl IdAllocator {
    pub fn new() -> IdAllocator {
        IdAllocator::default()
    }

    pub fn next_party(&mut self) -> PartyId {
        self.last_party += 1;
        PartyId(self.last_party)
    }

    pub fn next_voter(&mut self) -> VoterId {
        self.last_voter += 1;
        VoterId(self.last_voter)
    }
}

/// A single-winner election over a population of voters.
///
/// The election owns both the parties and the voters. Voters refer to their
/// preferred party by identifier.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Election {
    parties: Vec<Party>,
    voters: Vec<Voter>,
    ids: IdAllocator,
}

impl Election {
    pub fn new() -> Election {
        Election::default()
    }

    /// An empty election drawing its identifiers from the given allocator.
    pub fn with_allocator(ids: IdAllocator) -> Election {
        Election {
            parties: Vec::new(),
            voters: Vec::new(),
            ids,
        }
    }

    /// The parties, in insertion order. This order drives every tie-break.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    pub fn party(&self, id: PartyId) -> Option<&Party> {
        self.parties.iter().find(|p| p.id == id)
    }

    pub fn voter(&self, id: VoterId) -> Option<&Voter> {
        self.voters.iter().find(|v| v.id == id)
    }

    pub fn add_party(
        &mut self,
        name: &str,
        ideology: IdeologyVector,
    ) -> Result<&Party, ElectionErrors> {
        if name.trim().is_empty() {
            return Err(ElectionErrors::InvalidField {
                field: "name".to_string(),
                reason: "party name must not be empty".to_string(),
            });
        }
        ideology.check_finite()?;
        let party = Party {
            id: self.ids.next_party(),
            name: name.to_string(),
            ideology,
            votes: 0,
        };
        debug!("add_party: {} {} {:?}", party.id, party.name, party.ideology);
        self.parties.push(party);
        Ok(&self.parties[self.parties.len() - 1])
    }

    /// Adds a voter and assigns its preferred party from the current parties.
    pub fn add_voter(
        &mut self,
        first_name: &str,
        last_name: &str,
        age: u32,
        ideology: IdeologyVector,
    ) -> Result<&Voter, ElectionErrors> {
        for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
            if value.trim().is_empty() {
                return Err(ElectionErrors::InvalidField {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if age < 18 {
            return Err(ElectionErrors::InvalidField {
                field: "age".to_string(),
                reason: format!("voters must be at least 18, got {}", age),
            });
        }
        ideology.check_finite()?;
        let preferred_party = most_suitable_party(&ideology, &self.parties)?.id;
        let voter = Voter {
            id: self.ids.next_voter(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            ideology,
            preferred_party,
        };
        debug!("add_voter: {}", voter);
        self.voters.push(voter);
        Ok(&self.voters[self.voters.len() - 1])
    }

    /// Removes a party. Voters preferring it keep a stale preference until
    /// [`Election::recompute_preferences`] is called.
    pub fn remove_party(&mut self, id: PartyId) -> Result<Party, ElectionErrors> {
        let idx = self
            .parties
            .iter()
            .position(|p| p.id == id)
            .ok_or(ElectionErrors::PartyNotFound(id))?;
        let removed = self.parties.remove(idx);
        let stale = self
            .voters
            .iter()
            .filter(|v| v.preferred_party == id)
            .count();
        if stale > 0 {
            warn!(
                "remove_party: {} voters still prefer the removed party {} ({})",
                stale, removed.id, removed.name
            );
        }
        Ok(removed)
    }

    pub fn remove_voter(&mut self, id: VoterId) -> Result<Voter, ElectionErrors> {
        let idx = self
            .voters
            .iter()
            .position(|v| v.id == id)
            .ok_or(ElectionErrors::VoterNotFound(id))?;
        Ok(self.voters.remove(idx))
    }

    pub fn clear_parties(&mut self) {
        self.parties.clear();
    }

    pub fn clear_voters(&mut self) {
        self.voters.clear();
    }

    /// The party the voter prefers, if it is still part of the election.
    pub fn resolve_preference(&self, voter_id: VoterId) -> Result<&Party, ElectionErrors> {
        let voter = self
            .voter(voter_id)
            .ok_or(ElectionErrors::VoterNotFound(voter_id))?;
        self.party(voter.preferred_party)
            .ok_or(ElectionErrors::DanglingReference {
                voter: voter_id,
                party: voter.preferred_party,
            })
    }

    /// Recomputes the preferred party of one voter against the current parties.
    pub fn recompute_preference(&mut self, voter_id: VoterId) -> Result<PartyId, ElectionErrors> {
        let voter = self
            .voters
            .iter_mut()
            .find(|v| v.id == voter_id)
            .ok_or(ElectionErrors::VoterNotFound(voter_id))?;
        let pid = most_suitable_party(&voter.ideology, &self.parties)?.id;
        voter.preferred_party = pid;
        Ok(pid)
    }

    /// Recomputes the preferred party of every voter. Returns the number of
    /// voters whose preference changed.
    pub fn recompute_preferences(&mut self) -> Result<usize, ElectionErrors> {
        let mut changed = 0;
        for voter in self.voters.iter_mut() {
            let pid = most_suitable_party(&voter.ideology, &self.parties)?.id;
            if pid != voter.preferred_party {
                changed += 1;
                voter.preferred_party = pid;
            }
        }
        info!(
            "recompute_preferences: {} of {} voters changed preference",
            changed,
            self.voters.len()
        );
        Ok(changed)
    }

    pub fn reset_votes(&mut self) {
        for party in self.parties.iter_mut() {
            party.votes = 0;
        }
    }

    /// Counts one vote per voter for its cached preferred party and returns
    /// the first-past-the-post winner.
    ///
    /// The counters are reset first, so calling this twice gives the same
    /// counts. No distance is recomputed. Votes for a removed party are
    /// reported as unattributed. Ties for the maximum are won by the earliest
    /// party.
    pub fn tally(&mut self) -> Result<TallyResult, ElectionErrors> {
        if self.parties.is_empty() {
            return Err(ElectionErrors::EmptyPartySet);
        }
        info!(
            "Tallying {} voters, {} parties",
            self.voters.len(),
            self.parties.len()
        );
        self.reset_votes();

        let positions: HashMap<PartyId, usize> = self
            .parties
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id, idx))
            .collect();
        let mut unattributed: u64 = 0;
        for voter in self.voters.iter() {
            match positions.get(&voter.preferred_party) {
                Some(&idx) => {
                    self.parties[idx].votes += 1;
                }
                None => {
                    warn!(
                        "tally: voter {} prefers missing party {}, vote not attributed",
                        voter.id, voter.preferred_party
                    );
                    unattributed += 1;
                }
            }
        }

        let mut winner: &Party = &self.parties[0];
        for party in self.parties.iter().skip(1) {
            if party.votes > winner.votes {
                winner = party;
            }
        }

        for party in self.parties.iter() {
            let status = if party.id == winner.id {
                "-> elected"
            } else {
                ""
            };
            info!("{:>8} {} {}", party.votes, party.name, status);
        }
        if unattributed > 0 {
            info!("{:>8} unattributed", unattributed);
        }

        Ok(TallyResult {
            winner: winner.id,
            tally: self
                .parties
                .iter()
                .map(|p| PartyTally {
                    id: p.id,
                    name: p.name.clone(),
                    votes: p.votes,
                })
                .collect(),
            total_votes: self.voters.len() as u64,
            unattributed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn two_parties() -> Election {
        let mut e = Election::new();
        e.add_party("Party 1", IdeologyVector::new(0.5, 0.5, 0.5, 0.5))
            .unwrap();
        e.add_party("Party 2", IdeologyVector::new(0.8, 0.2, 0.7, 0.3))
            .unwrap();
        e
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = IdeologyVector::new(0.1, 0.9, 0.35, 0.0);
        let b = IdeologyVector::new(0.7, 0.2, 0.5, 1.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert_eq!(distance(&a, &a), 0.0);
        assert_eq!(distance(&b, &b), 0.0);
    }

    #[test]
    fn distance_is_manhattan() {
        let a = IdeologyVector::new(0.0, 0.0, 0.0, 0.0);
        let b = IdeologyVector::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(distance(&a, &b), 4.0);
        let c = IdeologyVector::new(0.25, 0.5, 0.0, 0.0);
        assert_eq!(distance(&a, &c), 0.75);
    }

    #[test]
    fn closest_party_close_to_center() {
        init_logs();
        let e = two_parties();
        let ideology = IdeologyVector::new(0.6, 0.4, 0.5, 0.3);
        let p = most_suitable_party(&ideology, e.parties()).unwrap();
        assert_eq!(p.name(), "Party 1");
        assert!((distance(&ideology, e.parties()[0].ideology()) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn closest_party_far_from_center() {
        let e = two_parties();
        let ideology = IdeologyVector::new(0.9, 0.1, 0.8, 0.2);
        let p = most_suitable_party(&ideology, e.parties()).unwrap();
        assert_eq!(p.name(), "Party 2");
        assert!((distance(&ideology, e.parties()[1].ideology()) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn closest_party_with_three_parties() {
        let mut e = two_parties();
        e.add_party("Party 3", IdeologyVector::new(0.2, 0.8, 0.3, 0.7))
            .unwrap();
        let ideology = IdeologyVector::new(0.1, 0.9, 0.2, 0.8);
        let p = most_suitable_party(&ideology, e.parties()).unwrap();
        assert_eq!(p.name(), "Party 3");
    }

    #[test]
    fn closest_party_is_minimal() {
        let mut e = Election::new();
        let positions = [
            [0.1, 0.2, 0.3, 0.4],
            [0.9, 0.8, 0.7, 0.6],
            [0.5, 0.5, 0.0, 1.0],
            [0.33, 0.66, 0.12, 0.48],
        ];
        for (idx, pos) in positions.iter().enumerate() {
            e.add_party(&format!("Party {}", idx), IdeologyVector::from(*pos))
                .unwrap();
        }
        let voters = [
            [0.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 1.0],
            [0.4, 0.6, 0.1, 0.5],
            [0.5, 0.5, 0.1, 0.9],
        ];
        for pos in voters.iter() {
            let ideology = IdeologyVector::from(*pos);
            let best = most_suitable_party(&ideology, e.parties()).unwrap();
            assert!(e.parties().iter().any(|p| p.id() == best.id()));
            let d = distance(&ideology, best.ideology());
            for p in e.parties() {
                assert!(distance(&ideology, p.ideology()) >= d);
            }
        }
    }

    #[test]
    fn tie_goes_to_first_party() {
        let mut e = Election::new();
        e.add_party("Left", IdeologyVector::new(0.25, 0.5, 0.5, 0.5))
            .unwrap();
        e.add_party("Right", IdeologyVector::new(0.75, 0.5, 0.5, 0.5))
            .unwrap();
        let center = IdeologyVector::new(0.5, 0.5, 0.5, 0.5);
        for _ in 0..10 {
            assert_eq!(
                most_suitable_party(&center, e.parties()).unwrap().name(),
                "Left"
            );
        }
        // Reversing the order flips the outcome.
        let reversed: Vec<Party> = e.parties().iter().rev().cloned().collect();
        assert_eq!(
            most_suitable_party(&center, &reversed).unwrap().name(),
            "Right"
        );
    }

    #[test]
    fn no_party_is_an_error() {
        let center = IdeologyVector::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(
            most_suitable_party(&center, &[]).err(),
            Some(ElectionErrors::EmptyPartySet)
        );
    }

    #[test]
    fn add_voter_without_party() {
        let mut e = Election::new();
        let res = e.add_voter("John", "Doe", 30, IdeologyVector::new(0.6, 0.4, 0.5, 0.3));
        assert_eq!(res.err(), Some(ElectionErrors::EmptyPartySet));
        assert!(e.voters().is_empty());
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let mut e = two_parties();
        let pos = IdeologyVector::new(0.5, 0.5, 0.5, 0.5);
        assert!(matches!(
            e.add_party("", pos),
            Err(ElectionErrors::InvalidField { .. })
        ));
        assert!(matches!(
            e.add_party("  ", pos),
            Err(ElectionErrors::InvalidField { .. })
        ));
        assert!(matches!(
            e.add_voter("", "Doe", 30, pos),
            Err(ElectionErrors::InvalidField { .. })
        ));
        assert!(matches!(
            e.add_voter("John", "Doe", 17, pos),
            Err(ElectionErrors::InvalidField { .. })
        ));
        assert!(matches!(
            e.add_voter("John", "Doe", 30, IdeologyVector::new(f64::NAN, 0.5, 0.5, 0.5)),
            Err(ElectionErrors::InvalidField { .. })
        ));
        assert_eq!(e.parties().len(), 2);
        assert!(e.voters().is_empty());
        // Out of range but finite is accepted.
        assert!(e.add_voter("John", "Doe", 18, IdeologyVector::new(1.5, -0.5, 0.5, 0.5)).is_ok());
    }

    #[test]
    fn preference_is_assigned_at_construction() {
        let mut e = two_parties();
        let vid = e
            .add_voter("Jane", "Doe", 25, IdeologyVector::new(0.9, 0.1, 0.8, 0.2))
            .unwrap()
            .id();
        assert_eq!(e.resolve_preference(vid).unwrap().name(), "Party 2");
    }

    #[test]
    fn tally_counts_cached_preferences() {
        init_logs();
        let mut e = two_parties();
        let p1 = IdeologyVector::new(0.5, 0.5, 0.5, 0.5);
        let p2 = IdeologyVector::new(0.8, 0.2, 0.7, 0.3);
        for (name, pos) in [("A", p1), ("B", p2), ("C", p2), ("D", p1), ("E", p1)] {
            e.add_voter(name, "Voter", 40, pos).unwrap();
        }
        let res = e.tally().unwrap();
        assert_eq!(e.parties()[0].votes(), 3);
        assert_eq!(e.parties()[1].votes(), 2);
        assert_eq!(res.winner, e.parties()[0].id());
        assert_eq!(res.total_votes, 5);
        assert_eq!(res.unattributed, 0);
        assert_eq!(res.tally.iter().map(|pt| pt.votes).sum::<u64>(), 5);
        assert_eq!(res.winner_tally().unwrap().name, "Party 1");
    }

    #[test]
    fn tally_without_voters() {
        let mut e = two_parties();
        let res = e.tally().unwrap();
        assert_eq!(res.tally.len(), 2);
        assert!(res.tally.iter().all(|pt| pt.votes == 0));
        assert_eq!(res.winner, PartyId(1));
    }

    #[test]
    fn tally_without_parties() {
        let mut e = Election::new();
        assert_eq!(e.tally().err(), Some(ElectionErrors::EmptyPartySet));
    }

    #[test]
    fn tally_tie_goes_to_first_party() {
        let mut e = two_parties();
        e.add_voter("A", "Voter", 40, IdeologyVector::new(0.8, 0.2, 0.7, 0.3))
            .unwrap();
        e.add_voter("B", "Voter", 40, IdeologyVector::new(0.5, 0.5, 0.5, 0.5))
            .unwrap();
        let res = e.tally().unwrap();
        assert_eq!(res.winner, PartyId(1));
    }

    #[test]
    fn tally_twice_does_not_double_count() {
        let mut e = two_parties();
        e.add_voter("A", "Voter", 40, IdeologyVector::new(0.5, 0.5, 0.5, 0.5))
            .unwrap();
        let first = e.tally().unwrap();
        let second = e.tally().unwrap();
        assert_eq!(first, second);
        assert_eq!(e.parties()[0].votes(), 1);
    }

    #[test]
    fn removed_party_leaves_stale_preference() {
        let mut e = two_parties();
        let vid = e
            .add_voter("Jane", "Doe", 25, IdeologyVector::new(0.9, 0.1, 0.8, 0.2))
            .unwrap()
            .id();
        let removed = e.remove_party(PartyId(2)).unwrap();
        assert_eq!(removed.name(), "Party 2");
        assert_eq!(e.voter(vid).unwrap().preferred_party(), PartyId(2));
        assert_eq!(
            e.resolve_preference(vid).err(),
            Some(ElectionErrors::DanglingReference {
                voter: vid,
                party: PartyId(2)
            })
        );
        let res = e.tally().unwrap();
        assert_eq!(res.unattributed, 1);
        assert_eq!(res.tally[0].votes, 0);

        assert_eq!(e.recompute_preferences().unwrap(), 1);
        assert_eq!(e.resolve_preference(vid).unwrap().id(), PartyId(1));
        let res = e.tally().unwrap();
        assert_eq!(res.unattributed, 0);
        assert_eq!(res.tally[0].votes, 1);
    }

    #[test]
    fn recompute_single_preference() {
        let mut e = two_parties();
        let vid = e
            .add_voter("John", "Doe", 30, IdeologyVector::new(0.2, 0.8, 0.3, 0.7))
            .unwrap()
            .id();
        assert_eq!(e.voter(vid).unwrap().preferred_party(), PartyId(1));
        let p3 = e
            .add_party("Party 3", IdeologyVector::new(0.2, 0.8, 0.3, 0.7))
            .unwrap()
            .id();
        // Not recomputed automatically.
        assert_eq!(e.voter(vid).unwrap().preferred_party(), PartyId(1));
        assert_eq!(e.recompute_preference(vid).unwrap(), p3);
        assert_eq!(
            e.recompute_preference(VoterId(42)).err(),
            Some(ElectionErrors::VoterNotFound(VoterId(42)))
        );
    }

    #[test]
    fn remove_missing_is_an_error() {
        let mut e = two_parties();
        assert_eq!(
            e.remove_party(PartyId(7)).err(),
            Some(ElectionErrors::PartyNotFound(PartyId(7)))
        );
        assert_eq!(
            e.remove_voter(VoterId(1)).err(),
            Some(ElectionErrors::VoterNotFound(VoterId(1)))
        );
    }

    #[test]
    fn remove_voter_by_id() {
        let mut e = two_parties();
        let pos = IdeologyVector::new(0.5, 0.5, 0.5, 0.5);
        let v1 = e.add_voter("A", "Voter", 40, pos).unwrap().id();
        let v2 = e.add_voter("B", "Voter", 40, pos).unwrap().id();
        assert_eq!(e.remove_voter(v1).unwrap().first_name(), "A");
        assert_eq!(e.voters().len(), 1);
        assert_eq!(e.voters()[0].id(), v2);
        assert_eq!(e.tally().unwrap().total_votes, 1);
    }

    #[test]
    fn identifiers_are_not_reused() {
        let mut e = two_parties();
        e.clear_parties();
        assert!(e.parties().is_empty());
        let pid = e
            .add_party("Party 3", IdeologyVector::new(0.5, 0.5, 0.5, 0.5))
            .unwrap()
            .id();
        assert_eq!(pid, PartyId(3));
        assert_eq!(pid.to_string(), "P3");
    }

    #[test]
    fn elections_do_not_share_identifiers() {
        let mut a = two_parties();
        let mut b = Election::new();
        let pa = a
            .add_party("Third", IdeologyVector::new(0.0, 0.0, 0.0, 0.0))
            .unwrap()
            .id();
        let pb = b
            .add_party("First", IdeologyVector::new(0.0, 0.0, 0.0, 0.0))
            .unwrap()
            .id();
        assert_eq!(pa, PartyId(3));
        assert_eq!(pb, PartyId(1));
    }

    #[test]
    fn clear_voters_keeps_parties() {
        let mut e = two_parties();
        e.add_voter("A", "Voter", 40, IdeologyVector::new(0.5, 0.5, 0.5, 0.5))
            .unwrap();
        e.clear_voters();
        assert!(e.voters().is_empty());
        assert_eq!(e.parties().len(), 2);
        let vid = e
            .add_voter("B", "Voter", 40, IdeologyVector::new(0.5, 0.5, 0.5, 0.5))
            .unwrap()
            .id();
        assert_eq!(vid, VoterId(2));
    }
}
