//! Properties of the collaborator's player assignment policy

use proptest::prelude::*;
use parlor::session::{Participant, PlayerId};
use crate::mocks::assign_players;

fn distinct_participants(count: usize) -> Vec<Participant> {
    (0..count)
        .map(|i| Participant::new(format!("0x{:02x}", i)))
        .collect()
}

proptest! {
    /// Ids are sequential in participant order: first participant gets the
    /// lowest id, and the assignment invariant holds.
    #[test]
    fn assignment_is_sequential_in_participant_order(count in 1usize..8) {
        let participants = distinct_participants(count);
        let assignment = assign_players(&participants).unwrap();

        prop_assert!(assignment.validate().is_ok());
        prop_assert_eq!(assignment.len(), count);

        for (index, participant) in participants.iter().enumerate() {
            let expected = [(index + 1) as PlayerId];
            prop_assert_eq!(assignment.ids_for(&participant.address), Some(&expected[..]));
        }
    }

    /// A repeated address is rejected regardless of letter case.
    #[test]
    fn duplicate_addresses_rejected(count in 1usize..6, dup_index in 0usize..6) {
        let mut participants = distinct_participants(count);
        let dup = participants[dup_index % count].address.to_ascii_uppercase();
        participants.push(Participant::new(dup));

        prop_assert!(assign_players(&participants).is_err());
    }

    /// Assignment never invents or drops participants.
    #[test]
    fn assignment_covers_all_addresses(count in 1usize..8) {
        let participants = distinct_participants(count);
        let assignment = assign_players(&participants).unwrap();

        for participant in &participants {
            prop_assert!(assignment.contains_address(&participant.address));
        }
    }
}
