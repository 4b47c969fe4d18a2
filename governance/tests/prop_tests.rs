use crossdao_crypto::hash_payload;
use crossdao_governance::{Governor, GovernorConfig, NewProposal, ProposalState};
use crossdao_nullables::NullKeys;
use crossdao_registry::VotingPowerRegistry;
use crossdao_types::{AccountId, ChainId, InstructionType, Term, VoteSupport};
use proptest::prelude::*;

const HOME: ChainId = ChainId(1);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// A proposal succeeds on exactly the first `For` vote that brings
    /// `for * 100` up to `ratio * voters`.
    #[test]
    fn succeeds_exactly_at_quorum(voters in 1usize..12, ratio in 1u8..=99) {
        let keys = NullKeys::new(voters);
        let dao = AccountId::new([0xd0; 20]);
        let registry = VotingPowerRegistry::new(&keys.accounts(), dao).unwrap();
        let mut config = GovernorConfig::new(dao, HOME);
        config.ratio = ratio;
        // Each vote advances the clock; keep the window open for all of them.
        config.voting_delay = 64;
        let mut gov = Governor::new(config, registry).unwrap();

        let request = NewProposal {
            from_chain: HOME,
            to_chain: HOME,
            instruction: InstructionType::Signal,
            term: Term(1),
            nonce: 1,
            payload: b"quorum".to_vec(),
            payload_hash: hash_payload(b"quorum"),
        };
        let id = gov.propose(&keys.account(0), request).unwrap();

        let needed = (u64::from(ratio) * voters as u64).div_ceil(100) as usize;
        for voter in 0..voters {
            let sig = keys.sign(voter, &dao, &id, VoteSupport::For);
            let state = gov.cast_vote_by_sig(&id, VoteSupport::For.as_u8(), &sig).unwrap();
            if voter + 1 < needed {
                prop_assert_eq!(state, ProposalState::Pending);
            } else {
                prop_assert_eq!(state, ProposalState::Succeeded);
                break;
            }
        }
        prop_assert!(gov.execute(&id).is_ok());
    }
}
