use crossdao_crypto::{derive_account, keypair_from_seed, recover_signer, sign_vote, vote_digest};
use crossdao_types::{AccountId, Hash32};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_votes_recover_to_signer(
        seed in any::<[u8; 32]>(),
        governor in any::<[u8; 20]>(),
        proposal in any::<[u8; 32]>(),
        support in 0u8..3,
    ) {
        let pair = keypair_from_seed(&seed);
        let digest = vote_digest(&AccountId::new(governor), &Hash32::new(proposal), support);
        let sig = sign_vote(&digest, &pair.public, &pair.private);
        prop_assert_eq!(recover_signer(&digest, &sig).unwrap(), derive_account(&pair.public));
    }

    #[test]
    fn vote_is_bound_to_its_proposal(
        seed in any::<[u8; 32]>(),
        proposal in any::<[u8; 32]>(),
        other in any::<[u8; 32]>(),
    ) {
        prop_assume!(proposal != other);
        let pair = keypair_from_seed(&seed);
        let governor = AccountId::new([0xd0; 20]);
        let digest = vote_digest(&governor, &Hash32::new(proposal), 1);
        let sig = sign_vote(&digest, &pair.public, &pair.private);
        let replayed = vote_digest(&governor, &Hash32::new(other), 1);
        prop_assert!(recover_signer(&replayed, &sig).is_err());
    }
}
