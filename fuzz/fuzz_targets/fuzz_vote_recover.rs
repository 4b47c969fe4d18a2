#![no_main]

use libfuzzer_sys::fuzz_target;

use crossdao_types::{AccountId, Hash32, VoteSignature};

// Signature recovery on attacker-supplied key and signature bytes must
// fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(signature) = bincode::deserialize::<VoteSignature>(data) else {
        return;
    };
    let digest = crossdao_crypto::vote_digest(&AccountId::new([0xd0; 20]), &Hash32::new([1; 32]), 1);
    let _ = crossdao_crypto::recover_signer(&digest, &signature);
});
