#![no_main]

use libfuzzer_sys::fuzz_target;

use crossdao_executor::{ExecutorConfig, ProcessorError, ProcessorHost, RelayExecutor};
use crossdao_types::{AccountId, ChainId};

struct RejectAll;

impl ProcessorHost for RejectAll {
    fn dispatch(
        &mut self,
        _caller: &AccountId,
        processor: &AccountId,
        _payload: &[u8],
    ) -> Result<(), ProcessorError> {
        Err(ProcessorError::UnknownProcessor(*processor))
    }
}

// Arbitrary bytes from the admin must be rejected without panicking. No
// input can carry valid signatures from these voters, so nothing executes.
fuzz_target!(|data: &[u8]| {
    let admin = AccountId::new([0xad; 20]);
    let config = ExecutorConfig {
        voters: vec![AccountId::new([1; 20]), AccountId::new([2; 20])],
        home_chain: ChainId(31337),
        local_chain: ChainId(31337),
        dao_address: AccountId::new([0xd0; 20]),
        ratio: 50,
        admin,
    };
    let mut exec = RelayExecutor::new(config, RejectAll).unwrap();
    assert!(exec.execute(&admin, data).is_err());
});
