#![no_main]

use libfuzzer_sys::fuzz_target;

use crossdao_messages::{DecisionData, GovernanceCall, ProcessorBinding, RelayedRecord};

// Strict decoding must never panic, and anything it accepts must re-encode
// to the exact input bytes.
fuzz_target!(|data: &[u8]| {
    if let Ok(record) = RelayedRecord::from_bytes(data) {
        assert_eq!(record.to_bytes().unwrap(), data);
        let _ = DecisionData::from_bytes(&record.data);
    }

    if let Ok(decision) = DecisionData::from_bytes(data) {
        assert_eq!(decision.to_bytes().unwrap(), data);
    }

    if let Ok(call) = GovernanceCall::decode(data) {
        assert_eq!(call.encode().unwrap(), data);
    }

    let _ = ProcessorBinding::decode(data);
});
