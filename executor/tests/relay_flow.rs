//! End-to-end tests: a home-chain governor ratifies decisions and relay
//! executors on the home chain and on a neighbour chain re-validate them.
//!
//! The relayer is simulated by handing record bytes from the governor to
//! each executor; processors are nullable.

use crossdao_crypto::hash_payload;
use crossdao_executor::{ExecutorConfig, ExecutorError, ProcessorError, RelayExecutor};
use crossdao_governance::{Governor, GovernorConfig, NewProposal};
use crossdao_messages::{DecisionData, GovernanceCall, ProcessorBinding, RelayedRecord};
use crossdao_nullables::{NullKeys, NullProcessorHost, ProcessorCall};
use crossdao_registry::VotingPowerRegistry;
use crossdao_types::{AccountId, ChainId, Hash32, InstructionType, Term, VoteSupport};

const HOME: ChainId = ChainId(31337);
const DEST: ChainId = ChainId(5);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dao() -> AccountId {
    AccountId::new([0xd0; 20])
}

fn relayer() -> AccountId {
    AccountId::new([0xad; 20])
}

fn token() -> AccountId {
    AccountId::new([0x70; 20])
}

struct Deployment {
    keys: NullKeys,
    gov: Governor,
    home: RelayExecutor<NullProcessorHost>,
    dest: RelayExecutor<NullProcessorHost>,
}

fn executor_config(keys: &NullKeys, local_chain: ChainId) -> ExecutorConfig {
    ExecutorConfig {
        voters: keys.accounts(),
        home_chain: HOME,
        local_chain,
        dao_address: dao(),
        ratio: 50,
        admin: relayer(),
    }
}

fn deploy(voters: usize) -> Deployment {
    let keys = NullKeys::new(voters);
    let registry = VotingPowerRegistry::new(&keys.accounts(), dao()).unwrap();
    let mut config = GovernorConfig::new(dao(), HOME);
    config.neighbor_chains = vec![DEST];
    let gov = Governor::new(config, registry).unwrap();

    let mut host = NullProcessorHost::new();
    host.deploy(token());
    let home = RelayExecutor::new(executor_config(&keys, HOME), NullProcessorHost::new()).unwrap();
    let dest = RelayExecutor::new(executor_config(&keys, DEST), host).unwrap();
    Deployment {
        keys,
        gov,
        home,
        dest,
    }
}

impl Deployment {
    /// Propose, collect `For` votes from voters `0..for_votes`, execute, and
    /// return the encoded ratified record.
    fn ratify(
        &mut self,
        to_chain: ChainId,
        instruction: InstructionType,
        payload: Vec<u8>,
        for_votes: usize,
    ) -> Vec<u8> {
        let term = self.gov.registry().current_term();
        let request = NewProposal {
            from_chain: HOME,
            to_chain,
            instruction,
            term,
            nonce: self.gov.next_nonce(to_chain),
            payload_hash: hash_payload(&payload),
            payload,
        };
        let id = self.gov.propose(&self.keys.account(0), request).unwrap();
        for voter in 0..for_votes {
            let sig = self.keys.sign(voter, &dao(), &id, VoteSupport::For);
            self.gov
                .cast_vote_by_sig(&id, VoteSupport::For.as_u8(), &sig)
                .unwrap();
        }
        self.gov.execute(&id).unwrap().to_bytes().unwrap()
    }

    fn ratify_governance(&mut self, call: GovernanceCall) -> Vec<u8> {
        let quorum = self.keys.len() / 2 + 1;
        self.ratify(
            ChainId::BROADCAST,
            InstructionType::Governance,
            call.encode().unwrap(),
            quorum,
        )
    }
}

fn reencode(bytes: &[u8], mutate: impl FnOnce(&mut DecisionData)) -> Vec<u8> {
    let mut record = RelayedRecord::from_bytes(bytes).unwrap();
    let mut decision = DecisionData::from_bytes(&record.data).unwrap();
    mutate(&mut decision);
    record.data = decision.to_bytes().unwrap();
    record.to_bytes().unwrap()
}

// ---------------------------------------------------------------------------
// 1. Delivery
// ---------------------------------------------------------------------------

#[test]
fn unicast_signal_lands_only_on_its_destination() {
    let mut d = deploy(3);
    let bytes = d.ratify(DEST, InstructionType::Signal, b"hello".to_vec(), 2);

    let receipt = d.dest.execute(&relayer(), &bytes).unwrap();
    assert_eq!(receipt.instruction, InstructionType::Signal);
    assert_eq!(receipt.supporters, 2);
    assert!(d.dest.is_executed(&receipt.proposal_id));

    assert!(matches!(
        d.home.execute(&relayer(), &bytes),
        Err(ExecutorError::InvalidProposal(_))
    ));
    assert!(!d.home.is_executed(&receipt.proposal_id));
}

#[test]
fn record_accepted_exactly_once() {
    let mut d = deploy(3);
    let bytes = d.ratify(HOME, InstructionType::Signal, b"once".to_vec(), 2);
    let receipt = d.home.execute(&relayer(), &bytes).unwrap();
    assert_eq!(
        d.home.execute(&relayer(), &bytes),
        Err(ExecutorError::AlreadyExecuted(receipt.proposal_id))
    );
}

#[test]
fn only_the_relayer_submits() {
    let mut d = deploy(3);
    let bytes = d.ratify(HOME, InstructionType::Signal, b"x".to_vec(), 2);
    let voter = d.keys.account(0);
    assert_eq!(
        d.home.execute(&voter, &bytes),
        Err(ExecutorError::NotAdmin(voter))
    );
}

#[test]
fn broadcast_voter_change_is_mirrored_everywhere() {
    let mut d = deploy(3);
    let newcomer = AccountId::new([0x99; 20]);
    let voters = vec![
        d.keys.account(0),
        AccountId::NULL,
        d.keys.account(0),
        d.keys.account(1),
        d.keys.account(2),
        newcomer,
    ];
    let bytes = d.ratify_governance(GovernanceCall::ChangeVoters {
        voters,
        term: Term(2),
    });

    d.home.execute(&relayer(), &bytes).unwrap();
    d.dest.execute(&relayer(), &bytes).unwrap();
    for exec in [&d.home, &d.dest] {
        assert_eq!(exec.term(), Term(2));
        assert_eq!(exec.voters(), d.gov.registry().voters());
        assert_eq!(exec.voters().len(), 4);
    }
}

#[test]
fn ratio_update_is_mirrored() {
    let mut d = deploy(4);
    let bytes = d.ratify_governance(GovernanceCall::UpdateVotingRatio {
        ratio: 75,
        term: Term(2),
    });
    d.dest.execute(&relayer(), &bytes).unwrap();
    assert_eq!(d.dest.ratio(), 75);
    assert_eq!(d.dest.term(), Term(2));
}

#[test]
fn home_only_calls_are_acknowledged() {
    let mut d = deploy(3);
    let bytes = d.ratify_governance(GovernanceCall::SetVotingDelay { delay: 3 });
    d.dest.execute(&relayer(), &bytes).unwrap();
    assert_eq!(d.dest.term(), Term(1));
    assert_eq!(d.gov.voting_delay(), 3);
}

// ---------------------------------------------------------------------------
// 2. Processors
// ---------------------------------------------------------------------------

#[test]
fn value_transfer_through_bound_processor() {
    let mut d = deploy(3);
    let transfer = d.ratify(DEST, InstructionType::ValueTransfer, b"mint 100".to_vec(), 2);
    assert_eq!(
        d.dest.execute(&relayer(), &transfer),
        Err(ExecutorError::ProcessorNotBound(InstructionType::ValueTransfer))
    );

    let binding = ProcessorBinding {
        instruction: InstructionType::ValueTransfer,
        processor: token(),
    }
    .encode()
    .unwrap();
    let bind = d.ratify(DEST, InstructionType::ProcessorBinding, binding, 2);
    d.dest.execute(&relayer(), &bind).unwrap();
    assert_eq!(d.dest.processor(InstructionType::ValueTransfer), Some(token()));

    // The earlier record was never marked executed, so it can be retried.
    d.dest.execute(&relayer(), &transfer).unwrap();
    assert_eq!(
        d.dest.host().calls(),
        &[ProcessorCall {
            caller: dao(),
            processor: token(),
            payload: b"mint 100".to_vec(),
        }]
    );
}

#[test]
fn processor_failure_propagates() {
    let mut d = deploy(3);
    let binding = ProcessorBinding {
        instruction: InstructionType::ValueTransfer,
        processor: token(),
    }
    .encode()
    .unwrap();
    let bind = d.ratify(DEST, InstructionType::ProcessorBinding, binding, 2);
    d.dest.execute(&relayer(), &bind).unwrap();

    let transfer = d.ratify(DEST, InstructionType::ValueTransfer, b"mint 1".to_vec(), 2);
    d.dest.host_mut().fail_next("paused");
    assert_eq!(
        d.dest.execute(&relayer(), &transfer),
        Err(ExecutorError::Processor(ProcessorError::Rejected(
            "paused".into()
        )))
    );
    assert!(d.dest.host().calls().is_empty());
    d.dest.execute(&relayer(), &transfer).unwrap();
}

#[test]
fn unbinding_removes_processor() {
    let mut d = deploy(3);
    for processor in [token(), AccountId::NULL] {
        let binding = ProcessorBinding {
            instruction: InstructionType::ValueTransfer,
            processor,
        }
        .encode()
        .unwrap();
        let bytes = d.ratify(DEST, InstructionType::ProcessorBinding, binding, 2);
        d.dest.execute(&relayer(), &bytes).unwrap();
    }
    assert_eq!(d.dest.processor(InstructionType::ValueTransfer), None);
}

// ---------------------------------------------------------------------------
// 3. Rejections
// ---------------------------------------------------------------------------

#[test]
fn non_ratified_event_has_wrong_topic() {
    let mut d = deploy(3);
    d.ratify(HOME, InstructionType::Signal, b"x".to_vec(), 2);
    let created = d
        .gov
        .drain_events()
        .into_iter()
        .find(|e| e.name() == "ProposalCreated")
        .unwrap();
    let bytes = created.to_record(dao()).unwrap().to_bytes().unwrap();
    assert_eq!(
        d.home.execute(&relayer(), &bytes),
        Err(ExecutorError::InvalidTopic)
    );
}

#[test]
fn foreign_source_rejected() {
    let mut d = deploy(3);
    let bytes = d.ratify(HOME, InstructionType::Signal, b"x".to_vec(), 2);
    let mut record = RelayedRecord::from_bytes(&bytes).unwrap();
    let impostor = AccountId::new([0x66; 20]);
    record.source = impostor;
    assert_eq!(
        d.home.execute(&relayer(), &record.to_bytes().unwrap()),
        Err(ExecutorError::InvalidSourceContract(impostor))
    );
}

#[test]
fn tampered_decisions_rejected() {
    let mut d = deploy(3);
    let bytes = d.ratify(HOME, InstructionType::Signal, b"pay alice".to_vec(), 2);

    let tampered = reencode(&bytes, |dd| dd.payload = b"pay mallory".to_vec());
    assert!(matches!(
        d.home.execute(&relayer(), &tampered),
        Err(ExecutorError::InvalidProposal(_))
    ));

    let tampered = reencode(&bytes, |dd| dd.instruction = 9);
    assert_eq!(
        d.home.execute(&relayer(), &tampered),
        Err(ExecutorError::InvalidGovernorType(9))
    );

    let tampered = reencode(&bytes, |dd| dd.from_chain = DEST);
    assert!(matches!(
        d.home.execute(&relayer(), &tampered),
        Err(ExecutorError::InvalidProposal(_))
    ));

    let tampered = reencode(&bytes, |dd| {
        dd.supporters.pop();
    });
    assert_eq!(
        d.home.execute(&relayer(), &tampered),
        Err(ExecutorError::InsufficientVotes { have: 1, voters: 3 })
    );

    let tampered = reencode(&bytes, |dd| {
        let first = dd.supporters[0].clone();
        dd.supporters[1] = first;
    });
    assert_eq!(
        d.home.execute(&relayer(), &tampered),
        Err(ExecutorError::InvalidVoter)
    );

    // The genuine record is still good.
    d.home.execute(&relayer(), &bytes).unwrap();
}

#[test]
fn stricter_destination_ratio() {
    let keys = NullKeys::new(4);
    let mut d = deploy(4);
    let mut config = executor_config(&keys, HOME);
    config.ratio = 75;
    let mut strict = RelayExecutor::new(config, NullProcessorHost::new()).unwrap();

    let bytes = d.ratify(HOME, InstructionType::Signal, b"x".to_vec(), 2);
    assert_eq!(
        strict.execute(&relayer(), &bytes),
        Err(ExecutorError::InsufficientVotes { have: 2, voters: 4 })
    );
    d.home.execute(&relayer(), &bytes).unwrap();
}

#[test]
fn record_from_an_older_term_is_stale() {
    let mut d = deploy(3);
    let held_back = d.ratify(DEST, InstructionType::Signal, b"late".to_vec(), 2);
    let bump = d.ratify_governance(GovernanceCall::UpdateVotingRatio {
        ratio: 50,
        term: Term(2),
    });
    d.dest.execute(&relayer(), &bump).unwrap();
    assert_eq!(
        d.dest.execute(&relayer(), &held_back),
        Err(ExecutorError::InvalidTerm {
            expected: Term(2),
            got: Term(1)
        })
    );
}

#[test]
fn out_of_order_governance_record_rejected() {
    let mut d = deploy(3);
    let first = d.ratify_governance(GovernanceCall::UpdateVotingRatio {
        ratio: 60,
        term: Term(2),
    });
    let second = d.ratify_governance(GovernanceCall::UpdateVotingRatio {
        ratio: 70,
        term: Term(3),
    });
    assert_eq!(
        d.dest.execute(&relayer(), &second),
        Err(ExecutorError::InvalidTerm {
            expected: Term(1),
            got: Term(2)
        })
    );
    d.dest.execute(&relayer(), &first).unwrap();
    d.dest.execute(&relayer(), &second).unwrap();
    assert_eq!(d.dest.ratio(), 70);
    assert_eq!(d.dest.term(), Term(3));
}

// ---------------------------------------------------------------------------
// 4. Configuration
// ---------------------------------------------------------------------------

#[test]
fn executor_from_toml_file() {
    let keys = NullKeys::new(2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("executor.toml");
    std::fs::write(&path, executor_config(&keys, DEST).to_toml_string().unwrap()).unwrap();

    let config = ExecutorConfig::from_toml_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config, executor_config(&keys, DEST));
    let exec = RelayExecutor::new(config, NullProcessorHost::new()).unwrap();
    assert_eq!(exec.dao_address(), dao());
    assert_eq!(exec.admin(), relayer());
    assert_eq!(exec.term(), Term(1));
    assert_eq!(exec.voters(), keys.accounts().as_slice());
}

#[test]
fn placeholder_hash_accepted_for_binding() {
    let mut d = deploy(3);
    let binding = ProcessorBinding {
        instruction: InstructionType::ValueTransfer,
        processor: token(),
    }
    .encode()
    .unwrap();
    let bytes = d.ratify(DEST, InstructionType::ProcessorBinding, binding, 2);
    let zeroed = reencode(&bytes, |dd| dd.payload_hash = Hash32::ZERO);
    d.dest.execute(&relayer(), &zeroed).unwrap();
}
