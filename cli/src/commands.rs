//! Subcommand implementations. Each returns the JSON document `main` prints.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use crossdao_crypto::{
    derive_account, generate_keypair, hash_payload, hash_proposal, keypair_from_private,
    keypair_from_seed, recover_signer, sign_vote, vote_digest,
};
use crossdao_executor::{ExecutorConfig, ProcessorError, ProcessorHost, RelayExecutor};
use crossdao_governance::{GovernorConfig, GovernorParams};
use crossdao_messages::{topics, DecisionData, RelayedRecord};
use crossdao_types::{
    AccountId, ChainId, Hash32, InstructionType, PrivateKey, PublicKey, Term, VoteSupport,
};
use serde_json::{json, Value};

// ── Parsing ────────────────────────────────────────────────────────────

fn parse_hex32(label: &str, s: &str) -> Result<[u8; 32]> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut bytes)
        .with_context(|| format!("{label} must be 32 bytes of hex"))?;
    Ok(bytes)
}

fn parse_account(s: &str) -> Result<AccountId> {
    s.parse().map_err(|e| anyhow!("{e}"))
}

fn parse_hash(s: &str) -> Result<Hash32> {
    s.parse().map_err(|e| anyhow!("{e}"))
}

pub fn parse_support(s: &str) -> Result<VoteSupport> {
    match s.to_ascii_lowercase().as_str() {
        "for" => Ok(VoteSupport::For),
        "against" => Ok(VoteSupport::Against),
        "abstain" => Ok(VoteSupport::Abstain),
        other => {
            let code: u8 = other
                .parse()
                .map_err(|_| anyhow!("unknown vote support {s:?}"))?;
            VoteSupport::try_from(code).map_err(|e| anyhow!("{e}"))
        }
    }
}

pub fn parse_instruction(s: &str) -> Result<InstructionType> {
    if let Some(t) = InstructionType::ALL.into_iter().find(|t| t.name() == s) {
        return Ok(t);
    }
    let code: u8 = s
        .parse()
        .map_err(|_| anyhow!("unknown instruction type {s:?}"))?;
    InstructionType::try_from(code).map_err(|e| anyhow!("{e}"))
}

pub fn parse_chain(s: &str) -> Result<ChainId> {
    if s.eq_ignore_ascii_case("broadcast") {
        return Ok(ChainId::BROADCAST);
    }
    let id: u64 = s.parse().with_context(|| format!("invalid chain id {s:?}"))?;
    Ok(ChainId(id))
}

// ── Keys and votes ─────────────────────────────────────────────────────

/// New voter key pair; deterministic when a seed is given.
pub fn keygen(seed: Option<&str>) -> Result<Value> {
    let pair = match seed {
        Some(seed) => keypair_from_seed(&parse_hex32("seed", seed)?),
        None => generate_keypair(),
    };
    Ok(json!({
        "private_key": hex::encode(pair.private.0),
        "public_key": pair.public,
        "account": derive_account(&pair.public),
    }))
}

pub fn account(public_key: &str) -> Result<Value> {
    let public = PublicKey(parse_hex32("public key", public_key)?);
    Ok(json!({ "account": derive_account(&public) }))
}

pub fn digest(governor: &str, proposal: &str, support: &str) -> Result<Value> {
    let support = parse_support(support)?;
    let digest = vote_digest(
        &parse_account(governor)?,
        &parse_hash(proposal)?,
        support.as_u8(),
    );
    Ok(json!({ "support": support.as_u8(), "digest": digest }))
}

pub fn sign(governor: &str, proposal: &str, support: &str, private_key: &str) -> Result<Value> {
    let support = parse_support(support)?;
    let pair = keypair_from_private(PrivateKey(parse_hex32("private key", private_key)?));
    let digest = vote_digest(
        &parse_account(governor)?,
        &parse_hash(proposal)?,
        support.as_u8(),
    );
    let signature = sign_vote(&digest, &pair.public, &pair.private);
    Ok(json!({
        "voter": derive_account(&pair.public),
        "support": support.as_u8(),
        "signature": signature,
    }))
}

/// Content id and payload hash of a prospective proposal.
pub fn proposal_id(
    from_chain: ChainId,
    to_chain: ChainId,
    instruction: InstructionType,
    term: u64,
    nonce: u64,
    payload_hex: &str,
) -> Result<Value> {
    let payload = hex::decode(payload_hex).context("payload must be hex")?;
    if to_chain.mode() != instruction.required_mode() {
        tracing::warn!(
            instruction = %instruction,
            to = %to_chain,
            "destination mode is not legal for this instruction type"
        );
    }
    let id = hash_proposal(from_chain, to_chain, instruction, Term(term), nonce, &payload);
    Ok(json!({
        "proposal_id": id,
        "payload_hash": hash_payload(&payload),
    }))
}

// ── Records ────────────────────────────────────────────────────────────

/// Decode a relayed record and report what a relay executor would see.
///
/// Supporters are recovered against the record's own source; whether that
/// source is trusted is the executor's decision.
pub fn inspect_record(bytes: &[u8]) -> Result<Value> {
    let record = RelayedRecord::from_bytes(bytes).context("not a relayed record")?;
    let names: Vec<Option<&str>> = record.topics.iter().map(topics::name_of).collect();
    let mut out = json!({
        "source": record.source,
        "topics": record.topics,
        "topic_names": names,
        "data_len": record.data.len(),
    });
    if record.event_topic() != Some(&topics::proposal_ratified()) {
        return Ok(out);
    }

    let decision = DecisionData::from_bytes(&record.data).context("malformed decision data")?;
    let instruction = InstructionType::try_from(decision.instruction).ok();
    let id_matches = instruction.is_some_and(|t| {
        hash_proposal(
            decision.from_chain,
            decision.to_chain,
            t,
            decision.term,
            decision.nonce,
            &decision.payload,
        ) == decision.proposal_id
    });
    let digest = vote_digest(
        &record.source,
        &decision.proposal_id,
        VoteSupport::For.as_u8(),
    );
    let supporters: Vec<Value> = decision
        .supporters
        .iter()
        .map(|sig| match recover_signer(&digest, sig) {
            Ok(voter) => json!(voter),
            Err(_) => Value::Null,
        })
        .collect();

    out["decision"] = json!({
        "proposal_id": decision.proposal_id,
        "from_chain": decision.from_chain.0,
        "to_chain": decision.to_chain.0,
        "broadcast": decision.to_chain.is_broadcast(),
        "instruction": instruction.map(|t| t.name()),
        "term": decision.term.0,
        "nonce": decision.nonce,
        "payload": hex::encode(&decision.payload),
        "payload_hash": decision.payload_hash,
        "payload_hash_matches": decision.payload_hash == hash_payload(&decision.payload),
        "id_matches": id_matches,
        "supporters": supporters,
    });
    Ok(out)
}

pub fn read_record_input(hex_input: Option<&str>, file: Option<&Path>) -> Result<Vec<u8>> {
    match (hex_input, file) {
        (Some(h), None) => hex::decode(h.trim()).context("record must be hex"),
        (None, Some(path)) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => bail!("pass exactly one of --hex or --file"),
    }
}

// ── Configuration ──────────────────────────────────────────────────────

pub fn check_governor_config(path: &Path) -> Result<Value> {
    let config = GovernorConfig::from_toml_file(&path.to_string_lossy())?;
    if config.address.is_null() {
        bail!("governor address must be non-null");
    }
    if config.chain_id.is_broadcast() {
        bail!("home chain id cannot be the broadcast sentinel");
    }
    GovernorParams::new(config.voting_delay, config.ratio, &config.neighbor_chains)?;
    tracing::info!(path = %path.display(), "governor config valid");
    Ok(json!({ "valid": true, "config": config }))
}

pub fn check_executor_config(path: &Path) -> Result<Value> {
    let config = ExecutorConfig::from_toml_file(&path.to_string_lossy())?;
    let exec = RelayExecutor::new(config.clone(), NoProcessors)?;
    tracing::info!(path = %path.display(), voters = exec.voters().len(), "executor config valid");
    Ok(json!({ "valid": true, "config": config }))
}

/// Host used only to validate an executor configuration.
struct NoProcessors;

impl ProcessorHost for NoProcessors {
    fn dispatch(
        &mut self,
        _caller: &AccountId,
        processor: &AccountId,
        _payload: &[u8],
    ) -> Result<(), ProcessorError> {
        Err(ProcessorError::UnknownProcessor(*processor))
    }
}
