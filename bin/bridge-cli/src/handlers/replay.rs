use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use chainbridge_core::prelude::{
    BridgeCfg, BridgeCore, BridgeEvent, BridgeResult, DepositCall, DepositHandler, ExecuteCall,
    HandlerBinding, HandlerError,
};
use chainbridge_params::prelude::BridgeParams;
use chainbridge_primitives::prelude::{ChainId, DepositNonce};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};
use tracing::{debug, info, warn};

use crate::{
    cli::ReplayArgs,
    script::{Operation, Script},
};

/// Records payloads verbatim and never touches a target chain.
#[derive(Debug, Default)]
struct DryRunHandler;

impl DepositHandler for DryRunHandler {
    fn interpret_deposit(&self, call: &DepositCall<'_>) -> Result<Vec<u8>, HandlerError> {
        debug!(
            contract = %call.target,
            depositor = %call.depositor,
            destination_chain_id = call.destination_chain_id,
            deposit_nonce = call.deposit_nonce,
            payload_len = call.payload.len(),
            "interpreting deposit"
        );

        Ok(call.payload.to_vec())
    }

    fn execute_proposal(&self, call: &ExecuteCall<'_>) -> Result<(), HandlerError> {
        debug!(contract = %call.target, record_len = call.record.len(), "skipping execution");

        Ok(())
    }
}

/// The state of the bridge core after a script has been replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReplayReport {
    /// Number of operations that failed.
    pub(crate) failures: usize,

    /// The events emitted while replaying, in order of emission.
    pub(crate) events: Vec<BridgeEvent>,

    /// destination chain -> deposit count, for every chain the script deposited to
    pub(crate) deposit_counts: BTreeMap<ChainId, DepositNonce>,

    pub(crate) whitelist_enabled: bool,
    pub(crate) paused: bool,
}

pub(crate) fn handle_replay(args: ReplayArgs) -> Result<()> {
    let params: BridgeParams = read_toml(&args.params).context("could not load params")?;
    let script: Script = read_toml(&args.script).context("could not load script")?;

    let report = replay(params, script, args.fail_fast)?;

    println!("failed operations: {}", report.failures);
    println!("whitelist enabled: {}", report.whitelist_enabled);
    println!("paused: {}", report.paused);
    for (chain_id, count) in &report.deposit_counts {
        println!("deposits to chain {chain_id}: {count}");
    }

    Ok(())
}

/// Applies every operation of `script` to a bridge core initialized from `params`.
///
/// Failed operations are logged and counted, unless `fail_fast` is set, in which case the first
/// failure aborts the replay.
pub(crate) fn replay(
    params: BridgeParams,
    script: Script,
    fail_fast: bool,
) -> Result<ReplayReport> {
    info!(ops = script.ops.len(), origin_chain_id = params.origin_chain_id, "replaying script");

    // handing over the administrator role emits two events
    let cfg = BridgeCfg {
        event_channel_capacity: BridgeCfg::default()
            .event_channel_capacity()
            .max(2 * script.ops.len()),
    };
    let bridge = BridgeCore::new(params, cfg).context("could not initialize bridge core")?;
    let mut rx = bridge.subscribe();

    let handler: Arc<dyn DepositHandler> = Arc::new(DryRunHandler);
    let mut destinations = BTreeSet::new();
    let mut failures = 0usize;

    for (index, op) in script.ops.into_iter().enumerate() {
        let kind = op.kind();
        if let Operation::Deposit {
            destination_chain_id,
            ..
        } = &op
        {
            destinations.insert(*destination_chain_id);
        }

        match apply(&bridge, &handler, op) {
            Ok(()) => info!(%index, %kind, "operation applied"),
            Err(err) => {
                failures += 1;
                warn!(%index, %kind, %err, "operation failed");

                if fail_fast {
                    anyhow::bail!("operation {index} ({kind}) failed: {err}");
                }
            }
        }
    }

    let deposit_counts = destinations
        .into_iter()
        .map(|chain_id| (chain_id, bridge.deposit_count(chain_id)))
        .collect();

    Ok(ReplayReport {
        failures,
        events: drain_events(&mut rx),
        deposit_counts,
        whitelist_enabled: bridge.is_whitelist_enabled(),
        paused: bridge.is_paused(),
    })
}

fn apply(
    bridge: &BridgeCore,
    handler: &Arc<dyn DepositHandler>,
    op: Operation,
) -> BridgeResult<()> {
    match op {
        Operation::BindResource {
            caller,
            resource_id,
            target,
            deposit_selector,
            execute_selector,
        } => {
            let binding =
                HandlerBinding::new(handler.clone(), target, deposit_selector, execute_selector);
            bridge.bind_resource(&caller, resource_id, binding)
        }
        Operation::Deposit {
            caller,
            destination_chain_id,
            resource_id,
            payload,
        } => bridge
            .deposit(&caller, destination_chain_id, resource_id, &payload)
            .map(|_| ()),
        Operation::EnableWhitelist { caller } => bridge.enable_whitelist(&caller),
        Operation::DisableWhitelist { caller } => bridge.disable_whitelist(&caller),
        Operation::AddToWhitelist { caller, account } => bridge.add_to_whitelist(&caller, account),
        Operation::RemoveFromWhitelist { caller, account } => {
            bridge.remove_from_whitelist(&caller, account)
        }
        Operation::GrantRole {
            caller,
            role,
            account,
        } => bridge.grant_role(&caller, role, account),
        Operation::RevokeRole {
            caller,
            role,
            account,
        } => bridge.revoke_role(&caller, role, account),
        Operation::RenounceRole {
            caller,
            role,
            account,
        } => bridge.renounce_role(&caller, role, account),
        Operation::SetRoleAdmin {
            caller,
            role,
            admin_role,
        } => bridge.set_role_admin(&caller, role, admin_role),
        Operation::RenounceAdmin { caller, new_admin } => bridge.renounce_admin(&caller, new_admin),
        Operation::Pause { caller } => bridge.pause(&caller),
        Operation::Unpause { caller } => bridge.unpause(&caller),
    }
}

fn drain_events(rx: &mut Receiver<BridgeEvent>) -> Vec<BridgeEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => {
                info!(%event, "event emitted");
                events.push(event);
            }
            Err(TryRecvError::Lagged(skipped)) => warn!(%skipped, "missed events"),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    events
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;

    toml::from_str(&raw).with_context(|| format!("could not parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use chainbridge_params::prelude::RoleParams;
    use chainbridge_primitives::prelude::{derive_resource_id, Address, Role};

    use super::*;

    const ADMIN: Address = Address::with_last_byte(0x01);
    const WHITELISTER: Address = Address::with_last_byte(0x03);
    const OUTSIDER: Address = Address::with_last_byte(0x04);

    /// Binds a resource, deposits to two chains, then locks an outsider out with the whitelist.
    const SCRIPT: &str = r#"
        [[op]]
        kind = "bind_resource"
        caller = "0x0000000000000000000000000000000000000001"
        resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
        target = "0x1111111111111111111111111111111111111111"

        [[op]]
        kind = "deposit"
        caller = "0x0000000000000000000000000000000000000004"
        destination_chain_id = 2
        resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
        payload = "0xdeadbeef"

        [[op]]
        kind = "deposit"
        caller = "0x0000000000000000000000000000000000000004"
        destination_chain_id = 3
        resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
        payload = "0x01"

        [[op]]
        kind = "grant_role"
        caller = "0x0000000000000000000000000000000000000001"
        role = "whitelister"
        account = "0x0000000000000000000000000000000000000003"

        [[op]]
        kind = "enable_whitelist"
        caller = "0x0000000000000000000000000000000000000003"

        [[op]]
        kind = "deposit"
        caller = "0x0000000000000000000000000000000000000004"
        destination_chain_id = 2
        resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
        payload = "0x02"

        [[op]]
        kind = "deposit"
        caller = "0x0000000000000000000000000000000000000001"
        destination_chain_id = 2
        resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
        payload = "0x03"

        [[op]]
        kind = "renounce_role"
        caller = "0x0000000000000000000000000000000000000003"
        role = "whitelister"
        account = "0x0000000000000000000000000000000000000003"

        [[op]]
        kind = "renounce_admin"
        caller = "0x0000000000000000000000000000000000000001"
        new_admin = "0x0000000000000000000000000000000000000003"

        [[op]]
        kind = "pause"
        caller = "0x0000000000000000000000000000000000000003"
    "#;

    fn params() -> BridgeParams {
        BridgeParams::new(1, RoleParams::with_admin(ADMIN))
    }

    fn script() -> Script {
        toml::from_str(SCRIPT).expect("script must parse")
    }

    #[test]
    fn test_replay_applies_every_operation() {
        let report = replay(params(), script(), false).expect("replay must complete");

        assert_eq!(report.failures, 1, "only the outsider's deposit must fail");
        assert_eq!(report.deposit_counts, BTreeMap::from([(2, 2), (3, 1)]));
        assert!(report.whitelist_enabled);
        assert!(report.paused);

        let asset: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let resource_id = derive_resource_id(&asset, 1);
        assert_eq!(
            report.events,
            vec![
                BridgeEvent::ResourceBound {
                    resource_id,
                    target: asset,
                },
                BridgeEvent::Deposit {
                    destination_chain_id: 2,
                    resource_id,
                    deposit_nonce: 1,
                },
                BridgeEvent::Deposit {
                    destination_chain_id: 3,
                    resource_id,
                    deposit_nonce: 1,
                },
                BridgeEvent::RoleGranted {
                    role: Role::Whitelister,
                    account: WHITELISTER,
                    sender: ADMIN,
                },
                BridgeEvent::WhitelistEnabled,
                BridgeEvent::Deposit {
                    destination_chain_id: 2,
                    resource_id,
                    deposit_nonce: 2,
                },
                BridgeEvent::RoleRevoked {
                    role: Role::Whitelister,
                    account: WHITELISTER,
                    sender: WHITELISTER,
                },
                BridgeEvent::RoleGranted {
                    role: Role::Administrator,
                    account: WHITELISTER,
                    sender: ADMIN,
                },
                BridgeEvent::RoleRevoked {
                    role: Role::Administrator,
                    account: ADMIN,
                    sender: ADMIN,
                },
                BridgeEvent::Paused {
                    account: WHITELISTER,
                },
            ]
        );
    }

    #[test]
    fn test_replay_fail_fast_stops_at_first_failure() {
        let err = replay(params(), script(), true).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("operation 5 (deposit)"), "got: {message}");
        assert!(message.contains(&OUTSIDER.to_string()), "got: {message}");
    }

    #[test]
    fn test_replay_rejects_params_without_admin() {
        let mut params = params();
        params.roles.admins.clear();

        assert!(replay(params, script(), false).is_err());
    }
}
