//! The operations a replay script is made of.

use alloy_primitives::Bytes;
use chainbridge_primitives::prelude::{Address, ChainId, FunctionSelector, ResourceId, Role};
use serde::Deserialize;

/// A script of operations applied in order to a fresh bridge core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Script {
    #[serde(rename = "op", default)]
    pub(crate) ops: Vec<Operation>,
}

/// A single operation on the bridge core, on behalf of `caller`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Operation {
    BindResource {
        caller: Address,
        resource_id: ResourceId,
        target: Address,
        #[serde(default)]
        deposit_selector: FunctionSelector,
        #[serde(default)]
        execute_selector: FunctionSelector,
    },
    Deposit {
        caller: Address,
        destination_chain_id: ChainId,
        resource_id: ResourceId,
        payload: Bytes,
    },
    EnableWhitelist {
        caller: Address,
    },
    DisableWhitelist {
        caller: Address,
    },
    AddToWhitelist {
        caller: Address,
        account: Address,
    },
    RemoveFromWhitelist {
        caller: Address,
        account: Address,
    },
    GrantRole {
        caller: Address,
        role: Role,
        account: Address,
    },
    RevokeRole {
        caller: Address,
        role: Role,
        account: Address,
    },
    RenounceRole {
        caller: Address,
        role: Role,
        account: Address,
    },
    SetRoleAdmin {
        caller: Address,
        role: Role,
        admin_role: Role,
    },
    RenounceAdmin {
        caller: Address,
        new_admin: Address,
    },
    Pause {
        caller: Address,
    },
    Unpause {
        caller: Address,
    },
}

impl Operation {
    /// The name of the operation, as written in the script.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Operation::BindResource { .. } => "bind_resource",
            Operation::Deposit { .. } => "deposit",
            Operation::EnableWhitelist { .. } => "enable_whitelist",
            Operation::DisableWhitelist { .. } => "disable_whitelist",
            Operation::AddToWhitelist { .. } => "add_to_whitelist",
            Operation::RemoveFromWhitelist { .. } => "remove_from_whitelist",
            Operation::GrantRole { .. } => "grant_role",
            Operation::RevokeRole { .. } => "revoke_role",
            Operation::RenounceRole { .. } => "renounce_role",
            Operation::SetRoleAdmin { .. } => "set_role_admin",
            Operation::RenounceAdmin { .. } => "renounce_admin",
            Operation::Pause { .. } => "pause",
            Operation::Unpause { .. } => "unpause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_rejects_malformed_resource_id() {
        let script = r#"
            [[op]]
            kind = "deposit"
            caller = "0x0000000000000000000000000000000000000004"
            destination_chain_id = 2
            resource_id = "0x00000000000000000000001111111111111111111111111111111111111111101"
            payload = "0xdeadbeef"
        "#;

        assert!(
            toml::from_str::<Script>(script).is_err(),
            "a resource id of the wrong width must be rejected"
        );
    }

    #[test]
    fn test_script_parses_every_kind() {
        let script = r#"
            [[op]]
            kind = "bind_resource"
            caller = "0x0000000000000000000000000000000000000001"
            resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
            target = "0x1111111111111111111111111111111111111111"
            execute_selector = "0x654cf88c"

            [[op]]
            kind = "deposit"
            caller = "0x0000000000000000000000000000000000000004"
            destination_chain_id = 2
            resource_id = "0x0000000000000000000000111111111111111111111111111111111111111101"
            payload = "0xdeadbeef"

            [[op]]
            kind = "enable_whitelist"
            caller = "0x0000000000000000000000000000000000000001"

            [[op]]
            kind = "set_role_admin"
            caller = "0x0000000000000000000000000000000000000001"
            role = "relayer"
            admin_role = "whitelister"

            [[op]]
            kind = "renounce_admin"
            caller = "0x0000000000000000000000000000000000000001"
            new_admin = "0x0000000000000000000000000000000000000003"
        "#;

        let script = toml::from_str::<Script>(script).expect("script must parse");
        let kinds = script.ops.iter().map(Operation::kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                "bind_resource",
                "deposit",
                "enable_whitelist",
                "set_role_admin",
                "renounce_admin"
            ]
        );

        match &script.ops[0] {
            Operation::BindResource {
                deposit_selector,
                execute_selector,
                ..
            } => {
                assert!(deposit_selector.is_zero());
                assert_eq!(execute_selector.0, [0x65, 0x4c, 0xf8, 0x8c]);
            }
            other => panic!("expected bind_resource, got {other:?}"),
        }

        match &script.ops[1] {
            Operation::Deposit { payload, .. } => {
                assert_eq!(payload.to_vec(), vec![0xde, 0xad, 0xbe, 0xef])
            }
            other => panic!("expected deposit, got {other:?}"),
        }
    }
}
