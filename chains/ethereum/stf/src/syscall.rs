//! System-call driver (C5): synthetic message calls against fixed predeploys (§4.5).

use crate::{
    error::CollaboratorError,
    evm::{Env, Evm, Message, MessageCallOutput},
    state::State,
};
use rosetta_ethereum_primitives::{Address, Bytes};

/// Executes a synthetic call at `target` with `data` against `state`/`evm`: caller and origin are
/// both [`crate::config::SYSTEM_ADDRESS`], the call never transfers value, and it runs at depth
/// zero with no preloaded access list (§4.5). Afterwards, every touched account the call leaves
/// empty is destroyed — unconditionally, per §9 Open Questions #1. The call never charges the
/// caller, never produces a receipt, and never counts toward block gas; this core surfaces no
/// system-call error beyond a collaborator failure.
pub fn system_call<S, X>(
    target: Address,
    data: Bytes,
    env: &Env,
    state: &mut S,
    evm: &mut X,
) -> Result<MessageCallOutput, CollaboratorError<S::Error, X::Error>>
where
    S: State,
    X: Evm<S>,
{
    let message = Message::system_call(target, data);
    let output = evm.process_message_call(message, env, state).map_err(CollaboratorError::Evm)?;
    state.destroy_touched_empty_accounts(&output.touched_accounts).map_err(CollaboratorError::State)?;
    Ok(output)
}
