use anyhow::Result;
use chainbridge_primitives::prelude::derive_resource_id;
use tracing::info;

use crate::cli::ResourceIdArgs;

pub(crate) fn handle_resource_id(args: ResourceIdArgs) -> Result<()> {
    let resource_id = derive_resource_id(&args.asset, args.chain_id);
    info!(asset = %args.asset, chain_id = args.chain_id, %resource_id, "derived resource id");

    println!("{resource_id}");
    Ok(())
}
