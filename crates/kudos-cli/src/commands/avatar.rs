//! Avatar command implementation.

use crate::cli::AvatarArgs;
use crate::error::Result;
use crate::output::Formatter;
use kudos_domain::AvatarRef;
use kudos_sdk::AvatarResolver;

/// Execute the avatar command.
pub fn execute_avatar(args: AvatarArgs, formatter: &Formatter) -> Result<()> {
    let avatar = resolve(&args);
    println!("{}", formatter.format_avatar(&avatar)?);
    Ok(())
}

fn resolve(args: &AvatarArgs) -> AvatarRef {
    let resolver = if args.direct {
        AvatarResolver::direct()
    } else {
        AvatarResolver::new()
    };
    resolver.resolve(Some(&serde_json::Value::String(args.value.clone())))
}
