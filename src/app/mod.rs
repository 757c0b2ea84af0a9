pub mod args;
mod demo;
mod setup;

pub use args::AppArgs;

use anyhow::Result;

pub fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli())
}

pub fn launch_with_args(args: AppArgs) -> Result<()> {
    let setup::PreparedApp { config } = setup::prepare(args)?;
    let result = demo::run(&config);
    streamlog::logging::registry::global().drop_all();
    result
}
