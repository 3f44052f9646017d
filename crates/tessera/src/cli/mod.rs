pub mod config;
pub mod memo;
pub mod pool;
pub mod setup;
pub mod table;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tessera_config::Settings;

#[derive(Clone, Debug, Parser)]
#[command(name = "tessera", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    #[arg(long, global = true, help = "Settings file (default: ./tessera.toml when present)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "More logging (-v debug, -vv trace)")]
    pub verbose: u8,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    // Registry
    #[command(alias = "t", name = "types", about = "List registered types")]
    Types(types::TypesArg),
    #[command(alias = "l", name = "lookup", about = "Show one registered type")]
    Lookup(types::LookupArg),
    #[command(alias = "p", name = "plugins", about = "Run every registered plugin")]
    Plugins,
    #[command(name = "singleton", about = "Fetch the shared app state twice")]
    Singleton,

    // Memo
    #[command(alias = "f", name = "fib", about = "Memoized Fibonacci with cache statistics")]
    Fib(memo::FibArg),

    // Pool
    #[command(alias = "sq", name = "squares", about = "Sum of squares below each input, on the worker pool")]
    Squares(pool::SquaresArg),
    #[command(name = "sleep", about = "Blocking sleeps spread over the worker pool")]
    Sleep(pool::SleepArg),
    #[command(alias = "g", name = "gather", about = "Concurrent async sleeps, results in order")]
    Gather(pool::GatherArg),

    #[command(alias = "cfg", name = "config", about = "Print the effective settings")]
    Config,
    #[command(name = "completions", about = "Generate shell completions")]
    Completions(setup::CompletionsArg),
}

pub fn dispatch(cmd: Commands, settings: &Settings) -> Result<()> {
    match cmd {
        Commands::Types(arg) => types::types(arg),
        Commands::Lookup(arg) => types::lookup(arg),
        Commands::Plugins => types::plugins(),
        Commands::Singleton => types::singleton(),
        Commands::Fib(arg) => memo::fib(arg, &settings.memo),
        Commands::Squares(arg) => pool::squares(arg, &settings.pool),
        Commands::Sleep(arg) => pool::sleep(arg, &settings.pool),
        Commands::Gather(arg) => pool::gather(arg, &settings.pool),
        Commands::Config => config::show(settings),
        Commands::Completions(arg) => {
            setup::completions(&arg);
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() { App::command().debug_assert(); }

    #[test]
    fn test_parse_aliases_and_globals() {
        let app = App::try_parse_from(["tessera", "f", "40", "--capacity", "8", "-vv"]).unwrap();

        assert_eq!(app.verbose, 2);
        match app.cmd {
            Commands::Fib(arg) => {
                assert_eq!(arg.n, 40);
                assert_eq!(arg.capacity, Some(8));
            },
            other => panic!("unexpected command {other:?}"),
        }

        let app = App::try_parse_from(["tessera", "--config", "x.toml", "types", "--json"]).unwrap();
        assert_eq!(app.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(app.cmd, Commands::Types(types::TypesArg { json: true })));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(App::try_parse_from(["tessera", "squares"]).is_err());
        assert!(App::try_parse_from(["tessera", "fib", "500"]).is_err());
        assert!(App::try_parse_from(["tessera", "gather", "-1"]).is_err());
        assert!(App::try_parse_from(["tessera", "fib", "10", "--capacity", "4", "--unbounded"]).is_err());
    }
}
