use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use super::App;

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    #[arg(value_enum, help = "Shell to generate for")]
    pub shell: Shell,
}

pub fn completions(arg: &CompletionsArg) {
    let mut cmd = App::command();
    let name = cmd.get_name().to_string();
    generate(arg.shell, &mut cmd, name, &mut std::io::stdout());
}
