//! Shell completion generation
//!
//! Generate shell completion scripts for bash, zsh, fish, and powershell.

use clap::CommandFactory;
use clap_complete::{Generator, Shell};

use super::Cli;
use crate::exit_code::ExitCode;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate shell completions and print to stdout
pub fn execute(args: CompletionsArgs) -> ExitCode {
    let mut cmd = Cli::command();
    print_completions(args.shell, &mut cmd, &mut std::io::stdout());
    ExitCode::Success
}

fn print_completions<G: Generator>(
    generator: G,
    cmd: &mut clap::Command,
    out: &mut dyn std::io::Write,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(generator, cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(shell: Shell) -> String {
        let mut buf = Vec::new();
        print_completions(shell, &mut Cli::command(), &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_completions_bash() {
        let output = completions(Shell::Bash);
        assert!(output.contains("sk"));
        assert!(output.contains("complete"));
        assert!(output.contains("build-info"));
    }

    #[test]
    fn test_completions_zsh() {
        let output = completions(Shell::Zsh);
        assert!(output.contains("compdef"));
    }

    #[test]
    fn test_completions_fish() {
        let output = completions(Shell::Fish);
        assert!(output.contains("complete -c sk"));
    }

    #[test]
    fn test_completions_powershell() {
        let output = completions(Shell::PowerShell);
        assert!(output.contains("Register-ArgumentCompleter"));
    }
}
