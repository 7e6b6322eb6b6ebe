use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gostudy",
    bin_name = "gostudy",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Go patterns & practices, with a simulated playground", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Browse,
    Playground,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Browse => "Browse Commands:",
            CommandGroup::Playground => "Playground Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "show" | "search" => Some(CommandGroup::Browse),
            "code" | "run" | "format" | "study" => Some(CommandGroup::Playground),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Browse,
            CommandGroup::Playground,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("gostudy {version}\n"));
    output.push_str("Go patterns & practices, with a simulated playground\n");
    output.push('\n');
    output.push_str("Usage: gostudy [OPTIONS] [COMMAND]\n");
    output.push_str("Topics are addressed by sidebar number (3) or path (basics/project).\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("      --no-color   Disable colored output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    match command {
        Some(c) => print_help_for_command(c.name()),
        None => print_grouped_help(),
    }
}

/// Prints help for a command by name
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name || subcmd.get_all_aliases().any(|a| a == name) {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Browse(BrowseCommands),

    #[command(flatten)]
    Playground(PlaygroundCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Browse(c) => match c {
                BrowseCommands::List { .. } => "list",
                BrowseCommands::Show { .. } => "show",
                BrowseCommands::Search { .. } => "search",
            },
            Commands::Playground(c) => match c {
                PlaygroundCommands::Code { .. } => "code",
                PlaygroundCommands::Run { .. } => "run",
                PlaygroundCommands::Format { .. } => "format",
                PlaygroundCommands::Study { .. } => "study",
            },
            Commands::Misc(c) => match c {
                MiscCommands::Config { .. } => "config",
                MiscCommands::Help { .. } => "help",
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// List topics by category
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only list this category (e.g. concurrency)
        #[arg(short, long)]
        category: Option<String>,

        /// Peek at each topic's example code
        #[arg(long)]
        peek: bool,
    },

    /// Show a topic: overview, key points and example code
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Topic number or category/topic (defaults to the start topic)
        topic: Option<String>,
    },

    /// Search topic titles, descriptions and key points
    #[command(display_order = 3)]
    Search {
        /// Search words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlaygroundCommands {
    /// Print a topic's example code
    #[command(display_order = 10)]
    Code {
        /// Topic number or category/topic (defaults to the start topic)
        topic: Option<String>,
    },

    /// Simulate running a topic's example and print its output
    #[command(display_order = 11)]
    Run {
        /// Topic number or category/topic (defaults to the start topic)
        topic: Option<String>,

        /// Load the editor buffer from a file first
        #[arg(short, long, value_name = "PATH")]
        file: Option<String>,
    },

    /// Reindent Go code from a file (or stdin) by brace depth
    #[command(alias = "fmt", display_order = 12)]
    Format {
        /// File to format; reads stdin when omitted
        path: Option<String>,
    },

    /// Interactive session: select topics, edit, run and format
    #[command(alias = "s", display_order = 13)]
    Study {
        /// Topic to start on (defaults to the start topic)
        topic: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., run-delay-ms)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for gostudy or a subcommand
    #[command(display_order = 31)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_file() {
        let cli = Cli::try_parse_from(["gostudy", "run", "basics/project", "-f", "x.go"]).unwrap();
        match cli.command {
            Some(Commands::Playground(PlaygroundCommands::Run { topic, file })) => {
                assert_eq!(topic.as_deref(), Some("basics/project"));
                assert_eq!(file.as_deref(), Some("x.go"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parses_aliases_and_global_flags() {
        let cli = Cli::try_parse_from(["gostudy", "ls", "--peek", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(
            cli.command,
            Some(Commands::Browse(BrowseCommands::List { peek: true, .. }))
        ));
    }

    #[test]
    fn search_joins_words() {
        let cli = Cli::try_parse_from(["gostudy", "search", "go", "mod"]).unwrap();
        match cli.command {
            Some(Commands::Browse(BrowseCommands::Search { term })) => {
                assert_eq!(term.join(" "), "go mod")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn every_visible_command_has_a_group() {
        let cmd = Cli::command();
        for sc in cmd.get_subcommands().filter(|sc| !sc.is_hide_set()) {
            assert!(
                CommandGroup::for_command(sc.get_name()).is_some(),
                "{} has no help group",
                sc.get_name()
            );
        }
    }

    #[test]
    fn grouped_help_lists_commands() {
        let help = get_grouped_help();
        assert!(help.contains("Playground Commands:"));
        assert!(help.contains("study"));
    }
}
