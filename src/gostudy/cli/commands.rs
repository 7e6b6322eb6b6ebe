//! # CLI Layer
//!
//! This module is **one possible UI client** for gostudy; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! `main.rs` turns an `Err` from [`run`] into `Error: ...` on stderr and exit code 1.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` from the config directory
//! - `handle_*()`: Per-command handlers that call the API and render results
//! - `study`: The interactive session, which reuses the same context

use super::render::{
    print_messages, render_messages, render_output, render_text_list, render_topic,
    render_topic_list,
};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, BrowseCommands, Cli,
    Commands, MiscCommands, PlaygroundCommands,
};
use super::study;
use clap::Parser;
use gostudy::api::{config_in, ConfigAction, StudyApi};
use gostudy::error::Result;
use gostudy::init::{config_dir, initialize};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub(super) struct AppContext {
    pub(super) api: StudyApi,
    pub(super) peek_lines: usize,
    pub(super) use_color: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let use_color = color_enabled(cli.no_color);

    // Top level gets the grouped help, subcommands clap's own
    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    match cli.command {
        Some(Commands::Browse(cmd)) => {
            let ctx = init_context(use_color)?;
            match cmd {
                BrowseCommands::List { category, peek } => handle_list(&ctx, category, peek),
                BrowseCommands::Show { topic } => handle_show(&ctx, topic),
                BrowseCommands::Search { term } => handle_search(&ctx, term),
            }
        }
        Some(Commands::Playground(cmd)) => {
            let mut ctx = init_context(use_color)?;
            match cmd {
                PlaygroundCommands::Code { topic } => handle_code(&ctx, topic),
                PlaygroundCommands::Run { topic, file } => handle_run(&mut ctx, topic, file).await,
                PlaygroundCommands::Format { path } => handle_format(&mut ctx, path),
                PlaygroundCommands::Study { topic } => study::run(&mut ctx, topic).await,
            }
        }
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(key, value, use_color),
            MiscCommands::Help { command } => handle_help(command),
        },
        None => {
            let ctx = init_context(use_color)?;
            handle_list(&ctx, None, false)
        }
    }
}

/// Diagnostics go to stderr. `RUST_LOG` picks the filter unless `--verbose` asks for debug.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gostudy=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn color_enabled(no_color: bool) -> bool {
    if no_color {
        colored::control::set_override(false);
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

fn current_config_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    config_dir(&cwd)
}

fn init_context(use_color: bool) -> Result<AppContext> {
    let dir = current_config_dir();
    debug!(config_dir = %dir.display(), "initializing");

    let ctx = initialize(&dir)?;
    // Startup warnings stay off stdout so `code` and `format` remain pipeable
    eprint!("{}", render_messages(&ctx.messages, use_color));

    Ok(AppContext {
        api: ctx.api,
        peek_lines: ctx.config.peek_lines,
        use_color,
    })
}

fn handle_list(ctx: &AppContext, category: Option<String>, peek: bool) -> Result<()> {
    let result = ctx.api.list_topics(category.as_deref())?;
    let peek_lines = peek.then_some(ctx.peek_lines);
    print!(
        "{}",
        render_topic_list(&result.listed_topics, None, peek_lines, ctx.use_color)
    );
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_show(ctx: &AppContext, topic: Option<String>) -> Result<()> {
    let result = match topic {
        Some(selector) => ctx.api.show_topic(&selector)?,
        None => ctx.api.show_current()?,
    };

    if let Some(dt) = &result.topic {
        let buffer = result.buffer.as_deref().unwrap_or(&dt.topic.content.code);
        print!("{}", render_topic(dt, buffer, None, ctx.use_color));
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: Vec<String>) -> Result<()> {
    let term = term.join(" ");
    let result = ctx.api.search_topics(&term)?;
    if !result.listed_topics.is_empty() {
        print!(
            "{}",
            render_topic_list(&result.listed_topics, None, None, ctx.use_color)
        );
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_code(ctx: &AppContext, topic: Option<String>) -> Result<()> {
    let result = match topic {
        Some(selector) => ctx.api.show_topic(&selector)?,
        None => ctx.api.show_current()?,
    };
    if let Some(buffer) = result.buffer {
        println!("{}", buffer);
    }
    Ok(())
}

async fn handle_run(
    ctx: &mut AppContext,
    topic: Option<String>,
    file: Option<String>,
) -> Result<()> {
    if let Some(selector) = topic {
        ctx.api.select(&selector)?;
    }
    if let Some(path) = file {
        let text = std::fs::read_to_string(&path)?;
        debug!(%path, bytes = text.len(), "buffer loaded from file");
        ctx.api.set_buffer(text);
    }

    let started = ctx.api.run();
    if let Some(display) = &started.display {
        print!("{}", render_output(display, ctx.use_color));
    }

    if let Some(done) = ctx.api.wait_for_run().await {
        if let Some(display) = &done.display {
            print!("{}", render_output(display, ctx.use_color));
        }
    }
    Ok(())
}

fn handle_format(ctx: &mut AppContext, path: Option<String>) -> Result<()> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    ctx.api.set_buffer(text);
    let result = ctx.api.format_buffer();
    for message in &result.messages {
        debug!(message = %message.content, "format");
    }
    print!("{}", result.buffer.unwrap_or_default());
    Ok(())
}

fn handle_config(key: Option<String>, value: Option<String>, use_color: bool) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = config_in(&current_config_dir(), action)?;

    if key.is_none() {
        let lines: Vec<String> = result
            .config
            .iter()
            .flat_map(|config| config.list_all())
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect();
        print!(
            "{}",
            render_text_list(&lines, "No configuration values.", use_color)
        );
    }
    print_messages(&result.messages, use_color);
    Ok(())
}

fn handle_help(command: Option<String>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(&cmd),
        None => print_grouped_help(),
    }
    Ok(())
}
