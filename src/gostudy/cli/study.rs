//! # Interactive Study Session
//!
//! A line-oriented REPL over one [`StudyApi`](gostudy::api::StudyApi). Input lines and
//! run completions are awaited together, so `Running...` turns into the output as soon
//! as the timer fires, even while the prompt is waiting.
//!
//! On end of input the session waits for an outstanding run, which makes piped
//! scripts such as `printf 'select 3\nrun\n' | gostudy study` print the output.

use super::commands::AppContext;
use super::render::{print_messages, render_output, render_topic, render_topic_list};
use colored::Colorize;
use gostudy::api::{CmdMessage, CmdResult};
use gostudy::editor::edit_buffer;
use gostudy::error::Result;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &[(&str, &str)] = &[
    ("list [category]", "Sidebar, with the current topic marked"),
    ("show [topic]", "Current topic panel, or preview another topic"),
    ("search <term>", "Find topics"),
    ("select <topic>", "Switch topic (alias: s, or just the number)"),
    ("buffer", "Print the code buffer"),
    ("edit", "Edit the buffer in $EDITOR"),
    ("load <path>", "Replace the buffer with a file"),
    ("run", "Simulate running the example"),
    ("format", "Reindent the buffer"),
    ("clear", "Clear the output panel"),
    ("output", "Print the output panel"),
    ("help", "This list"),
    ("quit", "Leave the session"),
];

#[derive(Debug, PartialEq, Eq)]
enum StudyCommand {
    List(Option<String>),
    Show(Option<String>),
    Search(String),
    Select(String),
    Buffer,
    Edit,
    Load(String),
    Run,
    Format,
    Clear,
    Output,
    Help,
    Quit,
    Empty,
    Usage(&'static str),
    Unknown(String),
}

fn parse_line(line: &str) -> StudyCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word {
        "" => StudyCommand::Empty,
        "list" | "ls" => StudyCommand::List(arg),
        "show" | "v" => StudyCommand::Show(arg),
        "search" => arg.map_or(StudyCommand::Usage("search <term>"), StudyCommand::Search),
        "select" | "s" => arg.map_or(StudyCommand::Usage("select <topic>"), StudyCommand::Select),
        "buffer" | "code" => StudyCommand::Buffer,
        "edit" | "e" => StudyCommand::Edit,
        "load" => arg.map_or(StudyCommand::Usage("load <path>"), StudyCommand::Load),
        "run" | "r" => StudyCommand::Run,
        "format" | "fmt" => StudyCommand::Format,
        "clear" => StudyCommand::Clear,
        "output" | "o" => StudyCommand::Output,
        "help" | "h" | "?" => StudyCommand::Help,
        "quit" | "exit" | "q" => StudyCommand::Quit,
        number if arg.is_none() && number.chars().all(|c| c.is_ascii_digit()) => {
            StudyCommand::Select(number.to_string())
        }
        other => StudyCommand::Unknown(other.to_string()),
    }
}

enum Event {
    Input(Option<String>),
    RunLanded(Option<CmdResult>),
}

enum Flow {
    Continue,
    Quit,
}

pub(super) async fn run(ctx: &mut AppContext, topic: Option<String>) -> Result<()> {
    if let Some(selector) = topic {
        ctx.api.select(&selector)?;
    }

    let interactive = std::io::stdin().is_terminal();
    if interactive {
        println!(
            "{} Type {} for commands.",
            "gostudy study session.".bold(),
            "help".cyan()
        );
    }
    print_current(ctx)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            prompt(ctx)?;
        }

        let event = tokio::select! {
            line = lines.next_line() => Event::Input(line?),
            landed = ctx.api.next_run_event(), if ctx.api.run_pending() => Event::RunLanded(landed),
        };

        match event {
            Event::RunLanded(Some(result)) => print_display(ctx, &result),
            Event::RunLanded(None) => {}
            Event::Input(None) => {
                if let Some(result) = ctx.api.wait_for_run().await {
                    print_display(ctx, &result);
                }
                break;
            }
            Event::Input(Some(line)) => match dispatch(ctx, parse_line(&line)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => print_messages(&[CmdMessage::error(e.to_string())], ctx.use_color),
            },
        }
    }

    debug!("study session ended");
    Ok(())
}

fn prompt(ctx: &AppContext) -> Result<()> {
    print!("{} ", format!("gostudy [{}]>", ctx.api.selection()).cyan());
    std::io::stdout().flush()?;
    Ok(())
}

fn print_current(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show_current()?;
    if let Some(dt) = &result.topic {
        let buffer = result.buffer.as_deref().unwrap_or(ctx.api.buffer());
        print!(
            "{}",
            render_topic(dt, buffer, result.display.as_ref(), ctx.use_color)
        );
    }
    Ok(())
}

fn print_display(ctx: &AppContext, result: &CmdResult) {
    if let Some(display) = &result.display {
        print!("{}", render_output(display, ctx.use_color));
    }
    print_messages(&result.messages, ctx.use_color);
}

fn dispatch(ctx: &mut AppContext, command: StudyCommand) -> Result<Flow> {
    let use_color = ctx.use_color;
    match command {
        StudyCommand::List(category) => {
            let result = ctx.api.list_topics(category.as_deref())?;
            print!(
                "{}",
                render_topic_list(
                    &result.listed_topics,
                    Some(ctx.api.selection()),
                    None,
                    use_color
                )
            );
        }
        StudyCommand::Show(None) => print_current(ctx)?,
        StudyCommand::Show(Some(selector)) => {
            let result = ctx.api.show_topic(&selector)?;
            if let Some(dt) = &result.topic {
                let buffer = result.buffer.as_deref().unwrap_or(&dt.topic.content.code);
                print!("{}", render_topic(dt, buffer, None, use_color));
            }
        }
        StudyCommand::Search(term) => {
            let result = ctx.api.search_topics(&term)?;
            if !result.listed_topics.is_empty() {
                print!(
                    "{}",
                    render_topic_list(
                        &result.listed_topics,
                        Some(ctx.api.selection()),
                        None,
                        use_color
                    )
                );
            }
            print_messages(&result.messages, use_color);
        }
        StudyCommand::Select(selector) => {
            let result = ctx.api.select(&selector)?;
            print_messages(&result.messages, use_color);
            print_current(ctx)?;
        }
        StudyCommand::Buffer => println!("{}", ctx.api.buffer()),
        StudyCommand::Edit => {
            let edited = edit_buffer(ctx.api.buffer())?;
            ctx.api.set_buffer(edited);
            print_messages(&[CmdMessage::success("Buffer updated.")], use_color);
        }
        StudyCommand::Load(path) => {
            let text = std::fs::read_to_string(&path)?;
            ctx.api.set_buffer(text);
            print_messages(
                &[CmdMessage::success(format!("Loaded {} into the buffer.", path))],
                use_color,
            );
        }
        StudyCommand::Run => {
            let result = ctx.api.run();
            print_display(ctx, &result);
        }
        StudyCommand::Format => {
            let result = ctx.api.format_buffer();
            print_messages(&result.messages, use_color);
            if let Some(buffer) = &result.buffer {
                println!("{}", buffer);
            }
        }
        StudyCommand::Clear => {
            let result = ctx.api.clear_output();
            print_display(ctx, &result);
        }
        StudyCommand::Output => print!("{}", render_output(ctx.api.display(), use_color)),
        StudyCommand::Help => print_help(),
        StudyCommand::Quit => return Ok(Flow::Quit),
        StudyCommand::Empty => {}
        StudyCommand::Usage(usage) => {
            print_messages(&[CmdMessage::warning(format!("Usage: {}", usage))], use_color)
        }
        StudyCommand::Unknown(word) => print_messages(
            &[CmdMessage::error(format!(
                "Unknown command '{}'. Type `help` for commands.",
                word
            ))],
            use_color,
        ),
    }
    Ok(Flow::Continue)
}

fn print_help() {
    println!("{}", "Session commands:".bold());
    for (usage, about) in HELP {
        println!("  {:<18} {}", usage.cyan(), about);
    }
}
