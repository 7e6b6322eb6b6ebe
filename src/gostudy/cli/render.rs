//! # Rendering Module
//!
//! Styled terminal output from minijinja templates. The `style` filter looks names up in
//! [`STUDY_THEME`] and emits plain text when color is off.
//!
//! Layout calculations (numbering, width, truncation, padding) stay in Rust because they
//! need Unicode-aware processing. Templates handle presentation: which style goes where,
//! section headings and grouping.

use super::styles::{names, STUDY_THEME};
use super::templates::{
    LIST_TEMPLATE, MESSAGES_TEMPLATE, OUTPUT_TEMPLATE, TEXT_LIST_TEMPLATE, TOPIC_TEMPLATE,
};
use gostudy::api::{CmdMessage, MessageLevel};
use gostudy::index::DisplayTopic;
use gostudy::model::{Level, TopicRef};
use gostudy::peek::peek_snippet;
use gostudy::session::ExecutionDisplay;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 72;
pub const CURRENT_MARKER: &str = "▸ ";
/// Shown in the output panel before anything has run.
pub const IDLE_PLACEHOLDER: &str = "Type `run` to execute the code...";

const LEVEL_WIDTH: usize = 12;
const PEEK_INDENT: &str = "       ";

#[derive(Serialize)]
struct ListData {
    groups: Vec<CategoryGroupData>,
    empty: bool,
    empty_message: String,
    peek_indent: String,
}

#[derive(Serialize)]
struct CategoryGroupData {
    icon: String,
    title: String,
    rows: Vec<TopicRowData>,
}

/// One sidebar row with its layout already computed.
#[derive(Serialize)]
struct TopicRowData {
    marker: String,
    number: String,
    title: String,
    padding: String,
    level: String,
    level_style: String,
    peek: Vec<StyledLine>,
}

#[derive(Serialize)]
struct StyledLine {
    text: String,
    style: String,
}

#[derive(Serialize)]
struct TopicData {
    number: String,
    title: String,
    level: String,
    level_style: String,
    category: String,
    path: String,
    description: String,
    overview: String,
    key_points: Vec<String>,
    edited: bool,
    code_lines: Vec<CodeLineData>,
    output: Option<OutputData>,
}

#[derive(Serialize)]
struct CodeLineData {
    gutter: String,
    text: String,
}

#[derive(Serialize)]
struct OutputData {
    lines: Vec<String>,
    style: String,
}

#[derive(Serialize)]
struct OutputPanelData {
    output: OutputData,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

fn environment(use_color: bool) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    let theme = STUDY_THEME.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("list.tmp", LIST_TEMPLATE)?;
    env.add_template("topic.tmp", TOPIC_TEMPLATE)?;
    env.add_template("output.tmp", OUTPUT_TEMPLATE)?;
    env.add_template("text_list.tmp", TEXT_LIST_TEMPLATE)?;
    env.add_template("messages.tmp", MESSAGES_TEMPLATE)?;
    Ok(env)
}

/// Renders a registered template, ending the result with exactly one newline.
fn render_template<T: Serialize>(
    name: &str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let env = environment(use_color)?;
    let rendered = env.get_template(name)?.render(data)?;
    let mut output = rendered.trim_end_matches('\n').to_string();
    output.push('\n');
    Ok(output)
}

fn level_style(level: &Level) -> &'static str {
    match level {
        Level::Beginner => names::LEVEL_BEGINNER,
        Level::Intermediate => names::LEVEL_INTERMEDIATE,
        Level::Advanced => names::LEVEL_ADVANCED,
    }
}

/// Renders sidebar rows grouped under their category headings.
///
/// `current` gets the selection marker; `peek_lines` adds a snippet preview under each row.
pub fn render_topic_list(
    topics: &[DisplayTopic],
    current: Option<&TopicRef>,
    peek_lines: Option<usize>,
    use_color: bool,
) -> String {
    let number_width = topics
        .iter()
        .map(|t| t.number.to_string().len())
        .max()
        .unwrap_or(1);

    let mut groups: Vec<CategoryGroupData> = Vec::new();
    for dt in topics {
        let starts_group = groups
            .last()
            .map_or(true, |g| g.title != dt.category_title);
        if starts_group {
            groups.push(CategoryGroupData {
                icon: dt.category_icon.clone(),
                title: dt.category_title.clone(),
                rows: Vec::new(),
            });
        }

        let marker = if current == Some(&dt.topic_ref) {
            CURRENT_MARKER.to_string()
        } else {
            "  ".to_string()
        };
        let number = format!("{:>width$}.", dt.number, width = number_width);

        let fixed_width = CURRENT_MARKER.width() + number.width() + 1 + 2 + LEVEL_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&dt.topic.title, available);
        let padding = " ".repeat(available.saturating_sub(title.width()) + 2);

        let peek = peek_lines
            .map(|n| peek_rows(&dt.topic.content.code, n))
            .unwrap_or_default();

        if let Some(group) = groups.last_mut() {
            group.rows.push(TopicRowData {
                marker,
                number,
                title,
                padding,
                level: dt.topic.level.to_string(),
                level_style: level_style(&dt.topic.level).to_string(),
                peek,
            });
        }
    }

    let data = ListData {
        empty: groups.is_empty(),
        groups,
        empty_message: "No topics found.".to_string(),
        peek_indent: PEEK_INDENT.to_string(),
    };

    render_template("list.tmp", &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn peek_rows(code: &str, lines: usize) -> Vec<StyledLine> {
    let peek = peek_snippet(code, lines);
    let available = LINE_WIDTH.saturating_sub(PEEK_INDENT.width());
    let styled = |text: &str, style: &str| StyledLine {
        text: truncate_to_width(text, available),
        style: style.to_string(),
    };

    let mut rows: Vec<StyledLine> = peek
        .head
        .lines()
        .map(|l| styled(l, names::PEEK))
        .collect();
    if let Some(hidden) = peek.hidden_lines {
        rows.push(styled(
            &format!("… {} lines not shown", hidden),
            names::PEEK_MARKER,
        ));
    }
    if let Some(tail) = &peek.tail {
        rows.extend(tail.lines().map(|l| styled(l, names::PEEK)));
    }
    rows
}

fn output_data(display: &ExecutionDisplay) -> OutputData {
    if display.is_running {
        OutputData {
            lines: vec![display.output.clone()],
            style: names::OUTPUT_RUNNING.to_string(),
        }
    } else if display.output.is_empty() {
        OutputData {
            lines: vec![IDLE_PLACEHOLDER.to_string()],
            style: names::OUTPUT_IDLE.to_string(),
        }
    } else {
        OutputData {
            lines: display.output.split('\n').map(str::to_string).collect(),
            style: names::OUTPUT_DONE.to_string(),
        }
    }
}

/// Renders the topic panel: header, overview, key points, the code buffer with line
/// numbers and, when given, the output panel.
pub fn render_topic(
    topic: &DisplayTopic,
    buffer: &str,
    display: Option<&ExecutionDisplay>,
    use_color: bool,
) -> String {
    let lines: Vec<&str> = buffer.split('\n').collect();
    let gutter_width = lines.len().to_string().len();
    let code_lines = lines
        .iter()
        .enumerate()
        .map(|(i, text)| CodeLineData {
            gutter: format!("{:>width$} │", i + 1, width = gutter_width),
            text: text.to_string(),
        })
        .collect();

    let content = &topic.topic.content;
    let data = TopicData {
        number: format!("{}.", topic.number),
        title: topic.topic.title.clone(),
        level: topic.topic.level.to_string(),
        level_style: level_style(&topic.topic.level).to_string(),
        category: format!("{} {}", topic.category_icon, topic.category_title),
        path: topic.topic_ref.to_string(),
        description: topic.topic.description.clone(),
        overview: content.overview.clone(),
        key_points: content.key_points.clone(),
        edited: buffer != content.code,
        code_lines,
        output: display.map(output_data),
    };

    render_template("topic.tmp", &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders only the output panel.
pub fn render_output(display: &ExecutionDisplay, use_color: bool) -> String {
    let data = OutputPanelData {
        output: output_data(display),
    };
    render_template("output.tmp", &data, use_color)
        .unwrap_or_else(|_| format!("{}\n", display.output))
}

pub fn render_text_list(lines: &[String], empty_message: &str, use_color: bool) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };
    render_template("text_list.tmp", &data, use_color)
        .unwrap_or_else(|_| format!("{}\n", empty_message))
}

/// Renders command messages with the themed level styles.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let message_data: Vec<MessageData> = messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => names::INFO,
                MessageLevel::Success => names::SUCCESS,
                MessageLevel::Warning => names::WARNING,
                MessageLevel::Error => names::ERROR,
            };
            MessageData {
                content: msg.content.clone(),
                style: style.to_string(),
            }
        })
        .collect();

    let data = MessagesData {
        messages: message_data,
    };

    render_template("messages.tmp", &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use gostudy::catalogue::Catalogue;
    use gostudy::index::display_topic;

    fn all_topics() -> (Catalogue, Vec<DisplayTopic>) {
        let catalogue = Catalogue::builtin().unwrap();
        let topics = catalogue
            .entries()
            .map(|e| DisplayTopic::from_entry(&e))
            .collect();
        (catalogue, topics)
    }

    #[test]
    fn list_groups_by_category() {
        let (_, topics) = all_topics();
        let output = render_topic_list(&topics, None, None, false);
        assert!(output.contains("Fundamentals"));
        assert!(output.contains(" 1. Project Folder"));
        assert!(output.contains("Beginner"));
        assert!(!output.contains("(!?)"));
        assert_eq!(output.matches("Fundamentals").count(), 1);
    }

    #[test]
    fn list_marks_current_topic() {
        let (_, topics) = all_topics();
        let current = topics[1].topic_ref.clone();
        let output = render_topic_list(&topics, Some(&current), None, false);
        let marked: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with(CURRENT_MARKER))
            .collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains(&topics[1].topic.title));
    }

    #[test]
    fn list_rows_fit_the_line_width() {
        let (_, topics) = all_topics();
        let output = render_topic_list(&topics, None, None, false);
        for line in output.lines() {
            assert!(line.width() <= LINE_WIDTH, "too wide: {}", line);
        }
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(render_topic_list(&[], None, None, false), "No topics found.\n");
    }

    #[test]
    fn peek_adds_snippet_lines() {
        let (_, topics) = all_topics();
        let output = render_topic_list(&topics[..1], None, Some(2), false);
        assert!(output.contains("package main"));
    }

    #[test]
    fn topic_panel_sections() {
        let (catalogue, _) = all_topics();
        let topic_ref = TopicRef::new("basics", "project");
        let dt = display_topic(&catalogue, &topic_ref).unwrap();
        let code = dt.topic.content.code.clone();
        let output = render_topic(&dt, &code, None, false);
        assert!(output.contains("Project Folder"));
        assert!(output.contains("Overview"));
        assert!(output.contains("Key Points"));
        assert!(output.contains("basics/project"));
        assert!(output.contains("Welcome to Go"));
        assert!(!output.contains("(edited)"));
        assert!(!output.contains("Output"));
    }

    #[test]
    fn topic_panel_marks_edits_and_output() {
        let (catalogue, _) = all_topics();
        let dt = display_topic(&catalogue, &TopicRef::new("basics", "project")).unwrap();
        let display = ExecutionDisplay {
            is_running: false,
            output: "done".into(),
        };
        let output = render_topic(&dt, "package main", Some(&display), false);
        assert!(output.contains("(edited)"));
        assert!(output.contains("1 │ package main"));
        assert!(output.contains("Output\ndone\n"));
    }

    #[test]
    fn output_panel_states() {
        let idle = render_output(&ExecutionDisplay::default(), false);
        assert!(idle.contains(IDLE_PLACEHOLDER));

        let running = ExecutionDisplay {
            is_running: true,
            output: "Running...".into(),
        };
        assert_eq!(render_output(&running, false), "Output\nRunning...\n");

        let done = ExecutionDisplay {
            is_running: false,
            output: "a\nb".into(),
        };
        assert_eq!(render_output(&done, false), "Output\na\nb\n");
    }

    #[test]
    fn messages_render_plain() {
        let messages = vec![
            CmdMessage::success("Selected"),
            CmdMessage::warning("Careful"),
        ];
        assert_eq!(render_messages(&messages, false), "Selected\nCareful\n");
        assert_eq!(render_messages(&[], false), "");
    }

    #[test]
    fn text_list_falls_back_to_empty_message() {
        assert_eq!(render_text_list(&[], "Nothing.", false), "Nothing.\n");
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(render_text_list(&lines, "Nothing.", false), "a\nb\n");
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a rather long title", 8);
        assert_eq!(cut.width(), 8);
        assert!(cut.ends_with('…'));
    }
}
