//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone files, so they
//! can be edited and diffed apart from the code, and included here as string constants.
//!
//! Conventions:
//!
//! 1. Line breaks are explicit. Each output line ends inside the template, next to the tag
//!    that produced it, so loops and conditionals never leak blank lines. The renderer
//!    normalizes the final newline.
//! 2. Layout math (numbering, padding, truncation) happens in Rust; templates only pick
//!    styles through the `style` filter, by name.
//! 3. When a style depends on data, Rust passes the style name in and the template uses
//!    it directly instead of branching.
pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const TOPIC_TEMPLATE: &str = include_str!("templates/topic.tmp");
pub const OUTPUT_TEMPLATE: &str = include_str!("templates/output.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
