// doohickey-markup: HTML <-> Markdown converters built on ordered regex pipelines.

pub mod html_to_md;
pub mod md_to_html;
pub mod pipeline;


pub use html_to_md::{html_to_markdown, HtmlToMarkdown};
pub use md_to_html::{commonmark_to_html, markdown_to_html, render, MarkdownFlavor, MarkdownToHtml};
pub use pipeline::{Pipeline, Step};
