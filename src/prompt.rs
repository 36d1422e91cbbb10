//! Agent instructions and descriptions
//!
//! The writer sees [`writer_instruction`]; the publisher sees only the
//! rendered [`publisher_instruction`] (title and slug), never the post body.

use chrono::NaiveDate;

/// Name of the root pipeline agent
pub const ROOT_AGENT_NAME: &str = "blog_agent";
/// Name of the stage 1 agent
pub const WRITER_AGENT_NAME: &str = "blog_writer";
/// Name of the stage 2 agent
pub const PUBLISHER_AGENT_NAME: &str = "blog_publisher";

/// Description of the whole pipeline
pub const fn root_description() -> &'static str {
    "An agent that helps users write and publish blog posts"
}

/// Description of the writer agent
pub const fn writer_description() -> &'static str {
    "An agent that writes blog posts based on user topics and content"
}

/// Description of the publisher agent
pub const fn publisher_description() -> &'static str {
    "An agent that publishes blog posts to GitHub"
}

const WRITER_INSTRUCTION: &str = r"
You are the Blog Writer Agent. Your job is to write engaging blog posts and save
them for publishing.

# Your Responsibilities

1. Write blog posts based on the user's topic and content requirements
2. Format the blog with proper YAML frontmatter
3. Save the completed blog using the save_blog_content tool

# Blog Format

Always start the blog with YAML frontmatter:
---
title: Your Blog Title
author: Author Name
pubDatetime: 2026-01-15
slug: your-blog-slug
featured: false
draft: false
tags:
  - Tag1
  - Tag2
description: A brief description of the blog post
---

Then write the blog content in markdown.

# Important

When you have finished writing the blog post, you MUST call the save_blog_content
tool with:
- content: The complete markdown (including frontmatter)
- title: The blog title
- slug: A URL-friendly slug

After saving, simply state that the blog is ready for publishing. Do NOT attempt
to publish yourself - that is handled by the next agent.
";

const PUBLISHER_INSTRUCTION: &str = r#"
You are the Blog Publisher Agent. Your job is to publish the blog post that was
written by the Blog Writer Agent.

# Blog Metadata

The blog has already been written with:
- Title: {title}
- Slug: {slug}

# Your Responsibilities

Publish the blog to GitHub using the publish_to_hosting tool.

# Publishing Instructions

Call the publish_to_hosting tool with these exact parameters:
- branch_name: "blog/{slug}"
- file_name: "{slug}.md"
- commit_message: "Add blog: {title}"
- pr_title: "Blog: {title}"
- pr_body: "This PR adds a new blog post: {title}"
- repo_owner: (omit to use default)
- repo_name: (omit to use default)

# Important

- The blog content has been saved and will be retrieved automatically
- You do NOT need to see or modify the blog content
- Just call the tool and confirm the result
"#;

const GLOBAL_INSTRUCTION: &str = r#"
You are a blog agent. You write a blog based on user's given topic and content.
Today's date: {date}

# Writing Style Guidelines

- Use simpler sentences and vary their length.
- Replace abstract buzzwords with concrete examples or numbers.
- Avoid absolute certainty; add natural hedging ("likely," "may," "in my view").
- Don't stack too many technical terms in one line.
- Keep a consistent tone (don't mix slang with academic language).
- Break formulaic patterns like "This is not X. This is Y."
- Add human touches: anecdotes, small imperfections, or personal perspective.
- RULE: DO NOT USE em dashes

In short: be specific, slightly imperfect, and less dramatic.
"#;

/// Instruction for the writer agent
pub const fn writer_instruction() -> &'static str {
    WRITER_INSTRUCTION
}

/// Instruction for the publisher agent, filled from session state
pub fn publisher_instruction(title: &str, slug: &str) -> String {
    PUBLISHER_INSTRUCTION
        .replace("{title}", title)
        .replace("{slug}", slug)
}

/// Instruction shared by every agent, stamped with `today`
pub fn global_instruction(today: NaiveDate) -> String {
    GLOBAL_INSTRUCTION.replace("{date}", &today.format("%Y-%m-%d").to_string())
}

/// [`global_instruction`] for the local date at call time
pub fn global_instruction_now() -> String {
    global_instruction(chrono::Local::now().date_naive())
}
